use clap::Parser;
use paretune::{OutputFormat, SamplerKind, TuneConfig, DEFAULT_PROGRAM, DEFAULT_TRIALS};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pareto search over an external score/sigma binary")]
struct Cli {
    /// Scorer executable, called as `<program> [args..] <t1> <t2>`
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    program: PathBuf,

    /// Extra argument passed before t1 and t2 (repeatable)
    #[arg(long = "arg", value_name = "ARG")]
    program_args: Vec<String>,

    /// Number of trials
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,

    /// Proposal strategy
    #[arg(long, value_enum, default_value_t = SamplerKind::Random)]
    sampler: SamplerKind,

    /// Seed for reproducible proposals
    #[arg(long)]
    seed: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

impl Cli {
    fn into_config(self) -> TuneConfig {
        TuneConfig {
            program: self.program,
            program_args: self.program_args,
            n_trials: self.trials,
            sampler: self.sampler,
            seed: self.seed,
            output: self.output,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    paretune::init_tracing();

    let config = cli.into_config();
    let tuning = paretune::run(&config)?;
    let report = tuning.report();

    match config.output {
        OutputFormat::Text => print!("{}", paretune::render_text(&report)),
        OutputFormat::Json => println!("{}", paretune::render_json(&report)?),
    }
    Ok(())
}
