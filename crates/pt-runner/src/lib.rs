//! # paretune
//!
//! Tunes two parameters of an external scoring binary. Each trial runs
//! `<program> <t1> <t2>`, reads back `score,sigma`, and an
//! `optimizer::multi_objective::MultiObjectiveStudy` keeps the trials that
//! are Pareto-optimal for maximum score and minimum sigma.

pub mod config;
pub mod evaluator;
pub mod report;
pub mod study;

use pt_types::PtResult;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{OutputFormat, TuneConfig, DEFAULT_PROGRAM, DEFAULT_TRIALS, T1, T2};
pub use evaluator::{parse_output, Evaluation, ExternalEvaluator};
pub use report::{render_json, render_text};
pub use study::{ParameterSpace, ParetoReport, SamplerKind, TrialRecord, Tuning};

/// Install the global `tracing` subscriber, filtered by `RUST_LOG`
/// (default `info`). Logs go to stderr; stdout carries the report.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber installed earlier (tests, embedding) stays in place.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Run the configured study, printing each trial's elapsed time to stdout.
pub fn run(config: &TuneConfig) -> PtResult<Tuning> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    run_with_output(config, &mut lock)
}

/// Like [`run`], writing the per-trial `elapsed:` lines to `out`.
///
/// A failed write to `out` aborts the run with [`pt_types::PtError::Io`].
pub fn run_with_output<W: Write>(config: &TuneConfig, out: &mut W) -> PtResult<Tuning> {
    config.validate()?;

    let evaluator =
        ExternalEvaluator::new(&config.program).with_args(config.program_args.iter().cloned());
    let tuning = Tuning::new(config.sampler, config.seed);
    info!(
        "Tuning {} for {} trials with the {} sampler",
        evaluator.program().display(),
        config.n_trials,
        config.sampler
    );

    tuning.optimize(config.n_trials, &evaluator, out)?;
    out.flush()?;

    info!(
        "Finished: {} Pareto-optimal of {} trials",
        tuning.pareto_front().len(),
        tuning.study().n_trials()
    );
    Ok(tuning)
}
