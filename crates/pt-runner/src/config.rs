//! Run configuration. The defaults are the reference tuning run.

use crate::study::SamplerKind;
use pt_types::{config_error, PtResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Scorer invoked when no program is given.
pub const DEFAULT_PROGRAM: &str = "./target/release/tmp";

/// Trial budget of the reference run.
pub const DEFAULT_TRIALS: usize = 10;

/// First positional parameter and its bounds.
pub const T1: (&str, f64, f64) = ("t1", 0.0, 200.0);

/// Second positional parameter and its bounds.
pub const T2: (&str, f64, f64) = ("t2", 0.0, 10.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Text
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuneConfig {
    /// External scorer executable.
    pub program: PathBuf,

    /// Fixed arguments passed before `t1 t2`.
    pub program_args: Vec<String>,

    pub n_trials: usize,
    pub sampler: SamplerKind,
    pub seed: Option<u64>,
    pub output: OutputFormat,
}

impl Default for TuneConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            program_args: Vec::new(),
            n_trials: DEFAULT_TRIALS,
            sampler: SamplerKind::default(),
            seed: None,
            output: OutputFormat::default(),
        }
    }
}

impl TuneConfig {
    pub fn validate(&self) -> PtResult<()> {
        if self.program.as_os_str().is_empty() {
            return Err(config_error!("program path is empty"));
        }
        if self.n_trials == 0 {
            return Err(config_error!("n_trials must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let config = TuneConfig::default();
        assert_eq!(config.program, PathBuf::from("./target/release/tmp"));
        assert_eq!(config.n_trials, 10);
        assert_eq!(config.sampler, SamplerKind::Random);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());

        assert_eq!(T1, ("t1", 0.0, 200.0));
        assert_eq!(T2, ("t2", 0.0, 10.0));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = TuneConfig::default();
        config.n_trials = 0;
        assert!(config.validate().is_err());

        let mut config = TuneConfig::default();
        config.program = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
