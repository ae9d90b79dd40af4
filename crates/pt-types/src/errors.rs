use thiserror::Error;

/// Main error type for paretune
#[derive(Error, Debug)]
pub enum PtError {
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Optimizer error: {0}")]
    Optimizer(#[from] optimizer::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures of a single trial evaluation against the external scorer
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("{program} exited with {}: {stderr}", describe_exit(.code))]
    ProcessExecution {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Malformed output {output:?}: {reason}")]
    MalformedOutput { output: String, reason: String },

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl EvaluationError {
    pub fn malformed(output: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedOutput {
            output: output.into(),
            reason: reason.into(),
        }
    }

    pub fn is_process_execution(&self) -> bool {
        matches!(self, Self::ProcessExecution { .. })
    }

    pub fn is_malformed_output(&self) -> bool {
        matches!(self, Self::MalformedOutput { .. })
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Result type alias for paretune operations
pub type PtResult<T> = Result<T, PtError>;

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::PtError::Config(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EvaluationError::ProcessExecution {
            program: "./scorer".to_string(),
            code: Some(1),
            stderr: "boom".to_string(),
        };

        let text = error.to_string();
        assert!(text.contains("./scorer"));
        assert!(text.contains("status 1"));
        assert!(text.contains("boom"));

        let signalled = EvaluationError::ProcessExecution {
            program: "./scorer".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(signalled.to_string().contains("signal"));
    }

    #[test]
    fn test_error_conversion() {
        let eval_error = EvaluationError::malformed("3.14", "expected exactly one comma");
        assert!(eval_error.is_malformed_output());
        assert!(!eval_error.is_process_execution());

        let pt_error: PtError = eval_error.into();
        match pt_error {
            PtError::Evaluation(EvaluationError::MalformedOutput { output, .. }) => {
                assert_eq!(output, "3.14")
            }
            other => panic!("Expected Evaluation error, got {other:?}"),
        }
    }

    #[test]
    fn test_optimizer_error_conversion() {
        let pt_error: PtError = optimizer::Error::ObjectiveDimensionMismatch {
            expected: 2,
            got: 1,
        }
        .into();
        assert!(matches!(pt_error, PtError::Optimizer(_)));
        assert!(pt_error.to_string().contains("expected 2 values"));

        let io_error: PtError =
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed").into();
        assert!(matches!(io_error, PtError::Io(_)));
    }

    #[test]
    fn test_macros() {
        let config_err = config_error!("bad bounds for {}", "t1");
        assert!(matches!(config_err, PtError::Config(_)));
        assert!(config_err.to_string().contains("t1"));
    }
}
