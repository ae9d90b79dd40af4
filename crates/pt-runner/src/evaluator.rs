//! Runs the external scoring binary for one trial and parses its
//! `score,sigma` reply.

use pt_types::{EvaluationError, EvaluationOutput};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};
use tracing::debug;

/// A parsed reply plus how long the process took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub output: EvaluationOutput,
    pub elapsed: Duration,
}

/// Invokes `program [leading_args..] <p1> <p2>` once per evaluation.
///
/// Arguments are passed as discrete argv entries; no shell is involved.
#[derive(Debug, Clone)]
pub struct ExternalEvaluator {
    program: PathBuf,
    leading_args: Vec<String>,
}

impl ExternalEvaluator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Fixed arguments placed before the trial parameters.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Score one `(p1, p2)` pair.
    pub fn evaluate(&self, p1: f64, p2: f64) -> Result<EvaluationOutput, EvaluationError> {
        self.run(&[p1, p2]).map(|e| e.output)
    }

    /// Spawn the binary with `values` appended and wait for it to exit.
    pub fn run(&self, values: &[f64]) -> Result<Evaluation, EvaluationError> {
        let program = self.program.display().to_string();
        let mut cmd = self.command(values);
        debug!("Running {:?}", cmd);

        let start = Instant::now();
        let output = cmd.output().map_err(|source| EvaluationError::Spawn {
            program: program.clone(),
            source,
        })?;
        let elapsed = start.elapsed();

        if !output.status.success() {
            return Err(EvaluationError::ProcessExecution {
                program,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            EvaluationError::malformed(
                String::from_utf8_lossy(e.as_bytes()),
                "output is not valid UTF-8",
            )
        })?;
        let parsed = parse_output(&stdout)?;
        debug!(
            "{} replied {:?} in {:.3}s",
            program,
            parsed,
            elapsed.as_secs_f64()
        );

        Ok(Evaluation {
            output: parsed,
            elapsed,
        })
    }

    fn command(&self, values: &[f64]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args);
        cmd.args(values.iter().map(|v| v.to_string()));
        cmd
    }
}

/// Parse `"<score>,<sigma>"`.
///
/// Exactly one comma is required. Whitespace around each field, such as
/// the trailing newline, is ignored.
pub fn parse_output(stdout: &str) -> Result<EvaluationOutput, EvaluationError> {
    let fields: Vec<&str> = stdout.split(',').collect();
    if fields.len() != 2 {
        return Err(EvaluationError::malformed(
            stdout,
            format!("expected exactly one comma, found {}", fields.len() - 1),
        ));
    }

    let score = parse_field(stdout, fields[0], "score")?;
    let sigma = parse_field(stdout, fields[1], "sigma")?;
    Ok(EvaluationOutput::new(score, sigma))
}

fn parse_field(stdout: &str, field: &str, what: &str) -> Result<f64, EvaluationError> {
    let field = field.trim();
    field
        .parse::<f64>()
        .map_err(|e| EvaluationError::malformed(stdout, format!("{what} {field:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_score_and_sigma() {
        assert_eq!(parse_output("3.14,0.01").unwrap(), EvaluationOutput::new(3.14, 0.01));
        assert_eq!(
            parse_output("1e3,2.5E-4\n").unwrap(),
            EvaluationOutput::new(1000.0, 0.00025)
        );
        assert_eq!(
            parse_output("-7, 0\r\n").unwrap(),
            EvaluationOutput::new(-7.0, 0.0)
        );
    }

    #[test]
    fn rejects_wrong_comma_count() {
        for bad in ["3.14", "", "\n", "1,2,3", "1,,2", ","] {
            let err = parse_output(bad).unwrap_err();
            assert!(err.is_malformed_output(), "{bad:?} gave {err:?}");
        }
    }

    #[test]
    fn rejects_non_numeric_fields() {
        for bad in ["abc,0.01", "3.14,xyz", "3.14,", ",0.01", "1.0,2.0\n3.0"] {
            let err = parse_output(bad).unwrap_err();
            assert!(err.is_malformed_output(), "{bad:?} gave {err:?}");
        }
        let err = parse_output("abc,0.01").unwrap_err();
        assert!(err.to_string().contains("score"));
    }

    #[test]
    fn command_uses_discrete_arguments() {
        let evaluator = ExternalEvaluator::new("./target/release/tmp").with_args(["--quiet"]);
        let cmd = evaluator.command(&[150.25, 0.1]);
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["--quiet", "150.25", "0.1"]);
        assert_eq!(cmd.get_program(), "./target/release/tmp");
    }

    #[test]
    fn argument_formatting_round_trips() {
        for v in [0.0, 200.0, 1.0 / 3.0, 9.999999999999998, 1e-300] {
            let text = v.to_string();
            assert_eq!(text.parse::<f64>().unwrap(), v);
        }
    }

    #[test]
    fn spawn_failure_is_reported() {
        let evaluator = ExternalEvaluator::new("/nonexistent/paretune-scorer");
        match evaluator.evaluate(1.0, 2.0) {
            Err(EvaluationError::Spawn { program, .. }) => {
                assert!(program.contains("paretune-scorer"))
            }
            other => panic!("expected Spawn error, got {other:?}"),
        }
    }
}
