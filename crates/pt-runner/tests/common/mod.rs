//! Stub scorers for integration tests.
//!
//! Scripts are run through `/bin/sh <script> <t1> <t2>` so the test never
//! executes a file it has just written.

#![allow(dead_code)]

use paretune::ExternalEvaluator;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct StubScorer {
    _dir: TempDir,
    pub script: PathBuf,
}

impl StubScorer {
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let script = dir.path().join("scorer.sh");
        fs::write(&script, format!("#!/bin/sh\n{body}\n")).expect("write stub scorer");
        Self { _dir: dir, script }
    }

    /// Echoes its two arguments back: score = t1, sigma = t2.
    pub fn identity() -> Self {
        Self::new(r#"printf '%s,%s\n' "$1" "$2""#)
    }

    pub fn evaluator(&self) -> ExternalEvaluator {
        ExternalEvaluator::new("/bin/sh")
            .with_args([self.script.display().to_string()])
    }

    pub fn program_args(&self) -> Vec<String> {
        vec![self.script.display().to_string()]
    }
}
