//! The search loop, delegated to the `optimizer` crate's
//! [`MultiObjectiveStudy`].
//!
//! Trials are drawn with `ask`, scored by the external binary and returned
//! with `tell`. The first failed evaluation aborts the run.

use crate::config::{T1, T2};
use crate::evaluator::ExternalEvaluator;
use optimizer::distribution::Distribution;
use optimizer::multi_objective::{MultiObjectiveSampler, MultiObjectiveStudy, MultiObjectiveTrial};
use optimizer::param::ParamValue;
use optimizer::parameter::{FloatParam, Parameter};
use optimizer::sampler::{Nsga2Sampler, RandomSampler, Sampler};
use optimizer::{AttrValue, Direction, Trial};
use pt_types::{EvaluationOutput, ObjectiveDirection, PtResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use tracing::{debug, error};

/// Trial attribute holding the scorer's wall-clock time in seconds.
pub const ELAPSED_ATTR: &str = "elapsed_seconds";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SamplerKind {
    /// Independent uniform draws.
    Random,
    /// NSGA-II from the `optimizer` crate.
    Nsga2,
}

impl Default for SamplerKind {
    fn default() -> Self {
        Self::Random
    }
}

impl fmt::Display for SamplerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Nsga2 => write!(f, "nsga2"),
        }
    }
}

/// The library's random sampler with a fixed seed.
///
/// `MultiObjectiveStudy::new` always seeds from entropy, so reproducible
/// random runs go through this wrapper.
struct SeededRandom(RandomSampler);

impl MultiObjectiveSampler for SeededRandom {
    fn sample(
        &self,
        distribution: &Distribution,
        trial_id: u64,
        _history: &[MultiObjectiveTrial],
        _directions: &[Direction],
    ) -> ParamValue {
        self.0.sample(distribution, trial_id, &[])
    }
}

/// The two scorer parameters and their bounds.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    pub t1: FloatParam,
    pub t2: FloatParam,
}

impl ParameterSpace {
    /// `t1 ∈ [0, 200]`, `t2 ∈ [0, 10]`.
    pub fn reference() -> Self {
        Self {
            t1: FloatParam::new(T1.1, T1.2).name(T1.0),
            t2: FloatParam::new(T2.1, T2.2).name(T2.0),
        }
    }

    /// Draw both parameters for `trial`, in the scorer's positional order.
    pub fn suggest(&self, trial: &mut Trial) -> optimizer::Result<[f64; 2]> {
        Ok([self.t1.suggest(trial)?, self.t2.suggest(trial)?])
    }
}

/// One completed trial as shown in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub number: u64,
    pub t1: f64,
    pub t2: f64,
    pub score: f64,
    pub sigma: f64,
    pub elapsed_seconds: f64,
}

/// End-of-run summary: the Pareto-optimal trials out of all completed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoReport {
    pub directions: Vec<ObjectiveDirection>,
    pub trials_completed: usize,
    pub front: Vec<TrialRecord>,
}

/// An owned study over [`ParameterSpace::reference`] with
/// maximize-score / minimize-sigma directions.
pub struct Tuning {
    study: MultiObjectiveStudy,
    space: ParameterSpace,
}

impl Tuning {
    pub fn new(sampler: SamplerKind, seed: Option<u64>) -> Self {
        let directions: Vec<Direction> = EvaluationOutput::directions()
            .into_iter()
            .map(Direction::from)
            .collect();

        let study = match (sampler, seed) {
            (SamplerKind::Random, Some(seed)) => MultiObjectiveStudy::with_sampler(
                directions,
                SeededRandom(RandomSampler::with_seed(seed)),
            ),
            (SamplerKind::Random, None) => MultiObjectiveStudy::new(directions),
            (SamplerKind::Nsga2, Some(seed)) => {
                MultiObjectiveStudy::with_sampler(directions, Nsga2Sampler::with_seed(seed))
            }
            (SamplerKind::Nsga2, None) => {
                MultiObjectiveStudy::with_sampler(directions, Nsga2Sampler::new())
            }
        };

        Self {
            study,
            space: ParameterSpace::reference(),
        }
    }

    pub fn study(&self) -> &MultiObjectiveStudy {
        &self.study
    }

    pub fn space(&self) -> &ParameterSpace {
        &self.space
    }

    /// Run `n_trials` sequential evaluations, writing `elapsed: <secs>` to
    /// `out` after each one.
    ///
    /// An evaluation error is recorded as a failed trial and returned at once.
    pub fn optimize<W: Write>(
        &self,
        n_trials: usize,
        evaluator: &ExternalEvaluator,
        out: &mut W,
    ) -> PtResult<()> {
        for _ in 0..n_trials {
            let mut trial = self.study.ask();
            let params = self.space.suggest(&mut trial)?;

            let evaluation = match evaluator.run(&params) {
                Ok(evaluation) => evaluation,
                Err(e) => {
                    error!("Trial {} failed: {}", trial.id(), e);
                    self.study.tell(trial, Err::<Vec<f64>, _>(e.to_string()))?;
                    return Err(e.into());
                }
            };

            let elapsed = evaluation.elapsed.as_secs_f64();
            writeln!(out, "elapsed: {elapsed}")?;
            debug!("Trial {} {:?} -> {:?}", trial.id(), params, evaluation.output);

            trial.set_user_attr(ELAPSED_ATTR, elapsed);
            self.study
                .tell(trial, Ok::<_, String>(evaluation.output.values()))?;
        }
        Ok(())
    }

    /// Every completed trial, in trial order.
    pub fn trials(&self) -> Vec<TrialRecord> {
        self.records(self.study.trials())
    }

    /// The completed trials no other trial dominates, in trial order.
    pub fn pareto_front(&self) -> Vec<TrialRecord> {
        self.records(self.study.pareto_front())
    }

    pub fn report(&self) -> ParetoReport {
        ParetoReport {
            directions: EvaluationOutput::directions().to_vec(),
            trials_completed: self.study.n_trials(),
            front: self.pareto_front(),
        }
    }

    fn records(&self, trials: Vec<MultiObjectiveTrial>) -> Vec<TrialRecord> {
        let mut records: Vec<TrialRecord> =
            trials.iter().filter_map(|t| self.record(t)).collect();
        records.sort_by_key(|r| r.number);
        records
    }

    fn record(&self, trial: &MultiObjectiveTrial) -> Option<TrialRecord> {
        let [score, sigma] = trial.values[..] else {
            return None;
        };
        let Some(AttrValue::Float(elapsed_seconds)) = trial.user_attr(ELAPSED_ATTR) else {
            return None;
        };
        Some(TrialRecord {
            number: trial.id,
            t1: trial.get(&self.space.t1)?,
            t2: trial.get(&self.space.t2)?,
            score,
            sigma,
            elapsed_seconds: *elapsed_seconds,
        })
    }
}

impl fmt::Debug for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tuning")
            .field("directions", &self.study.directions())
            .field("n_trials", &self.study.n_trials())
            .field("space", &self.space)
            .finish()
    }
}
