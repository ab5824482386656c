//! Violation Debounce Engine
//!
//! Input: ordered [`Sample`]s + ambient temperature + [`EnvelopeConfig`]
//! Output: [`RunEvaluation`] (one [`AnnotatedSample`] per input sample + verdict)
//!
//! Single pass, strictly in the given order: the accumulator depends on every
//! earlier sample of the run.

use serde::{Deserialize, Serialize};

use super::state::DebounceState;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::logic::dataset::Sample;
use crate::logic::envelope::{
    evaluate_sample, EnvelopeConfig, EnvelopeFlags, QualificationPolicy, TimestampPolicy,
};

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// A sample together with everything the engine derived for it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSample {
    pub sample: Sample,
    pub flags: EnvelopeFlags,
    pub raw_violation: bool,
    /// Time since the previous evaluated sample, after the timestamp policy
    pub dt: f64,
    /// Streak duration after this sample (0 when not violating)
    pub accumulated: f64,
    /// Sustained violation confirmed at this sample
    pub sustained_violation: bool,
    pub qualified: bool,
}

/// Run-level outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunVerdict {
    Pass,
    Disqualified {
        /// Elapsed time of the first confirming sample
        first_violation_time: f64,
        /// Raw row of that sample
        row_index: usize,
    },
}

impl RunVerdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, RunVerdict::Pass)
    }

    pub fn first_violation_time(&self) -> Option<f64> {
        match self {
            RunVerdict::Pass => None,
            RunVerdict::Disqualified {
                first_violation_time,
                ..
            } => Some(*first_violation_time),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunVerdict::Pass => "PASS",
            RunVerdict::Disqualified { .. } => "DISQUALIFIED",
        }
    }

    /// One-line verdict shown to the operator
    pub fn headline(&self) -> String {
        match self {
            RunVerdict::Pass => "PASS".to_string(),
            RunVerdict::Disqualified {
                first_violation_time,
                ..
            } => format!("DISQUALIFIED – violation from {:.2} s", first_violation_time),
        }
    }
}

impl std::fmt::Display for RunVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.headline())
    }
}

/// Counters for observability and the report footer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Data rows in the table (set by the pipeline; equals evaluated when
    /// the engine is called directly)
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub samples_evaluated: usize,
    pub raw_violations: usize,
    pub confirmed_violations: usize,
    pub disqualified_samples: usize,
    /// Longest uninterrupted raw-violation streak (seconds)
    pub longest_streak_secs: f64,
    /// Backward time steps floored to zero
    pub clamped_steps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvaluation {
    pub rows: Vec<AnnotatedSample>,
    pub verdict: RunVerdict,
    pub stats: RunStats,
}

impl RunEvaluation {
    pub fn first_violation(&self) -> Option<&AnnotatedSample> {
        self.rows.iter().find(|r| r.sustained_violation)
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

/// Evaluate one run
pub fn evaluate(
    samples: &[Sample],
    ambient_temp: f64,
    config: &EnvelopeConfig,
) -> AnalyzerResult<RunEvaluation> {
    let threshold = config.sustained_violation_threshold;
    let mut rows = Vec::with_capacity(samples.len());
    let mut stats = RunStats {
        rows_read: samples.len(),
        samples_evaluated: samples.len(),
        ..Default::default()
    };

    let mut state = DebounceState::Normal;
    let mut previous: Option<&Sample> = None;
    let mut previous_confirmed = false;

    for sample in samples {
        let dt = match previous {
            None => 0.0,
            Some(prev) => step_dt(prev, sample, config.timestamp_policy, &mut stats)?,
        };

        let flags = evaluate_sample(sample, ambient_temp, config);
        let raw_violation = flags.raw_violation();

        let (next, confirmed) = state.step(raw_violation, dt, threshold);
        state = next;

        let qualified = match config.qualification_policy {
            QualificationPolicy::Strict => !confirmed,
            QualificationPolicy::TrailingWindow => !(confirmed || previous_confirmed),
        };

        if raw_violation {
            stats.raw_violations += 1;
        }
        if confirmed {
            stats.confirmed_violations += 1;
        }
        if !qualified {
            stats.disqualified_samples += 1;
        }
        stats.longest_streak_secs = stats.longest_streak_secs.max(state.accumulated());

        rows.push(AnnotatedSample {
            sample: *sample,
            flags,
            raw_violation,
            dt,
            accumulated: state.accumulated(),
            sustained_violation: confirmed,
            qualified,
        });

        previous = Some(sample);
        previous_confirmed = confirmed;
    }

    if stats.clamped_steps > 0 {
        log::warn!(
            "Clamped {} backward time step(s) to zero",
            stats.clamped_steps
        );
    }

    let mut evaluation = RunEvaluation {
        rows,
        verdict: RunVerdict::Pass,
        stats,
    };
    let first = evaluation
        .first_violation()
        .map(|r| (r.sample.elapsed_time, r.sample.row_index));
    if let Some((first_violation_time, row_index)) = first {
        evaluation.verdict = RunVerdict::Disqualified {
            first_violation_time,
            row_index,
        };
    }

    Ok(evaluation)
}

fn step_dt(
    prev: &Sample,
    current: &Sample,
    policy: TimestampPolicy,
    stats: &mut RunStats,
) -> AnalyzerResult<f64> {
    let dt = current.elapsed_time - prev.elapsed_time;
    if dt >= 0.0 {
        return Ok(dt);
    }

    match policy {
        TimestampPolicy::Clamp => {
            log::debug!(
                "Row {}: elapsed time {} < {}, clamping step to 0",
                current.row_index,
                current.elapsed_time,
                prev.elapsed_time
            );
            stats.clamped_steps += 1;
            Ok(0.0)
        }
        TimestampPolicy::Reject => Err(AnalyzerError::NonMonotonicTime {
            row_index: current.row_index,
            previous: prev.elapsed_time,
            current: current.elapsed_time,
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const AMBIENT: f64 = 20.0;

    fn sample(row_index: usize, t: f64, violating: bool) -> Sample {
        Sample {
            row_index,
            elapsed_time: t,
            throttle_position: 100.0,
            mixture_ratio: if violating { 0.95 } else { 0.86 },
            fuel_pressure: 340.0,
            intake_air_temp: 30.0,
            coolant_temp: 30.0,
        }
    }

    fn run(pattern: &[(f64, bool)]) -> Vec<Sample> {
        pattern
            .iter()
            .enumerate()
            .map(|(i, &(t, v))| sample(i, t, v))
            .collect()
    }

    fn confirmed(eval: &RunEvaluation) -> Vec<bool> {
        eval.rows.iter().map(|r| r.sustained_violation).collect()
    }

    #[test]
    fn test_reference_example_three_samples() {
        let samples = run(&[(10.0, true), (10.2, true), (10.6, true)]);
        let eval = evaluate(&samples, AMBIENT, &EnvelopeConfig::default()).unwrap();

        assert_eq!(confirmed(&eval), vec![false, false, true]);
        assert!((eval.rows[1].accumulated - 0.2).abs() < 1e-9);
        assert!((eval.rows[2].accumulated - 0.6).abs() < 1e-9);
        assert_eq!(eval.rows[0].dt, 0.0);
        assert_eq!(eval.verdict.first_violation_time(), Some(10.6));
        assert_eq!(eval.verdict.as_str(), "DISQUALIFIED");
    }

    #[test]
    fn test_clean_run_passes() {
        let samples = run(&[(0.0, false), (0.1, false), (0.2, false)]);
        let eval = evaluate(&samples, AMBIENT, &EnvelopeConfig::default()).unwrap();
        assert!(eval.verdict.is_pass());
        assert_eq!(eval.verdict.headline(), "PASS");
        assert!(eval.rows.iter().all(|r| r.qualified));
        assert_eq!(eval.stats.raw_violations, 0);
    }

    #[test]
    fn test_streak_below_threshold_never_confirms() {
        let samples = run(&[
            (0.0, true),
            (0.2, true),
            (0.4, true),
            (0.5, false),
            (0.6, true),
            (0.9, true),
        ]);
        let eval = evaluate(&samples, AMBIENT, &EnvelopeConfig::default()).unwrap();
        assert!(confirmed(&eval).iter().all(|c| !c));
        assert!(eval.verdict.is_pass());
        assert_eq!(eval.stats.raw_violations, 5);
        assert!((eval.stats.longest_streak_secs - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_confirmation_covers_suffix_of_streak() {
        let samples = run(&[
            (0.0, false),
            (0.2, true),
            (0.4, true),
            (0.6, true),
            (0.8, true),
            (1.0, true),
            (1.2, false),
            (1.4, true),
        ]);
        let eval = evaluate(&samples, AMBIENT, &EnvelopeConfig::default()).unwrap();
        // streak accumulates 0.2, 0.4, 0.6, 0.8, 1.0
        assert_eq!(
            confirmed(&eval),
            vec![false, false, false, true, true, true, false, false]
        );
        assert_eq!(
            eval.verdict,
            RunVerdict::Disqualified {
                first_violation_time: 0.6,
                row_index: 3
            }
        );
        assert_eq!(eval.stats.confirmed_violations, 3);
    }

    #[test]
    fn test_isolated_sample_with_long_gap_confirms() {
        let samples = run(&[(0.0, false), (1.0, true), (1.1, false)]);
        let eval = evaluate(&samples, AMBIENT, &EnvelopeConfig::default()).unwrap();
        assert_eq!(confirmed(&eval), vec![false, true, false]);
    }

    #[test]
    fn test_idle_samples_never_violate() {
        let mut samples = run(&[(0.0, true), (1.0, true), (2.0, true)]);
        for s in &mut samples {
            s.throttle_position = 50.0;
        }
        let eval = evaluate(&samples, AMBIENT, &EnvelopeConfig::default()).unwrap();
        assert!(eval.rows.iter().all(|r| !r.raw_violation));
        assert!(eval.verdict.is_pass());
    }

    #[test]
    fn test_trailing_window_disqualifies_next_sample() {
        let samples = run(&[(0.0, true), (0.6, true), (0.7, false), (0.8, false)]);

        let strict = evaluate(&samples, AMBIENT, &EnvelopeConfig::default()).unwrap();
        let qualified: Vec<bool> = strict.rows.iter().map(|r| r.qualified).collect();
        assert_eq!(qualified, vec![true, false, true, true]);

        let window = evaluate(&samples, AMBIENT, &EnvelopeConfig::trailing_window()).unwrap();
        let qualified: Vec<bool> = window.rows.iter().map(|r| r.qualified).collect();
        assert_eq!(qualified, vec![true, false, false, true]);
        assert_eq!(window.stats.disqualified_samples, 2);

        // Run verdict does not depend on the qualification policy
        assert_eq!(strict.verdict, window.verdict);
    }

    #[test]
    fn test_backward_time_is_clamped_by_default() {
        let samples = run(&[(5.0, true), (5.3, true), (4.0, true), (4.3, true)]);
        let eval = evaluate(&samples, AMBIENT, &EnvelopeConfig::default()).unwrap();
        assert_eq!(eval.rows[2].dt, 0.0);
        assert_eq!(eval.stats.clamped_steps, 1);
        // 0.3 + 0 + 0.3 = 0.6
        assert_eq!(confirmed(&eval), vec![false, false, false, true]);
    }

    #[test]
    fn test_backward_time_rejected_under_strict_timestamps() {
        let samples = run(&[(5.0, false), (5.3, false), (4.0, false)]);
        let err = evaluate(&samples, AMBIENT, &EnvelopeConfig::strict_timestamps()).unwrap_err();
        match err {
            AnalyzerError::NonMonotonicTime {
                row_index,
                previous,
                current,
            } => {
                assert_eq!(row_index, 2);
                assert_eq!(previous, 5.3);
                assert_eq!(current, 4.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_gapped_row_indices_are_preserved() {
        let samples = vec![sample(0, 0.0, true), sample(4, 0.3, true), sample(9, 0.6, true)];
        let eval = evaluate(&samples, AMBIENT, &EnvelopeConfig::default()).unwrap();
        assert_eq!(
            eval.verdict,
            RunVerdict::Disqualified {
                first_violation_time: 0.6,
                row_index: 9
            }
        );
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let samples = run(&[(0.0, true), (0.3, true), (0.4, false), (0.9, true), (1.6, true)]);
        let config = EnvelopeConfig::trailing_window();
        let first = evaluate(&samples, AMBIENT, &config).unwrap();
        let second = evaluate(&samples, AMBIENT, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_run_passes() {
        let eval = evaluate(&[], AMBIENT, &EnvelopeConfig::default()).unwrap();
        assert!(eval.verdict.is_pass());
        assert!(eval.rows.is_empty());
        assert!(eval.first_violation().is_none());
    }
}
