use std::fmt;

use log::warn;
use lc_kernel::N;

use crate::Run;

/// Value every element of `identity × B` must hold.
pub fn expected(i: usize, j: usize) -> f32 {
    (i * j + 1) as f32
}

/// One element that did not match its closed-form value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch {
    pub factor: usize,
    pub row: usize,
    pub col: usize,
    pub expected: f32,
    pub got: f32,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "factor {}: result[{}][{}] = {} (expected {})",
            self.factor, self.row, self.col, self.got, self.expected
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Verification {
    pub mismatches: Vec<Mismatch>,
    /// Whether all runs produced element-wise identical results.
    pub runs_agree: bool,
}

impl Verification {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty() && self.runs_agree
    }
}

/// Checks every element of every run before reporting.
pub fn verify(runs: &[Run]) -> Verification {
    let mut mismatches = Vec::new();
    for run in runs {
        for i in 0..N {
            for j in 0..N {
                let got = run.result.get(i, j);
                if got != expected(i, j) {
                    let m = Mismatch {
                        factor: run.factor,
                        row: i,
                        col: j,
                        expected: expected(i, j),
                        got,
                    };
                    warn!("{}", m);
                    mismatches.push(m);
                }
            }
        }
    }

    let runs_agree = runs
        .windows(2)
        .all(|pair| pair[0].result == pair[1].result);
    if !runs_agree {
        warn!("coalesced and uncoalesced runs disagree");
    }

    Verification {
        mismatches,
        runs_agree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_kernel::{KernelReport, Matrix, PhaseStats, Phase};

    fn run_with(factor: usize, result: Matrix) -> Run {
        let stats = |phase| PhaseStats {
            phase,
            iterations: 0,
            control_steps: 0,
        };
        Run {
            factor,
            result,
            report: KernelReport {
                factor,
                phases: [stats(Phase::Load), stats(Phase::Multiply), stats(Phase::Store)],
            },
            duration: None,
        }
    }

    #[test]
    fn test_expected_pattern() {
        let row3: Vec<f32> = (0..N).map(|j| expected(3, j)).collect();
        assert_eq!(row3, vec![1.0, 4.0, 7.0, 10.0]);
    }

    #[test]
    fn test_verify_passes() {
        let good = Matrix::from_fn(expected);
        let v = verify(&[run_with(1, good.clone()), run_with(2, good)]);
        assert!(v.passed());
        assert!(v.mismatches.is_empty());
    }

    #[test]
    fn test_verify_reports_every_position() {
        let good = Matrix::from_fn(expected);
        let bad = Matrix::from_fn(|i, j| if i == j { 0.0 } else { expected(i, j) });
        let v = verify(&[run_with(1, good), run_with(2, bad)]);

        assert!(!v.passed());
        assert!(!v.runs_agree);
        assert_eq!(v.mismatches.len(), N);
        assert!(v.mismatches.iter().all(|m| m.factor == 2 && m.row == m.col));
        assert_eq!(
            v.mismatches[3].to_string(),
            "factor 2: result[3][3] = 0 (expected 10)"
        );
    }

    #[test]
    fn test_unwritten_output_fails() {
        let unwritten = Matrix::from_fn(|_, _| f32::NAN);
        let v = verify(&[run_with(1, unwritten)]);
        assert_eq!(v.mismatches.len(), N * N);
    }
}
