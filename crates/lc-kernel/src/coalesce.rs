//! Loop coalescing as an explicit index mapping.
//!
//! A nest of `D` loops with bounds `[B0, .., B(D-1)]` (outermost first) is
//! equivalent to a single loop over `0..B0*..*B(D-1)` whose counter is split
//! back into per-level indices with division and modulo. Coalescing the outer
//! `k` levels replaces `k` loop counters with one, so the loop-control logic
//! makes one decision per merged iteration instead of one per level.

use std::ops::Range;

use crate::error::{KernelError, Result};

/// Linear iteration range covering every point of a nest with the given
/// per-level bounds.
pub fn linearize(bounds: &[usize]) -> Range<usize> {
    0..bounds.iter().product()
}

/// Recovers the per-level indices of linear counter `c`, outermost first.
///
/// Level `i` receives `(c / (B(i+1) * .. * B(D-1))) % Bi`, so walking `c` over
/// [`linearize`] reproduces the row-major visit order of the original nest.
///
/// # Panics
/// Panics if a bound is zero. `c` must lie inside `linearize(bounds)`.
pub fn delinearize<const D: usize>(c: usize, bounds: &[usize; D]) -> [usize; D] {
    let mut indices = [0usize; D];
    delinearize_into(c, bounds, &mut indices);
    indices
}

fn delinearize_into(c: usize, bounds: &[usize], indices: &mut [usize]) {
    debug_assert!(
        linearize(bounds).contains(&c),
        "linear index {} outside iteration space {:?}",
        c,
        bounds
    );
    let mut rest = c;
    for level in (0..bounds.len()).rev() {
        indices[level] = rest % bounds[level];
        rest /= bounds[level];
    }
}

/// A perfectly nested loop described by its bounds, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopNest<const D: usize> {
    bounds: [usize; D],
}

impl<const D: usize> LoopNest<D> {
    pub const fn new(bounds: [usize; D]) -> Self {
        LoopNest { bounds }
    }

    pub fn bounds(&self) -> &[usize; D] {
        &self.bounds
    }

    /// Number of nesting levels.
    pub fn depth(&self) -> usize {
        D
    }

    /// Number of times the innermost body runs.
    pub fn trip_count(&self) -> usize {
        self.bounds.iter().product()
    }

    fn check_factor(&self, factor: usize) -> Result<()> {
        if factor == 0 || factor > D {
            return Err(KernelError::InvalidFactor { factor, depth: D });
        }
        Ok(())
    }

    /// Iterates the nest with its outer `factor` levels merged into one
    /// counter. A factor of 1 leaves the nest unchanged.
    ///
    /// # Errors
    /// Returns [`KernelError::InvalidFactor`] unless `1 <= factor <= D`.
    pub fn coalesce(&self, factor: usize) -> Result<Coalesced<D>> {
        self.check_factor(factor)?;
        Ok(Coalesced::new(self.bounds, factor))
    }

    /// Loop-control decisions needed to run the nest coalesced by `factor`:
    /// one per iteration of the merged counter plus one per iteration of
    /// every level left below it.
    ///
    /// # Errors
    /// Returns [`KernelError::InvalidFactor`] unless `1 <= factor <= D`.
    pub fn control_steps(&self, factor: usize) -> Result<usize> {
        self.check_factor(factor)?;
        let merged: usize = self.bounds[..factor].iter().product();
        let mut steps = merged;
        let mut reached = merged;
        for &bound in &self.bounds[factor..] {
            reached *= bound;
            steps += reached;
        }
        Ok(steps)
    }
}

/// Row-major iterator over a [`LoopNest`] whose outer levels share a single
/// linear counter. Levels below the merged ones advance odometer-style.
#[derive(Debug, Clone)]
pub struct Coalesced<const D: usize> {
    bounds: [usize; D],
    factor: usize,
    merged: Range<usize>,
    indices: [usize; D],
    walking_inner: bool,
    steps: usize,
}

impl<const D: usize> Coalesced<D> {
    fn new(bounds: [usize; D], factor: usize) -> Self {
        let merged = if bounds[factor..].contains(&0) {
            0..0
        } else {
            linearize(&bounds[..factor])
        };
        Coalesced {
            bounds,
            factor,
            merged,
            indices: [0; D],
            walking_inner: false,
            steps: 0,
        }
    }

    pub fn factor(&self) -> usize {
        self.factor
    }

    /// Loop-control decisions taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl<const D: usize> Iterator for Coalesced<D> {
    type Item = [usize; D];

    fn next(&mut self) -> Option<[usize; D]> {
        if self.walking_inner {
            let mut restarted = 0;
            for level in (self.factor..D).rev() {
                self.indices[level] += 1;
                if self.indices[level] < self.bounds[level] {
                    // Every level that wrapped to zero begins a new iteration too.
                    self.steps += 1 + restarted;
                    return Some(self.indices);
                }
                self.indices[level] = 0;
                restarted += 1;
            }
            self.walking_inner = false;
        }

        let c = self.merged.next()?;
        delinearize_into(c, &self.bounds[..self.factor], &mut self.indices[..self.factor]);
        self.steps += 1 + (D - self.factor);
        self.walking_inner = true;
        Some(self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nested_pairs(rows: usize, cols: usize) -> Vec<[usize; 2]> {
        let mut pairs = Vec::new();
        for i in 0..rows {
            for j in 0..cols {
                pairs.push([i, j]);
            }
        }
        pairs
    }

    #[test]
    fn test_linearize() {
        assert_eq!(linearize(&[4, 4]), 0..16);
        assert_eq!(linearize(&[2, 3, 5]), 0..30);
        assert_eq!(linearize(&[3, 0]), 0..0);
        assert_eq!(linearize(&[]), 0..1);
    }

    #[test]
    fn test_delinearize_matches_double_loop() {
        let bounds = [4, 4];
        let expected = nested_pairs(4, 4);
        for c in linearize(&bounds) {
            assert_eq!(delinearize(c, &bounds), expected[c]);
            assert_eq!(delinearize(c, &bounds), [c / 4, c % 4]);
        }
    }

    #[test]
    fn test_delinearize_three_levels() {
        let bounds = [2, 3, 4];
        assert_eq!(delinearize(0, &bounds), [0, 0, 0]);
        assert_eq!(delinearize(5, &bounds), [0, 1, 1]);
        assert_eq!(delinearize(12, &bounds), [1, 0, 0]);
        assert_eq!(delinearize(23, &bounds), [1, 2, 3]);
    }

    #[test]
    fn test_coalesced_visits_row_major_once() {
        let nest = LoopNest::new([4, 4]);
        let expected = nested_pairs(4, 4);
        for factor in 1..=2 {
            let visited: Vec<_> = nest.coalesce(factor).unwrap().collect();
            assert_eq!(visited, expected, "factor {}", factor);
        }
    }

    #[test]
    fn test_coalesced_partial_merge_of_deep_nest() {
        let nest = LoopNest::new([2, 3, 4]);
        let baseline: Vec<_> = nest.coalesce(1).unwrap().collect();
        assert_eq!(baseline.len(), 24);
        assert_eq!(baseline[0], [0, 0, 0]);
        assert_eq!(baseline[23], [1, 2, 3]);
        for factor in 2..=3 {
            let visited: Vec<_> = nest.coalesce(factor).unwrap().collect();
            assert_eq!(visited, baseline, "factor {}", factor);
        }
    }

    #[test]
    fn test_control_steps_4x4() {
        let nest = LoopNest::new([4, 4]);
        assert_eq!(nest.control_steps(1).unwrap(), 20);
        assert_eq!(nest.control_steps(2).unwrap(), 16);
    }

    #[test]
    fn test_iterator_steps_match_closed_form() {
        let nest = LoopNest::new([2, 3, 4]);
        for factor in 1..=3 {
            let mut points = nest.coalesce(factor).unwrap();
            points.by_ref().for_each(drop);
            assert_eq!(points.steps(), nest.control_steps(factor).unwrap());
        }
        assert_eq!(nest.control_steps(1).unwrap(), 32);
        assert_eq!(nest.control_steps(3).unwrap(), 24);
    }

    #[test]
    fn test_invalid_factor() {
        let nest = LoopNest::new([4, 4]);
        assert_eq!(
            nest.coalesce(0).unwrap_err(),
            KernelError::InvalidFactor { factor: 0, depth: 2 }
        );
        assert!(nest.coalesce(3).is_err());
        assert!(nest.control_steps(3).is_err());
    }

    #[test]
    fn test_empty_inner_level() {
        let nest = LoopNest::new([3, 0]);
        assert_eq!(nest.trip_count(), 0);
        assert_eq!(nest.coalesce(1).unwrap().count(), 0);
        assert_eq!(nest.coalesce(2).unwrap().count(), 0);
    }

    proptest! {
        #[test]
        fn prop_coalescing_preserves_order(
            bounds in prop::array::uniform3(1usize..6),
            factor in 1usize..=3,
        ) {
            let nest = LoopNest::new(bounds);
            let baseline: Vec<_> = nest.coalesce(1).unwrap().collect();
            let merged: Vec<_> = nest.coalesce(factor).unwrap().collect();
            prop_assert_eq!(baseline.len(), nest.trip_count());
            prop_assert_eq!(merged, baseline);
        }

        #[test]
        fn prop_delinearize_inverts_row_major_offset(
            bounds in prop::array::uniform3(1usize..8),
            seed in any::<usize>(),
        ) {
            let c = seed % nest_size(&bounds);
            let [i, j, k] = delinearize(c, &bounds);
            prop_assert_eq!((i * bounds[1] + j) * bounds[2] + k, c);
        }
    }

    fn nest_size(bounds: &[usize]) -> usize {
        linearize(bounds).end
    }
}
