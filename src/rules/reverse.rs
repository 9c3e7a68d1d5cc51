//! Reverse-built reweighted rules.
//!
//! These build the ranking back-to-front: each round finds the *worst*
//! remaining candidate (minimum weighted marginal contribution, with weights
//! looked up from each voter's count of remaining approved candidates) and
//! appends it to the tail. The built sequence is reversed before returning.
//! Ties go to the highest candidate index while scanning, which after the
//! final reversal matches the forward rules' lowest-index convention.

use super::{RankingRule, RuleState, WeightScheme, DEFAULT_TIE_TOLERANCE};
use crate::error::RankingError;
use crate::profile::ApprovalProfile;
use crate::ranking::Ranking;

/// Weight of a voter with `remaining` approved candidates still unselected,
/// under a zero-prepended scheme: no remaining approvals means no weight.
fn remaining_weight(scheme: &WeightScheme, remaining: usize) -> f64 {
    if remaining == 0 {
        0.0
    } else {
        scheme.weight(remaining - 1)
    }
}

/// Reverse sequential reweighted approval voting.
///
/// # Examples
///
/// ```
/// use prop_ranking::rules::{RankingRule, ReverseSeqRav};
///
/// let profile: Vec<Vec<u8>> = std::iter::repeat(vec![1, 1, 1, 0, 0]).take(5)
///     .chain(std::iter::repeat(vec![0, 0, 1, 1, 1]).take(3))
///     .collect();
///
/// let mut rule = ReverseSeqRav::new(vec![1.0, 0.5, 0.25, 0.125, 0.0625]);
/// rule.set_profile(&profile).unwrap();
/// assert_eq!(rule.render_ranking().unwrap(), "c > a > d > b > e");
/// ```
#[derive(Debug)]
pub struct ReverseSeqRav {
    name: String,
    scheme: WeightScheme,
    state: RuleState,
}

impl ReverseSeqRav {
    /// reverseSeqRAV with an explicit weight vector.
    pub fn new(weights: Vec<f64>) -> Self {
        Self {
            name: "reverseSeqRAV".to_string(),
            scheme: WeightScheme::Explicit(weights),
            state: RuleState::default(),
        }
    }

    /// reverseSeqPAV: harmonic weights `1/(k + 1 + alpha)`.
    pub fn pav(alpha: f64) -> Self {
        let name = if alpha == 0.0 {
            "reverseSeqPAV".to_string()
        } else {
            format!("reverseSeqPAV (alpha = {alpha:.2})")
        };
        Self {
            name,
            scheme: WeightScheme::Harmonic { alpha },
            state: RuleState::default(),
        }
    }
}

impl RankingRule for ReverseSeqRav {
    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        let (n, m) = (profile.voters(), profile.candidates());
        let mut remaining_approvals: Vec<usize> =
            (0..n).map(|v| profile.voter_approvals(v)).collect();
        let mut selected = vec![false; m];
        let mut tail = Vec::with_capacity(m);

        for _ in 0..m {
            let mut worst = usize::MAX;
            let mut min_score = f64::INFINITY;
            for c in (0..m).rev().filter(|&c| !selected[c]) {
                let score: f64 = (0..n)
                    .filter(|&v| profile.approves(v, c))
                    .map(|v| remaining_weight(&self.scheme, remaining_approvals[v]))
                    .sum();
                if score < min_score {
                    worst = c;
                    min_score = score;
                }
            }
            selected[worst] = true;
            tail.push(worst);
            for (v, count) in remaining_approvals.iter_mut().enumerate() {
                if profile.approves(v, worst) {
                    *count -= 1;
                }
            }
        }

        tail.reverse();
        Ok(Ranking::new(tail))
    }
}

/// reversePAV: reverse-built rule weighting each voter by the reciprocal of
/// their remaining approval count (plus `alpha`), clamped at 0.01 to avoid
/// division by zero.
#[derive(Debug)]
pub struct ReversePav {
    name: String,
    alpha: f64,
    tolerance: f64,
    state: RuleState,
}

impl ReversePav {
    pub fn new(alpha: f64) -> Self {
        let name = if alpha == 0.0 {
            "reversePAV".to_string()
        } else {
            format!("reversePAV (alpha = {alpha:.2})")
        };
        Self {
            name,
            alpha,
            tolerance: DEFAULT_TIE_TOLERANCE,
            state: RuleState::default(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl RankingRule for ReversePav {
    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        let (n, m) = (profile.voters(), profile.candidates());
        let mut weights: Vec<f64> = (0..n)
            .map(|v| profile.voter_approvals(v) as f64 + self.alpha)
            .collect();
        let mut selected = vec![false; m];
        let mut tail = Vec::with_capacity(m);

        for _ in 0..m {
            let mut worst = usize::MAX;
            let mut min_score = f64::INFINITY;
            let mut found = false;
            for c in (0..m).rev().filter(|&c| !selected[c]) {
                let score: f64 = (0..n)
                    .filter(|&v| profile.approves(v, c))
                    .map(|v| 1.0 / weights[v].max(0.01))
                    .sum();
                if !found || min_score - score > self.tolerance {
                    worst = c;
                    min_score = score;
                    found = true;
                }
            }
            selected[worst] = true;
            tail.push(worst);
            for (v, w) in weights.iter_mut().enumerate() {
                if profile.approves(v, worst) {
                    *w -= 1.0;
                }
            }
        }

        tail.reverse();
        Ok(Ranking::new(tail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_groups() -> Vec<Vec<u8>> {
        let mut rows = vec![vec![1, 1, 1, 0, 0]; 5];
        rows.extend(vec![vec![0, 0, 1, 1, 1]; 3]);
        rows
    }

    #[test]
    fn test_reverse_seq_rav_example() {
        let mut rule = ReverseSeqRav::new(vec![1.0, 0.5, 0.25, 0.125, 0.0625]);
        rule.set_profile(&two_groups()).unwrap();
        assert_eq!(rule.render_ranking().unwrap(), "c > a > d > b > e");
    }

    #[test]
    fn test_reverse_seq_pav_example() {
        let mut rule = ReverseSeqRav::pav(0.0);
        rule.set_profile(&two_groups()).unwrap();
        assert_eq!(rule.render_ranking().unwrap(), "c > a > b > d > e");
    }

    #[test]
    fn test_reverse_pav_permutation() {
        let mut rule = ReversePav::new(0.0);
        rule.set_profile(&two_groups()).unwrap();
        let r = rule.ranking().unwrap();
        assert!(r.is_permutation());
        // The consensus candidate survives to the front.
        assert_eq!(r.as_slice()[0], 2);
    }

    #[test]
    fn test_reverse_pav_zero_approval_voter() {
        // One voter approves nobody: the 0.01 clamp keeps scores finite.
        let mut rule = ReversePav::new(0.0);
        rule.set_profile(&[vec![0, 0, 0], vec![1, 1, 0], vec![1, 0, 1]])
            .unwrap();
        assert!(rule.ranking().unwrap().is_permutation());
    }
}
