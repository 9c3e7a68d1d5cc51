//! Approval Voting.

use super::{RankingRule, RuleState};
use crate::error::RankingError;
use crate::profile::ApprovalProfile;
use crate::ranking::Ranking;

/// Approval Voting: candidates ordered by descending approval score, ties
/// broken by candidate index (stable sort).
///
/// # Examples
///
/// ```
/// use prop_ranking::rules::{Av, RankingRule};
///
/// let mut rule = Av::new();
/// rule.set_profile(&[
///     vec![1, 0, 1, 0, 0],
///     vec![0, 1, 1, 1, 1],
///     vec![0, 1, 1, 0, 0],
/// ]).unwrap();
/// assert_eq!(rule.render_ranking().unwrap(), "c > b > a > d > e");
/// assert_eq!(rule.representation(0.6, 4.0).unwrap(), 13);
/// ```
#[derive(Debug, Default)]
pub struct Av {
    state: RuleState,
}

impl Av {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RankingRule for Av {
    fn name(&self) -> &str {
        "Approval voting"
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        let mut order: Vec<usize> = (0..profile.candidates()).collect();
        order.sort_by_key(|&c| std::cmp::Reverse(profile.approval_score(c)));
        Ok(Ranking::new(order))
    }

    fn representation(&self, alpha: f64, lambda: f64) -> Result<u64, RankingError> {
        if alpha <= 0.5 {
            return Err(RankingError::InvalidAlpha { alpha });
        }
        Ok((lambda * alpha / (2.0 * alpha - 1.0)).ceil() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_av_example() {
        let mut rule = Av::new();
        rule.set_profile(&[
            vec![1, 0, 1, 0, 0],
            vec![0, 1, 1, 1, 1],
            vec![0, 1, 1, 0, 0],
        ])
        .unwrap();
        assert_eq!(rule.render_ranking().unwrap(), "c > b > a > d > e");
    }

    #[test]
    fn test_av_stable_ties() {
        let mut rule = Av::new();
        // All candidates tied: index order.
        rule.set_profile(&[vec![1, 1, 1]]).unwrap();
        assert_eq!(rule.ranking().unwrap().as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_representation_requires_large_alpha() {
        let rule = Av::new();
        assert_eq!(
            rule.representation(0.5, 3.0).unwrap_err(),
            RankingError::InvalidAlpha { alpha: 0.5 }
        );
        assert_eq!(rule.representation(0.6, 4.0).unwrap(), 13);
    }

    #[test]
    fn test_representation_monotone_in_lambda() {
        let rule = Av::new();
        let mut prev = 0;
        for lambda in 1..20 {
            let bound = rule.representation(0.75, lambda as f64).unwrap();
            assert!(bound >= prev);
            prev = bound;
        }
    }
}
