//! Enestrom's rule.

use super::{RankingRule, RuleState, DEFAULT_TIE_TOLERANCE};
use crate::error::RankingError;
use crate::profile::ApprovalProfile;
use crate::ranking::Ranking;

/// Enestrom's method (see <https://arxiv.org/pdf/1907.10590.pdf>).
///
/// Depile-style bookkeeping: each voter accumulates the approval scores of
/// the winners they supported, and their remaining load in round `i` is the
/// product of `1 - quota/score` over that history with quota `n / (i + 1)`,
/// clipped to zero once the quota exceeds a historical score.
#[derive(Debug)]
pub struct Enestrom {
    tolerance: f64,
    state: RuleState,
}

impl Enestrom {
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TIE_TOLERANCE,
            state: RuleState::default(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for Enestrom {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingRule for Enestrom {
    fn name(&self) -> &str {
        "Enestrom"
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        let (n, m) = (profile.voters(), profile.candidates());
        let mut history: Vec<Vec<f64>> = vec![Vec::new(); n];
        let mut selected = vec![false; m];
        let mut ranking = Vec::with_capacity(m);

        for round in 1..=m {
            let quota = n as f64 / (round + 1) as f64;
            let load: Vec<f64> = history
                .iter()
                .map(|paid| {
                    paid.iter().fold(1.0f64, |acc, &score| {
                        if quota > score {
                            0.0
                        } else {
                            acc * (1.0 - quota / score)
                        }
                    })
                })
                .collect();

            let mut winner = usize::MAX;
            let mut max_score = f64::NEG_INFINITY;
            let mut found = false;
            for c in (0..m).filter(|&c| !selected[c]) {
                let score: f64 = profile.approvers(c).iter().map(|&v| load[v].max(0.0)).sum();
                if !found || score - max_score > self.tolerance {
                    winner = c;
                    max_score = score;
                    found = true;
                }
            }
            selected[winner] = true;
            ranking.push(winner);

            let total = profile.approval_score(winner) as f64;
            for v in profile.approvers(winner) {
                history[v].push(total);
            }
        }

        Ok(Ranking::new(ranking))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enestrom_two_groups() {
        let mut rows = vec![vec![1, 1, 1, 0, 0]; 5];
        rows.extend(vec![vec![0, 0, 1, 1, 1]; 3]);
        let mut rule = Enestrom::new();
        rule.set_profile(&rows).unwrap();
        assert_eq!(rule.render_ranking().unwrap(), "c > a > b > d > e");
    }

    #[test]
    fn test_enestrom_zero_column() {
        let mut rule = Enestrom::new();
        rule.set_profile(&[vec![1, 0, 1], vec![1, 0, 1]]).unwrap();
        let r = rule.ranking().unwrap();
        assert!(r.is_permutation());
        assert_eq!(r.as_slice()[2], 1);
    }
}
