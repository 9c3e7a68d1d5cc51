//! Sequential Rule X.

use super::{RankingRule, RuleState};
use crate::error::RankingError;
use crate::profile::ApprovalProfile;
use crate::ranking::Ranking;
use num::rational::BigRational;
use num::traits::{One, Zero};
use num::BigInt;

/// Minimal per-supporter price `q` at which `cand` can be purchased, via
/// water-filling: voters whose budget cannot cover an equal share pay
/// everything they have, and the rest split the remainder evenly.
///
/// Returns `None` when the supporters' combined budget is insufficient.
fn min_q(
    profile: &ApprovalProfile,
    budgets: &[BigRational],
    cand: usize,
) -> Option<BigRational> {
    let mut rich = profile.approvers(cand);
    let mut poor: Vec<usize> = Vec::new();

    while !rich.is_empty() {
        let poor_budget = poor
            .iter()
            .fold(BigRational::zero(), |acc, &v| acc + &budgets[v]);
        let q = (BigRational::one() - poor_budget)
            / BigRational::from_integer(BigInt::from(rich.len() as u64));
        let (new_poor, still_rich): (Vec<usize>, Vec<usize>) =
            rich.iter().copied().partition(|&v| budgets[v] < q);
        if new_poor.is_empty() {
            return Some(q);
        }
        rich = still_rich;
        poor.extend(new_poor);
    }

    None
}

/// Sequential version of Rule X.
///
/// Every round adds a fixed increment (default `1/n`) to each voter's
/// budget, then repeatedly purchases the cheapest affordable candidate,
/// deducting `min(budget, q)` from each of its supporters, until nothing is
/// affordable. Budgets are exact rationals: the rich/poor partitioning and
/// the equality tests in the water-filling step must not depend on float
/// rounding.
#[derive(Debug)]
pub struct SeqX {
    name: String,
    increment: Option<BigRational>,
    state: RuleState,
}

impl SeqX {
    /// Rule X sequence with the default `1/n` budget increment.
    pub fn new() -> Self {
        Self {
            name: "seqX".to_string(),
            increment: None,
            state: RuleState::default(),
        }
    }

    /// Overrides the per-round budget increment. Non-positive values fall
    /// back to the `1/n` default.
    pub fn with_increment(mut self, increment: BigRational) -> Self {
        if increment > BigRational::zero() {
            self.name = format!("seqX with {increment}");
            self.increment = Some(increment);
        } else {
            self.name = "seqX".to_string();
            self.increment = None;
        }
        self
    }
}

impl Default for SeqX {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingRule for SeqX {
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
        let increase = self
            .increment
            .clone()
            .unwrap_or_else(|| BigRational::new(BigInt::one(), BigInt::from(n as u64)));
        let mut budgets = vec![BigRational::zero(); n];
        let mut selected = vec![false; m];
        let mut ranking = Vec::with_capacity(m);

        while ranking.len() < m {
            // Candidates nobody approves can never be purchased; once only
            // those remain, append them in index order.
            if (0..m)
                .filter(|&c| !selected[c])
                .all(|c| profile.approval_score(c) == 0)
            {
                ranking.extend((0..m).filter(|&c| !selected[c]));
                break;
            }

            for budget in budgets.iter_mut() {
                *budget += increase.clone();
            }

            // Buy every candidate affordable at the current budget level.
            loop {
                let mut cheapest: Option<(usize, BigRational)> = None;
                for c in (0..m).filter(|&c| !selected[c]) {
                    if let Some(q) = min_q(profile, &budgets, c) {
                        match &cheapest {
                            Some((_, best_q)) if q >= *best_q => {}
                            _ => cheapest = Some((c, q)),
                        }
                    }
                }
                let Some((winner, q)) = cheapest else {
                    break;
                };
                for v in profile.approvers(winner) {
                    let pay = budgets[v].clone().min(q.clone());
                    budgets[v] -= pay;
                }
                selected[winner] = true;
                ranking.push(winner);
                if ranking.len() == m {
                    break;
                }
            }
        }

        Ok(Ranking::new(ranking))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_x_two_groups() {
        let mut rows = vec![vec![1, 1, 1, 0, 0]; 5];
        rows.extend(vec![vec![0, 0, 1, 1, 1]; 3]);
        let mut rule = SeqX::new();
        rule.set_profile(&rows).unwrap();
        assert_eq!(rule.render_ranking().unwrap(), "c > a > d > b > e");
    }

    #[test]
    fn test_seq_x_zero_column() {
        let mut rule = SeqX::new();
        rule.set_profile(&[vec![1, 0], vec![1, 0]]).unwrap();
        assert_eq!(rule.ranking().unwrap().as_slice(), &[0, 1]);
    }

    #[test]
    fn test_min_q_insufficient_budget() {
        let profile = ApprovalProfile::from_rows(&[vec![1], vec![1]]).unwrap();
        let budgets = vec![BigRational::zero(), BigRational::zero()];
        assert_eq!(min_q(&profile, &budgets, 0), None);
    }

    #[test]
    fn test_min_q_water_filling() {
        // One poor supporter pays its whole budget; the other covers the rest.
        let profile = ApprovalProfile::from_rows(&[vec![1], vec![1]]).unwrap();
        let budgets = vec![
            BigRational::new(BigInt::from(1), BigInt::from(10)),
            BigRational::new(BigInt::from(2), BigInt::from(1)),
        ];
        let q = min_q(&profile, &budgets, 0).unwrap();
        assert_eq!(q, BigRational::new(BigInt::from(9), BigInt::from(10)));
    }

    #[test]
    fn test_nonpositive_increment_falls_back() {
        let rule = SeqX::new().with_increment(BigRational::from_integer(BigInt::from(-1)));
        assert_eq!(rule.name(), "seqX");
    }
}
