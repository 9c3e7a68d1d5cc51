//! IRV-style summed-load rules.
//!
//! Both rules discount each candidate's approval score by the quota-scaled
//! load its supporters already carry, then add `1/score` to the winner's
//! supporters. `IrvSum` and `SumLoads` are the same procedure written with
//! different round indexing in the literature; the quota sequence
//! `n/2, n/3, ...` coincides, so they produce identical rankings and are
//! kept as separate named rules only for comparison tables.

use super::{RankingRule, RuleState, DEFAULT_TIE_TOLERANCE};
use crate::error::RankingError;
use crate::profile::ApprovalProfile;
use crate::ranking::Ranking;

fn sum_loads_ranking(
    profile: &ApprovalProfile,
    tolerance: f64,
) -> Result<Ranking, RankingError> {
    let (n, m) = (profile.voters(), profile.candidates());
    let mut load = vec![0.0f64; n];
    let mut selected = vec![false; m];
    let mut ranking = Vec::with_capacity(m);

    for round in 0..m {
        let quota = n as f64 / (round + 2) as f64;
        let mut winner = usize::MAX;
        let mut max_score = f64::NEG_INFINITY;
        let mut found = false;
        for c in (0..m).filter(|&c| !selected[c]) {
            let score: f64 = profile
                .approvers(c)
                .iter()
                .map(|&v| 1.0 - (quota * load[v]).min(1.0))
                .sum();
            if !found || score - max_score > tolerance {
                winner = c;
                max_score = score;
                found = true;
            }
        }
        selected[winner] = true;
        ranking.push(winner);

        let total = profile.approval_score(winner) as f64;
        if total > 0.0 {
            for v in profile.approvers(winner) {
                load[v] += 1.0 / total;
            }
        }
    }

    Ok(Ranking::new(ranking))
}

/// Instant-runoff-flavored sum-of-loads rule with quota `n/(round + 2)`.
#[derive(Debug)]
pub struct IrvSum {
    tolerance: f64,
    state: RuleState,
}

impl IrvSum {
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

impl Default for IrvSum {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingRule for IrvSum {
    fn name(&self) -> &str {
        "IRVSum"
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        sum_loads_ranking(profile, self.tolerance)
    }
}

/// Summed-load rule; see the module docs for its relation to [`IrvSum`].
#[derive(Debug)]
pub struct SumLoads {
    tolerance: f64,
    state: RuleState,
}

impl SumLoads {
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

impl Default for SumLoads {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingRule for SumLoads {
    fn name(&self) -> &str {
        "sumLoads"
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        sum_loads_ranking(profile, self.tolerance)
    }
}
