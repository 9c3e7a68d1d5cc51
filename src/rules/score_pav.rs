//! Sequential score-vector PAV.

use super::{RankingRule, RuleState};
use crate::error::RankingError;
use crate::profile::ApprovalProfile;
use crate::ranking::Ranking;

/// Position score vector for [`SeqScorePav`], resolved against the number of
/// candidates at compute time.
#[derive(Debug, Clone)]
pub enum ScoreVec {
    /// The same score at every position.
    Constant(f64),

    /// Explicit per-position scores, zero-padded when shorter than `m`.
    Explicit(Vec<f64>),

    /// Borda scores `(m-1, m-2, ..., 0)`.
    Borda,
}

impl ScoreVec {
    fn resolve(&self, m: usize) -> Vec<f64> {
        match self {
            ScoreVec::Constant(x) => vec![*x; m],
            ScoreVec::Explicit(v) => {
                let mut scores = v.clone();
                scores.resize(scores.len().max(m), 0.0);
                scores
            }
            ScoreVec::Borda => (0..m).rev().map(|x| x as f64).collect(),
        }
    }

    fn label(&self) -> String {
        match self {
            ScoreVec::Constant(x) => format!("{x}"),
            ScoreVec::Explicit(v) => format!("{v:?}"),
            ScoreVec::Borda => "borda".to_string(),
        }
    }
}

/// Sequential score-based PAV: each round appends the candidate whose
/// addition to the partial ranking yields the largest marginal increase in
/// total voter utility, where a voter's utility for a ranking is the sum of
/// `scorevec[position] / k` over their approved candidates (`k` counting
/// approved candidates seen so far).
///
/// With a constant score vector of 1 this is exactly sequential PAV.
#[derive(Debug)]
pub struct SeqScorePav {
    name: String,
    scorevec: ScoreVec,
    state: RuleState,
}

impl SeqScorePav {
    pub fn new(scorevec: ScoreVec) -> Self {
        Self {
            name: format!("seqScorePAV with {}", scorevec.label()),
            scorevec,
            state: RuleState::default(),
        }
    }

    pub fn with_scorevec(mut self, scorevec: ScoreVec) -> Self {
        self.name = format!("seqScorePAV with {}", scorevec.label());
        self.scorevec = scorevec;
        self
    }
}

impl Default for SeqScorePav {
    fn default() -> Self {
        Self::new(ScoreVec::Constant(1.0))
    }
}

/// Total utility all voters obtain from the partial ranking `order`.
fn overall_utility(profile: &ApprovalProfile, order: &[usize], scores: &[f64]) -> f64 {
    (0..profile.voters())
        .map(|v| {
            let mut utility = 0.0;
            let mut k = 0usize;
            for (position, &cand) in order.iter().enumerate() {
                if profile.approves(v, cand) {
                    k += 1;
                    utility += scores[position] / k as f64;
                }
            }
            utility
        })
        .sum()
}

impl RankingRule for SeqScorePav {
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
        let m = profile.candidates();
        let scores = self.scorevec.resolve(m);
        let mut ranking: Vec<usize> = Vec::with_capacity(m);

        for _ in 0..m {
            let base = overall_utility(profile, &ranking, &scores);
            let mut best = usize::MAX;
            let mut best_gain = f64::NEG_INFINITY;
            let remaining: Vec<usize> = (0..m).filter(|c| !ranking.contains(c)).collect();
            for c in remaining {
                ranking.push(c);
                let gain = overall_utility(profile, &ranking, &scores) - base;
                ranking.pop();
                if gain > best_gain {
                    best = c;
                    best_gain = gain;
                }
            }
            ranking.push(best);
        }

        Ok(Ranking::new(ranking))
    }
}
