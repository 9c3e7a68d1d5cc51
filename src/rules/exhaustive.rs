//! Exhaustive reference rules.
//!
//! These enumerate all `m!` candidate permutations and are only tractable
//! for small `m`. They exist to validate the sequential heuristics: exact
//! optima for the Borda-PAV and score objectives, and the justified-demand
//! feasibility/optimum searches.

use super::{RankingRule, RuleState};
use crate::error::RankingError;
use crate::profile::ApprovalProfile;
use crate::quality::{justify, quality};
use crate::ranking::Ranking;
use crate::search::Permutations;

/// PAV-discounted score of `order` under per-position values `vector`.
///
/// Each voter contributes `vector[i] / d` for their `d`-th approved
/// candidate at position `i`.
fn discounted_score(profile: &ApprovalProfile, order: &[usize], vector: &[f64]) -> f64 {
    (0..profile.voters())
        .map(|v| {
            let mut score = 0.0;
            let mut div = 1.0;
            for (i, &cand) in order.iter().enumerate() {
                if profile.approves(v, cand) {
                    score += vector[i] / div;
                    div += 1.0;
                }
            }
            score
        })
        .sum()
}

fn borda_vector(m: usize) -> Vec<f64> {
    (0..m).rev().map(|x| x as f64).collect()
}

/// Exhaustive maximizer of the Borda-PAV score.
#[derive(Debug, Default)]
pub struct BordaPav {
    state: RuleState,
}

impl BordaPav {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RankingRule for BordaPav {
    fn name(&self) -> &str {
        "bordaPAV"
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        let m = profile.candidates();
        let vector = borda_vector(m);
        let mut best: Option<(Vec<usize>, f64)> = None;
        for order in Permutations::new(m) {
            let score = discounted_score(profile, &order, &vector);
            match &best {
                Some((_, best_score)) if score <= *best_score => {}
                _ => best = Some((order, score)),
            }
        }
        let (order, _) = best.ok_or(RankingError::EmptyProfile)?;
        Ok(Ranking::new(order))
    }
}

/// Exhaustive maximizer of a custom score vector (Borda by default).
#[derive(Debug, Default)]
pub struct ScorePav {
    scoring_vector: Option<Vec<f64>>,
    state: RuleState,
}

impl ScorePav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scoring_vector(mut self, vector: Vec<f64>) -> Self {
        self.scoring_vector = Some(vector);
        self
    }
}

impl RankingRule for ScorePav {
    fn name(&self) -> &str {
        "scorePAV"
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        let m = profile.candidates();
        let mut vector = self
            .scoring_vector
            .clone()
            .unwrap_or_else(|| borda_vector(m));
        // Short custom vectors score the remaining positions as zero.
        vector.resize(vector.len().max(m), 0.0);
        let mut best: Option<(Vec<usize>, f64)> = None;
        for order in Permutations::new(m) {
            let score = discounted_score(profile, &order, &vector);
            match &best {
                Some((_, best_score)) if score <= *best_score => {}
                _ => best = Some((order, score)),
            }
        }
        let (order, _) = best.ok_or(RankingError::EmptyProfile)?;
        Ok(Ranking::new(order))
    }
}

/// Returns the first permutation (lexicographic order) meeting every
/// justified demand, or [`RankingError::NoJustifiedRanking`] when no
/// permutation does — an expected outcome for some profiles.
///
/// # Examples
///
/// ```
/// use prop_ranking::rules::{JustifiedRanking, RankingRule};
///
/// let mut rule = JustifiedRanking::new();
/// rule.set_profile(&[
///     vec![1, 0, 1, 0, 0],
///     vec![0, 1, 1, 1, 1],
///     vec![0, 1, 1, 0, 0],
/// ]).unwrap();
/// assert_eq!(rule.render_ranking().unwrap(), "c > a > b > d > e");
/// ```
#[derive(Debug, Default)]
pub struct JustifiedRanking {
    state: RuleState,
}

impl JustifiedRanking {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RankingRule for JustifiedRanking {
    fn name(&self) -> &str {
        "JustifiedRanking"
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        for order in Permutations::new(profile.candidates()) {
            let candidate = Ranking::new(order);
            if justify(profile, &candidate) {
                return Ok(candidate);
            }
        }
        Err(RankingError::NoJustifiedRanking)
    }
}

/// Exhaustive maximizer of ranking quality.
#[derive(Debug, Default)]
pub struct MaximizeQuality {
    state: RuleState,
}

impl MaximizeQuality {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RankingRule for MaximizeQuality {
    fn name(&self) -> &str {
        "MaxQuality"
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        let mut best: Option<(Vec<usize>, f64)> = None;
        for order in Permutations::new(profile.candidates()) {
            let q = quality(profile, &Ranking::new(order.clone()));
            match &best {
                Some((_, best_q)) if q <= *best_q => {}
                _ => best = Some((order, q)),
            }
        }
        let (order, _) = best.ok_or(RankingError::EmptyProfile)?;
        Ok(Ranking::new(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_abc() -> Vec<Vec<u8>> {
        vec![
            vec![1, 0, 1, 0, 0],
            vec![0, 1, 1, 1, 1],
            vec![0, 1, 1, 0, 0],
        ]
    }

    #[test]
    fn test_justified_ranking_example() {
        let mut rule = JustifiedRanking::new();
        rule.set_profile(&profile_abc()).unwrap();
        assert_eq!(rule.render_ranking().unwrap(), "c > a > b > d > e");
        assert!(rule.justifiable().unwrap());
        assert!(rule.quality().unwrap() >= 1.0);
    }

    #[test]
    fn test_maximize_quality_example() {
        let mut rule = MaximizeQuality::new();
        rule.set_profile(&profile_abc()).unwrap();
        assert_eq!(rule.render_ranking().unwrap(), "c > a > b > d > e");
    }

    #[test]
    fn test_borda_pav_matches_default_score_pav() {
        // scorePAV's default vector is exactly the Borda vector.
        let mut borda = BordaPav::new();
        let mut score = ScorePav::new();
        borda.set_profile(&profile_abc()).unwrap();
        score.set_profile(&profile_abc()).unwrap();
        assert_eq!(borda.ranking().unwrap(), score.ranking().unwrap());
    }

    #[test]
    fn test_borda_pav_consensus_first() {
        let mut rule = BordaPav::new();
        rule.set_profile(&profile_abc()).unwrap();
        let r = rule.ranking().unwrap();
        assert!(r.is_permutation());
        assert_eq!(r.as_slice()[0], 2);
    }
}
