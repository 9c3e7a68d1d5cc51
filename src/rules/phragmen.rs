//! Phragmén-style load-balancing rules.
//!
//! All four variants keep per-voter loads and pick one candidate per round,
//! comparing scores with a small tolerance so floating-point noise cannot
//! steal a tie from the lowest-index candidate. Only unselected candidates
//! are ever considered, which keeps the permutation invariant intact even on
//! profiles with all-zero columns.

use super::{RankingRule, RuleState, DEFAULT_TIE_TOLERANCE};
use crate::error::RankingError;
use crate::profile::ApprovalProfile;
use crate::ranking::Ranking;

fn phragmen_bound(alpha: f64, lambda: f64) -> u64 {
    (5.0 * lambda / alpha.powi(2) + 1.0 / alpha).ceil() as u64
}

/// Minmax Phragmén: each round selects the candidate minimizing the maximal
/// load its supporters would carry, `(1 + sum of supporter loads) / score`,
/// and sets every supporter's load to that value.
#[derive(Debug)]
pub struct PhragmenMinmax {
    tolerance: f64,
    state: RuleState,
}

impl PhragmenMinmax {
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

impl Default for PhragmenMinmax {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingRule for PhragmenMinmax {
    fn name(&self) -> &str {
        "PhragmenMinmax"
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        let (n, m) = (profile.voters(), profile.candidates());
        let mut load = vec![0.0f64; n];
        let mut selected = vec![false; m];
        let mut ranking = Vec::with_capacity(m);

        for _ in 0..m {
            let mut winner = usize::MAX;
            let mut min_score = f64::INFINITY;
            let mut found = false;
            for c in (0..m).filter(|&c| !selected[c]) {
                let approvers = profile.approvers(c);
                let score = if approvers.is_empty() {
                    f64::INFINITY
                } else {
                    let carried: f64 = approvers.iter().map(|&v| load[v]).sum();
                    (1.0 + carried) / approvers.len() as f64
                };
                if !found || min_score - score > self.tolerance {
                    winner = c;
                    min_score = score;
                    found = true;
                }
            }
            selected[winner] = true;
            ranking.push(winner);
            for v in profile.approvers(winner) {
                load[v] = min_score;
            }
        }

        Ok(Ranking::new(ranking))
    }

    fn representation(&self, alpha: f64, lambda: f64) -> Result<u64, RankingError> {
        Ok(phragmen_bound(alpha, lambda))
    }
}

/// Classic Phragmén: multiplicative decay. Loads start at 1; each round the
/// winner's supporters keep the fraction `1 - quota/score` of their load,
/// where the quota is `n / (round + 2)`.
#[derive(Debug)]
pub struct PhragmenClassic {
    tolerance: f64,
    state: RuleState,
}

impl PhragmenClassic {
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

impl Default for PhragmenClassic {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingRule for PhragmenClassic {
    fn name(&self) -> &str {
        "PhragmenClassic"
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        let (n, m) = (profile.voters(), profile.candidates());
        let mut load = vec![1.0f64; n];
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
                    .map(|&v| load[v].max(0.0))
                    .sum();
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
                if quota > total {
                    load[v] = 0.0;
                } else {
                    load[v] *= 1.0 - quota / total;
                }
            }
        }

        Ok(Ranking::new(ranking))
    }
}

/// Depile Phragmén: like [`PhragmenClassic`] but loads are recomputed every
/// round from the full history of winner scores each voter has supported,
/// against the *current* quota.
#[derive(Debug)]
pub struct PhragmenDepile {
    tolerance: f64,
    state: RuleState,
}

impl PhragmenDepile {
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

impl Default for PhragmenDepile {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingRule for PhragmenDepile {
    fn name(&self) -> &str {
        "PhragmenDepile"
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        let (n, m) = (profile.voters(), profile.candidates());
        // Winner approval scores each voter has paid into, in selection order.
        let mut history: Vec<Vec<f64>> = vec![Vec::new(); n];
        let mut selected = vec![false; m];
        let mut ranking = Vec::with_capacity(m);

        for round in 0..m {
            let quota = n as f64 / (round + 2) as f64;
            let load: Vec<f64> = history
                .iter()
                .map(|paid| {
                    paid.iter().fold(1.0f64, |acc, &total| {
                        if quota > total {
                            0.0
                        } else {
                            acc * (1.0 - quota / total)
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

/// Sequential Phragmén as described in the Proportional Rankings paper:
/// additive loads, candidate score `(1 + supporter loads) / approval score`,
/// minimized each round. Zero-approval candidates are only picked when no
/// supported candidate remains.
#[derive(Debug)]
pub struct SeqPhragmen {
    tolerance: f64,
    state: RuleState,
}

impl SeqPhragmen {
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

impl Default for SeqPhragmen {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingRule for SeqPhragmen {
    fn name(&self) -> &str {
        "Phragmen"
    }

    fn state(&self) -> &RuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RuleState {
        &mut self.state
    }

    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError> {
        let (n, m) = (profile.voters(), profile.candidates());
        let mut load = vec![0.0f64; n];
        let mut selected = vec![false; m];
        let mut ranking = Vec::with_capacity(m);

        for _ in 0..m {
            let mut winner = usize::MAX;
            let mut min_score = f64::INFINITY;
            for c in (0..m).filter(|&c| !selected[c]) {
                let approvers = profile.approvers(c);
                if approvers.is_empty() {
                    // Fallback only while no supported candidate was found.
                    if min_score.is_infinite() {
                        winner = c;
                    }
                } else {
                    let carried: f64 = approvers.iter().map(|&v| load[v]).sum();
                    let score = (1.0 + carried) / approvers.len() as f64;
                    if min_score - score > self.tolerance {
                        winner = c;
                        min_score = score;
                    }
                }
            }
            selected[winner] = true;
            ranking.push(winner);
            for v in profile.approvers(winner) {
                load[v] = min_score;
            }
        }

        Ok(Ranking::new(ranking))
    }

    fn representation(&self, alpha: f64, lambda: f64) -> Result<u64, RankingError> {
        Ok(phragmen_bound(alpha, lambda))
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
    fn test_minmax_two_groups() {
        let mut rule = PhragmenMinmax::new();
        rule.set_profile(&two_groups()).unwrap();
        // The small group earns its second seat before the large group's
        // third: the load balancing interleaves the blocks.
        assert_eq!(rule.render_ranking().unwrap(), "c > a > d > b > e");
    }

    #[test]
    fn test_classic_two_groups() {
        let mut rule = PhragmenClassic::new();
        rule.set_profile(&two_groups()).unwrap();
        assert_eq!(rule.render_ranking().unwrap(), "c > a > d > b > e");
    }

    #[test]
    fn test_seq_phragmen_two_groups() {
        let mut rule = SeqPhragmen::new();
        rule.set_profile(&two_groups()).unwrap();
        assert_eq!(rule.render_ranking().unwrap(), "c > a > d > b > e");
    }

    #[test]
    fn test_depile_permutation() {
        let mut rule = PhragmenDepile::new();
        rule.set_profile(&two_groups()).unwrap();
        assert!(rule.ranking().unwrap().is_permutation());
    }

    #[test]
    fn test_zero_column_still_permutes() {
        // Candidate b is approved by nobody.
        let rows = vec![vec![1, 0, 1], vec![1, 0, 0], vec![0, 0, 1]];
        for rule in [
            &mut PhragmenMinmax::new() as &mut dyn RankingRule,
            &mut PhragmenClassic::new(),
            &mut PhragmenDepile::new(),
            &mut SeqPhragmen::new(),
        ] {
            rule.bind_profile(crate::profile::ApprovalProfile::from_rows(&rows).unwrap());
            let r = rule.ranking().unwrap();
            assert!(r.is_permutation(), "{}: {:?}", rule.name(), r);
            // The unsupported candidate lands last.
            assert_eq!(r.as_slice()[2], 1, "{}", rule.name());
        }
    }

    #[test]
    fn test_representation_bound() {
        let rule = PhragmenMinmax::new();
        // ceil(5 * 2 / 0.25 + 1 / 0.5) = 42
        assert_eq!(rule.representation(0.5, 2.0).unwrap(), 42);
        let rule = SeqPhragmen::new();
        assert_eq!(rule.representation(0.5, 2.0).unwrap(), 42);
    }
}
