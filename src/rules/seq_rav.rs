//! Sequential reweighted approval voting (seqRAV / seqPAV / geometric).

use super::{RankingRule, RuleState};
use crate::error::RankingError;
use crate::profile::ApprovalProfile;
use crate::ranking::Ranking;

/// How a voter's weight decays with the number of already-selected
/// candidates they approve.
///
/// Resolved lazily: `weight(k)` is the weight of a voter with `k` approved
/// candidates already in the ranking.
#[derive(Debug, Clone)]
pub enum WeightScheme {
    /// User-supplied weight vector, indexed by `k`, zero past its end.
    Explicit(Vec<f64>),

    /// Harmonic weights `1/(k + 1 + alpha)`. `alpha = 0` is classic seqPAV;
    /// positive alpha favors bigger groups, negative favors smaller ones.
    Harmonic { alpha: f64 },

    /// Geometric weights `1/p^(k+1)`.
    Geometric { p: f64 },

    /// Power-law weights `1/(k+1)^alpha`.
    Power { alpha: f64 },
}

impl WeightScheme {
    pub fn weight(&self, k: usize) -> f64 {
        match self {
            WeightScheme::Explicit(v) => v.get(k).copied().unwrap_or(0.0),
            WeightScheme::Harmonic { alpha } => 1.0 / (k as f64 + 1.0 + alpha),
            WeightScheme::Geometric { p } => 1.0 / p.powi(k as i32 + 1),
            WeightScheme::Power { alpha } => 1.0 / (k as f64 + 1.0).powf(*alpha),
        }
    }
}

/// Sequential reweighted approval voting.
///
/// Each round selects the candidate maximizing the weighted approval score
/// (first-seen maximum, so ties go to the lowest index), then bumps the
/// selection count of every approving voter and removes the candidate.
///
/// # Examples
///
/// ```
/// use prop_ranking::rules::{RankingRule, SeqRav};
///
/// let profile: Vec<Vec<u8>> = std::iter::repeat(vec![1, 1, 1, 0, 0]).take(5)
///     .chain(std::iter::repeat(vec![0, 0, 1, 1, 1]).take(3))
///     .collect();
///
/// let mut pav = SeqRav::pav(0.0);
/// pav.set_profile(&profile).unwrap();
/// assert_eq!(pav.render_ranking().unwrap(), "c > a > b > d > e");
///
/// let mut rav = SeqRav::new(vec![1.0, 0.5, 0.25, 0.125, 0.0625]);
/// rav.set_profile(&profile).unwrap();
/// assert_eq!(rav.render_ranking().unwrap(), "c > a > d > b > e");
/// ```
#[derive(Debug)]
pub struct SeqRav {
    name: String,
    scheme: WeightScheme,
    state: RuleState,
}

impl SeqRav {
    /// seqRAV with an explicit weight vector.
    pub fn new(weights: Vec<f64>) -> Self {
        Self {
            name: "seqRAV".to_string(),
            scheme: WeightScheme::Explicit(weights),
            state: RuleState::default(),
        }
    }

    /// seqPAV: harmonic weights `1/(k + 1 + alpha)`.
    pub fn pav(alpha: f64) -> Self {
        let name = if alpha == 0.0 {
            "seqPAV".to_string()
        } else {
            format!("seqPAV (alpha = {alpha:.2})")
        };
        Self {
            name,
            scheme: WeightScheme::Harmonic { alpha },
            state: RuleState::default(),
        }
    }

    /// Geometric PAV: weights `1/p^(k+1)`.
    pub fn geometric(p: f64) -> Self {
        Self {
            name: format!("Geometric ({p:.2})"),
            scheme: WeightScheme::Geometric { p },
            state: RuleState::default(),
        }
    }

    /// Power-law decay: weights `1/(k+1)^alpha`.
    pub fn power(alpha: f64) -> Self {
        Self {
            name: format!("powerPAV ({alpha:.2})"),
            scheme: WeightScheme::Power { alpha },
            state: RuleState::default(),
        }
    }
}

impl RankingRule for SeqRav {
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
        let mut counts = vec![0usize; n];
        let mut selected = vec![false; m];
        let mut ranking = Vec::with_capacity(m);

        for _ in 0..m {
            let mut best = usize::MAX;
            let mut best_score = f64::NEG_INFINITY;
            for c in (0..m).filter(|&c| !selected[c]) {
                let score: f64 = (0..n)
                    .filter(|&v| profile.approves(v, c))
                    .map(|v| self.scheme.weight(counts[v]))
                    .sum();
                if score > best_score {
                    best = c;
                    best_score = score;
                }
            }
            selected[best] = true;
            ranking.push(best);
            for (v, count) in counts.iter_mut().enumerate() {
                if profile.approves(v, best) {
                    *count += 1;
                }
            }
        }

        Ok(Ranking::new(ranking))
    }

    fn representation(&self, alpha: f64, lambda: f64) -> Result<u64, RankingError> {
        match &self.scheme {
            WeightScheme::Harmonic { alpha: a } if *a == 0.0 => {
                Ok((2.0 * (lambda + 1.0).powi(2) / alpha.powi(2)).ceil() as u64)
            }
            _ => Err(RankingError::RepresentationUnsupported {
                rule: self.name.clone(),
            }),
        }
    }
}
