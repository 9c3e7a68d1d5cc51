//! Random-profile experiments: batch comparison of rules.
//!
//! Thin harness over the core operations: sample Bernoulli approval
//! profiles, run a set of rules on each, and aggregate quality and
//! justifiability statistics.

use crate::error::RankingError;
use crate::profile::ApprovalProfile;
use crate::rules::RankingRule;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Samples an `n x m` profile where each approval is an independent
/// Bernoulli draw with probability `proba`.
pub fn generate_profile<R: Rng>(
    n: usize,
    m: usize,
    proba: f64,
    rng: &mut R,
) -> Result<ApprovalProfile, RankingError> {
    let rows: Vec<Vec<u8>> = (0..n)
        .map(|_| (0..m).map(|_| rng.random_bool(proba) as u8).collect())
        .collect();
    ApprovalProfile::from_rows(&rows)
}

/// Aggregate statistics from [`compare_rules`].
///
/// Entry `i` corresponds to `rules[i]`; the final extra entry is the
/// per-profile best over all rules.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    /// Mean ranking quality per rule.
    pub avg_quality: Vec<f64>,

    /// Fraction of profiles for which the rule's ranking was justifiable.
    pub success_rate: Vec<f64>,
}

/// Runs every rule on `iterations` random profiles and averages quality and
/// justifiability. Profiles with an approval-free voter or candidate are
/// discarded and resampled (each attempt draws a fresh approval
/// probability), matching the usual experimental setup.
pub fn compare_rules(
    n: usize,
    m: usize,
    rules: &mut [Box<dyn RankingRule>],
    iterations: usize,
    seed: u64,
) -> Result<ComparisonReport, RankingError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let count = rules.len();
    let mut avg_quality = vec![0.0f64; count + 1];
    let mut success_rate = vec![0.0f64; count + 1];

    let mut done = 0;
    while done < iterations {
        let proba = rng.random_range(0.0..1.0);
        let profile = generate_profile(n, m, proba, &mut rng)?;
        if (0..m).any(|c| profile.approval_score(c) == 0)
            || (0..n).any(|v| profile.voter_approvals(v) == 0)
        {
            continue;
        }

        let mut best_quality = f64::NEG_INFINITY;
        let mut any_justified = false;
        for (i, rule) in rules.iter_mut().enumerate() {
            rule.bind_profile(profile.clone());
            let quality = rule.quality()?;
            let justified = rule.justifiable()?;
            avg_quality[i] += quality;
            if justified {
                success_rate[i] += 1.0;
            }
            best_quality = best_quality.max(quality);
            any_justified |= justified;
        }
        avg_quality[count] += best_quality;
        if any_justified {
            success_rate[count] += 1.0;
        }
        done += 1;
    }

    for value in avg_quality.iter_mut().chain(success_rate.iter_mut()) {
        *value /= iterations as f64;
    }

    Ok(ComparisonReport {
        avg_quality,
        success_rate,
    })
}
