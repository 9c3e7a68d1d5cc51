//! Justified-demand quality evaluation.
//!
//! A subset of voters with enough mass (at least `ceil(n/k)` voters for
//! prefix length `k`) is *owed* a proportional number of its commonly
//! approved candidates among the first `k` positions of a ranking. The
//! [`quality`] of a ranking is the worst ratio, over every prefix length and
//! every voter subset, of the subset's average satisfaction to its justified
//! demand; a quality of at least 1 means the ranking honors every claim.
//!
//! Both searches are exponential in the number of voters (they enumerate
//! voter subsets). [`justify`] is the early-exit feasibility variant used by
//! the exhaustive rules; [`quality`] performs the full minimization and, with
//! the `parallel` feature, fans the prefix lengths out across rayon workers.

use crate::profile::ApprovalProfile;
use crate::ranking::Ranking;
use crate::search::Combinations;

/// Mean number of committee members approved per voter in `voters`.
pub fn avg_satisfaction(profile: &ApprovalProfile, voters: &[usize], committee: &[usize]) -> f64 {
    let total: usize = voters
        .iter()
        .map(|&v| committee.iter().filter(|&&c| profile.approves(v, c)).count())
        .sum();
    total as f64 / voters.len() as f64
}

/// Justified demand of `voters` for the first `k` ranking positions.
///
/// Returns `(demand, needed)`: `demand` is
/// `min(floor(|voters| * k / n), consensus)` where `consensus` counts the
/// candidates unanimously approved within the subset; `needed` is whether the
/// proportional share has not yet outgrown the consensus, i.e. whether larger
/// `k` can still raise this subset's demand.
pub fn justified_demand(
    profile: &ApprovalProfile,
    voters: &[usize],
    k: usize,
) -> (usize, bool) {
    let n = profile.voters();
    let proportion = voters.len() * k / n;
    let consensus = (0..profile.candidates())
        .filter(|&c| voters.iter().all(|&v| profile.approves(v, c)))
        .count();
    (proportion.min(consensus), proportion <= consensus)
}

/// Worst satisfaction/demand ratio over all subsets for one prefix length.
fn prefix_min_ratio(profile: &ApprovalProfile, ranking: &Ranking, k: usize) -> f64 {
    let n = profile.voters();
    let committee = ranking.prefix(k);
    let mut min_ratio = f64::INFINITY;
    for size in n.div_ceil(k)..=n {
        for subset in Combinations::new(n, size) {
            let (demand, needed) = justified_demand(profile, &subset, k);
            if demand > 0 && needed {
                let ratio = avg_satisfaction(profile, &subset, committee) / demand as f64;
                min_ratio = min_ratio.min(ratio);
            }
        }
    }
    min_ratio
}

/// Worst-case proportionality ratio of `ranking` over every prefix length
/// and every voter subset of sufficient size.
///
/// Returns `f64::INFINITY` when no subset ever triggers a nonzero, needed
/// demand. A result of at least 1 means every justified demand is met.
pub fn quality(profile: &ApprovalProfile, ranking: &Ranking) -> f64 {
    let m = ranking.len();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (1..=m)
            .into_par_iter()
            .map(|k| prefix_min_ratio(profile, ranking, k))
            .reduce(|| f64::INFINITY, f64::min)
    }

    #[cfg(not(feature = "parallel"))]
    {
        (1..=m)
            .map(|k| prefix_min_ratio(profile, ranking, k))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Whether `ranking` meets every justified demand (quality of at least 1).
///
/// Same search space as [`quality`] but restricted to the threshold ladder of
/// subset sizes `ceil(j * n / k)` for `j = 1, 2, ...`, and short-circuiting
/// on the first violated demand.
pub fn justify(profile: &ApprovalProfile, ranking: &Ranking) -> bool {
    let n = profile.voters();
    let m = ranking.len();
    for k in 1..=m {
        let committee = ranking.prefix(k);
        let mut j = 1;
        let mut last_size = 0;
        loop {
            let size = (j * n).div_ceil(k);
            if size > n {
                break;
            }
            if size != last_size {
                for subset in Combinations::new(n, size) {
                    let (demand, needed) = justified_demand(profile, &subset, k);
                    if demand > 0
                        && needed
                        && avg_satisfaction(profile, &subset, committee) < demand as f64
                    {
                        return false;
                    }
                }
                last_size = size;
            }
            j += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_abc() -> ApprovalProfile {
        ApprovalProfile::from_rows(&[
            vec![1, 0, 1, 0, 0],
            vec![0, 1, 1, 1, 1],
            vec![0, 1, 1, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_justified_demand() {
        let p = profile_abc();
        // Voters 1 and 2 jointly approve b and c.
        let (demand, needed) = justified_demand(&p, &[1, 2], 2);
        assert_eq!(demand, 1);
        assert!(needed);
        // A single voter at k = 1 has zero proportional share.
        let (demand, needed) = justified_demand(&p, &[0], 1);
        assert_eq!(demand, 0);
        assert!(needed);
    }

    #[test]
    fn test_justified_demand_consensus_cap() {
        let p = ApprovalProfile::from_rows(&[vec![1, 0], vec![1, 0]]).unwrap();
        // Full subset, k = 2: proportional share 2, but consensus is 1.
        let (demand, needed) = justified_demand(&p, &[0, 1], 2);
        assert_eq!(demand, 1);
        assert!(!needed);
    }

    #[test]
    fn test_avg_satisfaction() {
        let p = profile_abc();
        let sat = avg_satisfaction(&p, &[0, 2], &[2, 0]);
        // Voter 0 approves both of {c, a}, voter 2 approves only c.
        assert!((sat - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_justified_ranking_passes() {
        let p = profile_abc();
        let r = Ranking::new(vec![2, 0, 1, 3, 4]);
        assert!(justify(&p, &r));
        assert!(quality(&p, &r) >= 1.0);
    }

    #[test]
    fn test_bad_ranking_fails() {
        let p = profile_abc();
        // Put the consensus candidate c last: the grand coalition's demand at
        // small k goes unmet.
        let r = Ranking::new(vec![3, 4, 0, 1, 2]);
        assert!(!justify(&p, &r));
        assert!(quality(&p, &r) < 1.0);
    }

    #[test]
    fn test_quality_justify_agree() {
        let p = profile_abc();
        for ranking in [vec![2, 1, 0, 3, 4], vec![0, 1, 2, 3, 4], vec![2, 0, 1, 3, 4]] {
            let r = Ranking::new(ranking);
            let q = quality(&p, &r);
            assert_eq!(q >= 1.0, justify(&p, &r), "ranking {:?}", r);
        }
    }

    #[test]
    fn test_quality_nonnegative() {
        let p = ApprovalProfile::from_rows(&[vec![0, 1], vec![1, 0]]).unwrap();
        let q = quality(&p, &Ranking::new(vec![1, 0]));
        assert!(q >= 0.0);
    }
}
