//! Proportional ranking of candidates from approval profiles.
//!
//! Provides the rule family studied in "Proportional Rankings"
//! (Skowron et al., 2017) and related work:
//!
//! - **Approval Voting (AV)**: candidates ordered by approval score.
//! - **Sequential reweighted family**: seqPAV (harmonic weights), geometric
//!   PAV, arbitrary weight vectors, and reverse-built variants.
//! - **Phragmén family**: classic, minmax, depile, and sequential load
//!   balancing, plus Enestrom and the IRV-style load rules.
//! - **Sequential Rule X**: per-voter rational budgets spent on candidates
//!   at their minimal supporting price (exact arithmetic).
//! - **Score-based and exhaustive reference rules**: seqScorePAV, bordaPAV,
//!   scorePAV, JustifiedRanking, MaximizeQuality.
//!
//! Every rule implements the [`rules::RankingRule`] trait: bind a profile,
//! compute a full ranking over all candidates, and evaluate it against the
//! *justified demand* proportionality guarantee via the [`quality`] module.
//!
//! # Example
//!
//! ```
//! use prop_ranking::rules::{Av, RankingRule};
//!
//! let mut rule = Av::new();
//! rule.set_profile(&[
//!     vec![1, 0, 1, 0, 0],
//!     vec![0, 1, 1, 1, 1],
//!     vec![0, 1, 1, 0, 0],
//! ]).unwrap();
//! assert_eq!(rule.render_ranking().unwrap(), "c > b > a > d > e");
//! ```

pub mod error;
pub mod experiments;
pub mod profile;
pub mod quality;
pub mod ranking;
pub mod rules;
pub mod search;
