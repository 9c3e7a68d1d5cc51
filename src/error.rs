//! Crate error type.

use thiserror::Error;

/// Errors reported by profile construction, ranking rules, and
/// representation bounds.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RankingError {
    /// The profile has no voters or no candidates.
    #[error("profile must have at least one voter and one candidate")]
    EmptyProfile,

    /// A row's length disagrees with the first row.
    #[error("profile is not rectangular: row {row} has {len} entries, expected {expected}")]
    RaggedProfile {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// `ranking()` (or a derived operation) was called before `set_profile`.
    #[error("no profile bound to this rule")]
    ProfileNotBound,

    /// Exhaustive search found no permutation with every justified demand met.
    ///
    /// An expected outcome for some profiles, not a bug.
    #[error("no ranking satisfies every justified demand")]
    NoJustifiedRanking,

    /// The rule has no closed-form representation bound for its current
    /// configuration.
    #[error("no representation bound available for rule `{rule}`")]
    RepresentationUnsupported { rule: String },

    /// The representation bound formula is undefined for this alpha.
    #[error("representation bound undefined for alpha = {alpha} (requires alpha > 0.5)")]
    InvalidAlpha { alpha: f64 },
}
