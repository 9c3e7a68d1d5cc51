//! Ranking rules.
//!
//! Every rule is a small stateful struct: bind an [`ApprovalProfile`] with
//! [`RankingRule::set_profile`], then ask for [`RankingRule::ranking`],
//! [`RankingRule::quality`], or [`RankingRule::justifiable`]. Derived results
//! are memoized per instance and invalidated wholesale when a new profile is
//! bound.

mod av;
mod enestrom;
mod exhaustive;
mod loads;
mod phragmen;
mod reverse;
mod score_pav;
mod seq_rav;
mod seq_x;

pub use av::Av;
pub use enestrom::Enestrom;
pub use exhaustive::{BordaPav, JustifiedRanking, MaximizeQuality, ScorePav};
pub use loads::{IrvSum, SumLoads};
pub use phragmen::{PhragmenClassic, PhragmenDepile, PhragmenMinmax, SeqPhragmen};
pub use reverse::{ReversePav, ReverseSeqRav};
pub use score_pav::{ScoreVec, SeqScorePav};
pub use seq_rav::{SeqRav, WeightScheme};
pub use seq_x::SeqX;

use crate::error::RankingError;
use crate::profile::ApprovalProfile;
use crate::quality;
use crate::ranking::Ranking;

/// Score differences below this are treated as ties (first candidate found
/// wins). Absorbs floating-point noise in the load-based rules; configurable
/// per rule via `with_tolerance`.
pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-4;

/// Bound profile plus the memoized results derived from it.
///
/// Held by composition in every rule; [`RuleState::bind`] clears the whole
/// cache so nothing leaks across profiles.
#[derive(Debug, Clone, Default)]
pub struct RuleState {
    pub(crate) profile: Option<ApprovalProfile>,
    pub(crate) ranking: Option<Ranking>,
    pub(crate) quality: Option<f64>,
    pub(crate) justifiable: Option<bool>,
}

impl RuleState {
    /// Binds a new profile and invalidates every cached result.
    pub fn bind(&mut self, profile: ApprovalProfile) {
        self.profile = Some(profile);
        self.ranking = None;
        self.quality = None;
        self.justifiable = None;
    }

    /// The currently bound profile, if any.
    pub fn profile(&self) -> Option<&ApprovalProfile> {
        self.profile.as_ref()
    }
}

/// A proportional ranking rule bound to one profile at a time.
///
/// Implementors provide [`compute`](Self::compute) (the actual algorithm)
/// and access to their [`RuleState`]; binding, caching, rendering, and the
/// quality evaluation come with the trait.
pub trait RankingRule {
    /// Human-readable rule name, e.g. for comparison tables.
    fn name(&self) -> &str;

    fn state(&self) -> &RuleState;

    fn state_mut(&mut self) -> &mut RuleState;

    /// Computes a full ranking of `profile`'s candidates.
    ///
    /// Pure with respect to the rule instance; caching happens in
    /// [`ranking`](Self::ranking).
    fn compute(&self, profile: &ApprovalProfile) -> Result<Ranking, RankingError>;

    /// Validates `rows` as a 0/1 matrix and binds it, clearing all caches.
    fn set_profile(&mut self, rows: &[Vec<u8>]) -> Result<&mut Self, RankingError>
    where
        Self: Sized,
    {
        let profile = ApprovalProfile::from_rows(rows)?;
        self.state_mut().bind(profile);
        Ok(self)
    }

    /// Binds an already-validated profile (object-safe variant of
    /// [`set_profile`](Self::set_profile)).
    fn bind_profile(&mut self, profile: ApprovalProfile) {
        self.state_mut().bind(profile);
    }

    /// Computes or returns the cached ranking for the bound profile.
    fn ranking(&mut self) -> Result<Ranking, RankingError> {
        if let Some(r) = &self.state().ranking {
            return Ok(r.clone());
        }
        let profile = self
            .state()
            .profile
            .clone()
            .ok_or(RankingError::ProfileNotBound)?;
        let ranking = self.compute(&profile)?;
        debug_assert!(ranking.is_permutation());
        self.state_mut().ranking = Some(ranking.clone());
        Ok(ranking)
    }

    /// Renders the ranking as `"a > c > b"`-style letters.
    fn render_ranking(&mut self) -> Result<String, RankingError> {
        Ok(self.ranking()?.render())
    }

    /// Worst-case proportionality ratio of this rule's ranking.
    fn quality(&mut self) -> Result<f64, RankingError> {
        if let Some(q) = self.state().quality {
            return Ok(q);
        }
        let ranking = self.ranking()?;
        let profile = self
            .state()
            .profile
            .clone()
            .ok_or(RankingError::ProfileNotBound)?;
        let q = quality::quality(&profile, &ranking);
        self.state_mut().quality = Some(q);
        Ok(q)
    }

    /// Whether this rule's ranking meets every justified demand.
    fn justifiable(&mut self) -> Result<bool, RankingError> {
        if let Some(j) = self.state().justifiable {
            return Ok(j);
        }
        let ranking = self.ranking()?;
        let profile = self
            .state()
            .profile
            .clone()
            .ok_or(RankingError::ProfileNotBound)?;
        let j = quality::justify(&profile, &ranking);
        self.state_mut().justifiable = Some(j);
        Ok(j)
    }

    /// Theoretical representation bound for guarantee parameters
    /// `(alpha, lambda)`, where known in closed form.
    fn representation(&self, _alpha: f64, _lambda: f64) -> Result<u64, RankingError> {
        Err(RankingError::RepresentationUnsupported {
            rule: self.name().to_string(),
        })
    }
}
