//! Approval profile data model.

use crate::error::RankingError;
use crate::ranking::candidate_label;

/// An approval profile: `n` voters times `m` candidates, stored row-major.
///
/// `approves(i, j)` is true iff voter `i` approves candidate `j`. The matrix
/// is validated to be rectangular and non-empty at construction and is
/// immutable afterwards; rules work on local copies when they need to zero
/// out selected candidates.
///
/// # Examples
///
/// ```
/// use prop_ranking::profile::ApprovalProfile;
///
/// let p = ApprovalProfile::from_rows(&[
///     vec![1, 0, 1, 0, 0],
///     vec![0, 1, 1, 1, 1],
///     vec![0, 1, 1, 0, 0],
/// ]).unwrap();
/// assert_eq!(p.voters(), 3);
/// assert_eq!(p.candidates(), 5);
/// assert_eq!(p.approval_score(2), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApprovalProfile {
    approvals: Vec<bool>,
    voters: usize,
    candidates: usize,
}

impl ApprovalProfile {
    /// Builds a profile from rows of truthy/falsy values (nonzero = approve).
    ///
    /// Fails when the matrix is empty or rows have unequal lengths.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, RankingError> {
        if rows.is_empty() || rows[0].as_ref().is_empty() {
            return Err(RankingError::EmptyProfile);
        }
        let candidates = rows[0].as_ref().len();
        let mut approvals = Vec::with_capacity(rows.len() * candidates);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != candidates {
                return Err(RankingError::RaggedProfile {
                    row: i,
                    len: row.len(),
                    expected: candidates,
                });
            }
            approvals.extend(row.iter().map(|&v| v != 0));
        }
        Ok(Self {
            approvals,
            voters: rows.len(),
            candidates,
        })
    }

    /// Number of voters (`n`).
    pub fn voters(&self) -> usize {
        self.voters
    }

    /// Number of candidates (`m`).
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// Whether voter `voter` approves candidate `candidate`.
    pub fn approves(&self, voter: usize, candidate: usize) -> bool {
        self.approvals[voter * self.candidates + candidate]
    }

    /// Voter `voter`'s approval row.
    pub fn row(&self, voter: usize) -> &[bool] {
        let start = voter * self.candidates;
        &self.approvals[start..start + self.candidates]
    }

    /// Total number of approvals for `candidate` (column sum).
    pub fn approval_score(&self, candidate: usize) -> usize {
        (0..self.voters)
            .filter(|&v| self.approves(v, candidate))
            .count()
    }

    /// Number of candidates approved by `voter` (row sum).
    pub fn voter_approvals(&self, voter: usize) -> usize {
        self.row(voter).iter().filter(|&&a| a).count()
    }

    /// Voters approving `candidate`, in index order.
    pub fn approvers(&self, candidate: usize) -> Vec<usize> {
        (0..self.voters)
            .filter(|&v| self.approves(v, candidate))
            .collect()
    }

    /// Renders the profile one voter per line: `"{i} : {approved letters}"`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for v in 0..self.voters {
            let letters: Vec<String> = (0..self.candidates)
                .filter(|&c| self.approves(v, c))
                .map(|c| candidate_label(c).to_string())
                .collect();
            out.push_str(&format!("{} : {}\n", v, letters.join(" ")));
        }
        out
    }
}
