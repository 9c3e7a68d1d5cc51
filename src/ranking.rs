//! Ranking type and textual rendering.

/// Label for candidate `index`: `a`, `b`, `c`, ...
///
/// Indices past `z` fall back to the corresponding Unicode code point,
/// matching the `char(97 + i)` rendering convention.
pub fn candidate_label(index: usize) -> char {
    char::from_u32(97 + index as u32).unwrap_or('?')
}

/// A total order over candidates: a permutation of `0..m`, best first.
///
/// Immutable once produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ranking {
    positions: Vec<usize>,
}

impl Ranking {
    /// Wraps an ordered sequence of candidate indices.
    pub fn new(positions: Vec<usize>) -> Self {
        Self { positions }
    }

    /// Number of ranked candidates (`m`).
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The full order, best candidate first.
    pub fn as_slice(&self) -> &[usize] {
        &self.positions
    }

    /// The first `k` positions (the "committee" induced at prefix length `k`).
    pub fn prefix(&self, k: usize) -> &[usize] {
        &self.positions[..k.min(self.positions.len())]
    }

    /// Whether this is a permutation of `0..m` (no repeats, full coverage).
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.positions.len()];
        for &c in &self.positions {
            if c >= seen.len() || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        true
    }

    /// Renders as candidate letters joined by `" > "`, e.g. `"c > a > b"`.
    pub fn render(&self) -> String {
        self.positions
            .iter()
            .map(|&c| candidate_label(c).to_string())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

impl From<Vec<usize>> for Ranking {
    fn from(positions: Vec<usize>) -> Self {
        Self::new(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let r = Ranking::new(vec![2, 0, 1]);
        assert_eq!(r.render(), "c > a > b");
    }

    #[test]
    fn test_prefix() {
        let r = Ranking::new(vec![2, 0, 1]);
        assert_eq!(r.prefix(2), &[2, 0]);
        assert_eq!(r.prefix(10), &[2, 0, 1]);
    }

    #[test]
    fn test_is_permutation() {
        assert!(Ranking::new(vec![2, 0, 1]).is_permutation());
        assert!(!Ranking::new(vec![2, 0, 0]).is_permutation());
        assert!(!Ranking::new(vec![2, 0, 3]).is_permutation());
    }

    #[test]
    fn test_labels() {
        assert_eq!(candidate_label(0), 'a');
        assert_eq!(candidate_label(25), 'z');
    }
}
