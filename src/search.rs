//! Lexicographic index iterators for the combinatorial searches.
//!
//! Used by the quality evaluator (subsets of voters) and the exhaustive
//! reference rules (permutations of candidates). Both yield in lexicographic
//! order, so "first found" tie-breaking is deterministic.

/// Iterates over all k-element subsets of `0..n` in lexicographic order.
pub struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }
        // Advance the rightmost index that still has room.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - self.k + i {
                break;
            }
        }
        self.indices[i] += 1;
        for j in i + 1..self.k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// Iterates over all permutations of `0..m` in lexicographic order.
pub struct Permutations {
    current: Vec<usize>,
    started: bool,
    done: bool,
}

impl Permutations {
    pub fn new(m: usize) -> Self {
        Self {
            current: (0..m).collect(),
            started: false,
            done: false,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current.clone());
        }
        // Classic next-permutation step.
        let a = &mut self.current;
        if a.len() < 2 {
            self.done = true;
            return None;
        }
        let mut i = a.len() - 1;
        while i > 0 && a[i - 1] >= a[i] {
            i -= 1;
        }
        if i == 0 {
            self.done = true;
            return None;
        }
        let pivot = i - 1;
        let mut j = a.len() - 1;
        while a[j] <= a[pivot] {
            j -= 1;
        }
        a.swap(pivot, j);
        a[i..].reverse();
        Some(a.clone())
    }
}
