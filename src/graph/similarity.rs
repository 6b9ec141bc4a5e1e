//! Fuzzy text similarity between log lines.
//!
//! The score is the Ratcliff/Obershelp ratio `2 * matches / (len_a + len_b)`
//! over the trimmed strings, character level. Matches are found by taking
//! the longest contiguous common block and recursing on both sides of it.
//! It is order- and case-sensitive, and not symmetric: `a` is the candidate,
//! `b` the stored template.
//!
//! When `b` has 200 or more chars, any char occurring more than
//! `len_b / 100 + 1` times in it is "popular" and cannot seed a block,
//! although blocks still extend across it.

use crate::utils::config::{DEFAULT_COARSE_SIMILARITY_THRESHOLD, DEFAULT_SIMILARITY_THRESHOLD};
use crate::utils::SimilarityConfig;
use std::collections::HashMap;

/// Minimum length of `b` before popular chars are dropped from the index
const AUTOJUNK_MIN_LEN: usize = 200;

/// Similarity score in `0.0..=1.0` between two strings
///
/// Two empty strings are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.trim().chars().collect();
    let b: Vec<char> = b.trim().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matches = BlockMatcher::new(&a, &b).matching_chars();
    (2 * matches) as f64 / total as f64
}

/// Longest-block matcher over two char sequences
struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],

    /// Positions of each char in `b`, ascending, popular chars removed
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Total length of all matching blocks
    fn matching_chars(&self) -> usize {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut matches = 0;

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, size) = self.find_longest_match(alo, ahi, blo, bhi);
            if size == 0 {
                continue;
            }

            matches += size;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                queue.push((i + size, ahi, j + size, bhi));
            }
        }

        matches
    }

    /// Longest block `a[i..i+size] == b[j..j+size]` within the given ranges
    ///
    /// Ties go to the earliest `i`, then the earliest `j`.
    fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // Length of the block ending at (i - 1, j), keyed by j
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_lengths = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }

                    let previous = j
                        .checked_sub(1)
                        .and_then(|k| run_lengths.get(&k))
                        .copied()
                        .unwrap_or(0);
                    let size = previous + 1;
                    next_lengths.insert(j, size);

                    if size > best_size {
                        best_i = i + 1 - size;
                        best_j = j + 1 - size;
                        best_size = size;
                    }
                }
            }
            run_lengths = next_lengths;
        }

        // Popular chars never seed a block but may extend one
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }
}

/// Same-template decision at the default threshold
pub fn similar_enough(a: &str, b: &str) -> bool {
    similarity(a, b) > DEFAULT_SIMILARITY_THRESHOLD
}

/// Remove ASCII digits so numeric fields do not split templates
pub fn strip_digits(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Threshold-carrying similarity decisions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityMatcher {
    threshold: f64,
    coarse_threshold: f64,
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            coarse_threshold: DEFAULT_COARSE_SIMILARITY_THRESHOLD,
        }
    }
}

impl From<SimilarityConfig> for SimilarityMatcher {
    fn from(config: SimilarityConfig) -> Self {
        Self {
            threshold: config.threshold,
            coarse_threshold: config.coarse_threshold,
        }
    }
}

impl SimilarityMatcher {
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn coarse_threshold(&self) -> f64 {
        self.coarse_threshold
    }

    /// True iff the score is strictly above the template threshold
    pub fn similar_enough(&self, a: &str, b: &str) -> bool {
        similarity(a, b) > self.threshold
    }

    /// Looser check against the coarse threshold
    pub fn roughly_similar(&self, a: &str, b: &str) -> bool {
        similarity(a, b) > self.coarse_threshold
    }
}
