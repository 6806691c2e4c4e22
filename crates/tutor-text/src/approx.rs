//! In-memory approximate substring index.
//!
//! Every query term is aligned against the best-fitting substring of a
//! chunk's title and text (Sellers' edit distance). A term matches when its
//! edit count stays within `MatchOptions::max_edits`; a chunk matches when
//! enough of the query terms do (`MatchOptions::enough_terms`). Chunk
//! distance is the mean normalized term distance, with unmatched terms
//! counting as 1.0, so chunks covering more of the query rank first.

use tracing::{debug, info};

use tutor_core::error::Result;
use tutor_core::traits::FuzzyIndexer;
use tutor_core::types::{rank_matches, Corpus, MatchOptions, RankedMatch};

use crate::terms::query_terms;

struct IndexedChunk {
    title: Vec<char>,
    text: Vec<char>,
}

pub struct ApproxIndex {
    entries: Vec<IndexedChunk>,
    options: MatchOptions,
}

impl ApproxIndex {
    fn term_distance(&self, term: &[char], entry: &IndexedChunk) -> Option<f64> {
        let edits = substring_distance(term, &entry.title)
            .min(substring_distance(term, &entry.text));
        if edits > self.options.max_edits(term.len()) {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let normalized = edits as f64 / term.len() as f64;
        Some(normalized)
    }
}

impl FuzzyIndexer for ApproxIndex {
    fn build(corpus: &Corpus, options: &MatchOptions) -> Result<Self> {
        options.validate()?;
        let entries = corpus
            .iter()
            .map(|c| IndexedChunk { title: lower_chars(&c.title), text: lower_chars(&c.text) })
            .collect();
        info!(chunks = corpus.len(), threshold = options.threshold, "built approximate index");
        Ok(Self { entries, options: *options })
    }

    fn search(&self, query: &str) -> Vec<RankedMatch> {
        let terms: Vec<Vec<char>> = query_terms(query, self.options.min_term_len)
            .iter()
            .map(|t| t.chars().collect())
            .collect();
        if terms.is_empty() {
            return Vec::new();
        }
        #[allow(clippy::cast_precision_loss)]
        let term_count = terms.len() as f64;

        let mut matches = Vec::new();
        for (position, entry) in self.entries.iter().enumerate() {
            let mut total = 0.0;
            let mut matched = 0;
            for term in &terms {
                match self.term_distance(term, entry) {
                    Some(d) => {
                        matched += 1;
                        total += d;
                    }
                    None => total += 1.0,
                }
            }
            if self.options.enough_terms(matched, terms.len()) {
                matches.push(RankedMatch { position, distance: total / term_count });
            }
        }
        rank_matches(&mut matches);
        debug!(query, terms = terms.len(), hits = matches.len(), "approximate search");
        matches
    }
}

fn lower_chars(s: &str) -> Vec<char> { s.to_lowercase().chars().collect() }

/// Minimum edits turning `pattern` into any substring of `text`.
///
/// Returns `pattern.len()` when `text` is empty.
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }
    // col[i]: edits between pattern[..i] and the best substring ending at
    // the current text char
    let mut col: Vec<usize> = (0..=m).collect();
    let mut next = vec![0; m + 1];
    let mut best = m;
    for &c in text {
        next[0] = 0;
        for i in 1..=m {
            let substitute = col[i - 1] + usize::from(pattern[i - 1] != c);
            next[i] = substitute.min(col[i] + 1).min(next[i - 1] + 1);
        }
        best = best.min(next[m]);
        if best == 0 {
            break;
        }
        std::mem::swap(&mut col, &mut next);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(p: &str, t: &str) -> usize {
        substring_distance(&p.chars().collect::<Vec<_>>(), &t.chars().collect::<Vec<_>>())
    }

    #[test]
    fn exact_substring_costs_nothing() {
        assert_eq!(dist("sunlight", "plants use sunlight to make food"), 0);
        assert_eq!(dist("food", "food"), 0);
    }

    #[test]
    fn single_typos_cost_one_edit() {
        assert_eq!(dist("color", "the colour of leaves"), 1);
        assert_eq!(dist("sunlite", "sunlit room"), 1);
        assert_eq!(dist("magnit", "a magnet attracts"), 1);
    }

    #[test]
    fn unrelated_terms_are_far() {
        assert!(dist("volcano", "plants use sunlight to make food") > 2);
        assert_eq!(dist("abc", ""), 3);
    }
}
