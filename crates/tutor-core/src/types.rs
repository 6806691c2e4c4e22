//! Domain types shared by the flattener, the index backends and the query service.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::{Error, Result};

/// Where a chunk came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    Curriculum,
    Help,
}

/// One retrievable unit of offline text.
///
/// - `title`: chapter/subchapter path or help topic name, never empty
/// - `text`: body matched against and shown to the user, may be empty
/// - `chapter_ref`/`subchapter_ref`: provenance, only set for curriculum chunks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    pub kind: ChunkKind,
    pub title: String,
    pub text: String,
    pub chapter_ref: Option<String>,
    pub subchapter_ref: Option<String>,
}

impl Chunk {
    pub fn curriculum(
        title: String,
        text: String,
        chapter_ref: String,
        subchapter_ref: String,
    ) -> Self {
        Self {
            kind: ChunkKind::Curriculum,
            title,
            text,
            chapter_ref: Some(chapter_ref),
            subchapter_ref: Some(subchapter_ref),
        }
    }

    pub fn help(title: String, text: String) -> Self {
        Self { kind: ChunkKind::Help, title, text, chapter_ref: None, subchapter_ref: None }
    }
}

/// The full ordered set of chunks available offline.
///
/// Built once (see [`crate::corpus`]) and read-only afterwards. A chunk's
/// identity is its position.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    chunks: Vec<Chunk>,
}

impl Corpus {
    pub(crate) fn from_chunks(chunks: Vec<Chunk>) -> Self { Self { chunks } }

    pub fn len(&self) -> usize { self.chunks.len() }

    pub fn is_empty(&self) -> bool { self.chunks.is_empty() }

    pub fn get(&self, position: usize) -> Option<&Chunk> { self.chunks.get(position) }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> { self.chunks.iter() }

    pub fn chunks(&self) -> &[Chunk] { &self.chunks }

    pub fn count_kind(&self, kind: ChunkKind) -> usize {
        self.chunks.iter().filter(|c| c.kind == kind).count()
    }
}

impl Index<usize> for Corpus {
    type Output = Chunk;

    fn index(&self, position: usize) -> &Chunk { &self.chunks[position] }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter { self.chunks.iter() }
}

/// A corpus position paired with its match distance. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedMatch {
    pub position: usize,
    pub distance: f64,
}

/// Matcher tuning shared by all index backends.
///
/// - `threshold`: allowed edit distance as a fraction of the term length
/// - `min_term_len`: shorter query terms are ignored
/// - `min_term_share`: fraction of query terms a chunk must match
///
/// The defaults keep short and sentence-shaped queries from surfacing
/// unrelated chunks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    pub threshold: f64,
    pub min_term_len: usize,
    pub min_term_share: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self { threshold: 0.3, min_term_len: 3, min_term_share: 0.5 }
    }
}

impl MatchOptions {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidConfig(format!(
                "search.threshold must be within [0.0, 1.0], got {}",
                self.threshold
            )));
        }
        if self.min_term_len == 0 {
            return Err(Error::InvalidConfig(
                "search.min_term_len must be at least 1".to_string(),
            ));
        }
        if !(self.min_term_share > 0.0 && self.min_term_share <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "search.min_term_share must be within (0.0, 1.0], got {}",
                self.min_term_share
            )));
        }
        Ok(())
    }

    /// Whether `matched` of `total` query terms is enough for a chunk to count.
    pub fn enough_terms(&self, matched: usize, total: usize) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let enough = matched > 0 && matched as f64 >= self.min_term_share * total as f64;
        enough
    }

    /// Largest edit count a term of `term_len` chars may carry and still match.
    pub fn max_edits(&self, term_len: usize) -> usize {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let edits = (self.threshold * term_len as f64).floor() as usize;
        edits
    }
}

/// Sort matches best-first; equal distances keep corpus order.
pub fn rank_matches(matches: &mut [RankedMatch]) {
    matches.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.position.cmp(&b.position))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_threshold_outside_unit_range() {
        let opts = MatchOptions { threshold: 1.5, ..MatchOptions::default() };
        assert!(matches!(opts.validate(), Err(Error::InvalidConfig(_))));
        assert!(MatchOptions::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_term_share() {
        let opts = MatchOptions { min_term_share: 0.0, ..MatchOptions::default() };
        assert!(matches!(opts.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn enough_terms_requires_half_by_default() {
        let opts = MatchOptions::default();
        assert!(opts.enough_terms(1, 2));
        assert!(!opts.enough_terms(1, 3));
        assert!(opts.enough_terms(2, 3));
        assert!(!opts.enough_terms(0, 0));
    }

    #[test]
    fn max_edits_floors_fraction() {
        let opts = MatchOptions::default();
        assert_eq!(opts.max_edits(3), 0);
        assert_eq!(opts.max_edits(4), 1);
        assert_eq!(opts.max_edits(8), 2);
    }

    #[test]
    fn rank_matches_breaks_ties_by_position() {
        let mut m = vec![
            RankedMatch { position: 4, distance: 0.5 },
            RankedMatch { position: 2, distance: 0.5 },
            RankedMatch { position: 7, distance: 0.0 },
        ];
        rank_matches(&mut m);
        let order: Vec<usize> = m.iter().map(|r| r.position).collect();
        assert_eq!(order, vec![7, 2, 4]);
    }
}
