//! tutor-text
//!
//! Fuzzy indexes over the offline corpus. `ApproxIndex` does typo-tolerant
//! substring matching in memory; `TantivyFuzzyIndex` runs the same terms as
//! tantivy exact, prefix-fuzzy and infix queries over a RAM index. Both sit
//! behind `tutor_core::traits::FuzzyIndexer`.
pub mod approx;
pub mod tantivy_index;
pub mod tantivy_utils;
pub mod terms;

pub use approx::ApproxIndex;
pub use tantivy_index::TantivyFuzzyIndex;

use tutor_core::config::Backend;
use tutor_core::error::Result;
use tutor_core::traits::FuzzyIndexer;
use tutor_core::types::{Corpus, MatchOptions, RankedMatch};

/// Backend picked at startup from `search.backend`.
pub enum AnyIndex {
    Approx(ApproxIndex),
    Tantivy(TantivyFuzzyIndex),
}

impl AnyIndex {
    pub fn build_with(backend: Backend, corpus: &Corpus, options: &MatchOptions) -> Result<Self> {
        Ok(match backend {
            Backend::Approx => Self::Approx(ApproxIndex::build(corpus, options)?),
            Backend::Tantivy => Self::Tantivy(TantivyFuzzyIndex::build(corpus, options)?),
        })
    }
}

impl FuzzyIndexer for AnyIndex {
    fn build(corpus: &Corpus, options: &MatchOptions) -> Result<Self> {
        Self::build_with(Backend::default(), corpus, options)
    }

    fn search(&self, query: &str) -> Vec<RankedMatch> {
        match self {
            Self::Approx(i) => i.search(query),
            Self::Tantivy(i) => i.search(query),
        }
    }
}
