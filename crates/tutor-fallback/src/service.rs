use tracing::debug;

use tutor_core::config::SearchSettings;
use tutor_core::error::Result;
use tutor_core::traits::FuzzyIndexer;
use tutor_core::types::{Chunk, Corpus};
use tutor_text::AnyIndex;

/// Maximum number of chunks returned per query.
pub const RESULT_LIMIT: usize = 3;

/// Read-only search over a built corpus.
///
/// Holds no interior mutability, so one instance can serve concurrent
/// queries by shared reference.
pub struct QueryService<I: FuzzyIndexer> {
    corpus: Corpus,
    index: I,
}

impl<I: FuzzyIndexer> QueryService<I> {
    pub fn new(corpus: Corpus, index: I) -> Self { Self { corpus, index } }

    /// Best matching chunks, best first, at most [`RESULT_LIMIT`].
    /// An empty result means nothing relevant is available offline.
    pub fn query(&self, query: &str) -> Vec<&Chunk> {
        let results: Vec<&Chunk> = self
            .index
            .search(query)
            .into_iter()
            .filter_map(|m| self.corpus.get(m.position))
            .take(RESULT_LIMIT)
            .collect();
        debug!(query, results = results.len(), "offline query");
        results
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }
}

impl QueryService<AnyIndex> {
    /// Build the index selected by `settings` and wrap it with its corpus.
    pub fn build(corpus: Corpus, settings: &SearchSettings) -> Result<Self> {
        let index = AnyIndex::build_with(settings.backend, &corpus, &settings.match_options())?;
        Ok(Self::new(corpus, index))
    }
}
