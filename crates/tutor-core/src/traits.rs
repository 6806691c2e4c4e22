use crate::error::Result;
use crate::types::{Corpus, MatchOptions, RankedMatch};

/// Approximate string matcher over a built corpus.
///
/// `build` runs once; `search` never fails and returns matches sorted by
/// ascending distance with ties in corpus order.
pub trait FuzzyIndexer: Send + Sync {
    fn build(corpus: &Corpus, options: &MatchOptions) -> Result<Self>
    where
        Self: Sized;
    fn search(&self, query: &str) -> Vec<RankedMatch>;
}

/// The online tutor the chat talks to when connectivity allows.
pub trait RemoteAssistant {
    fn ask(&self, message: &str) -> anyhow::Result<String>;
}
