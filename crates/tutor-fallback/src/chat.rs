use tracing::{info, warn};

use tutor_core::traits::{FuzzyIndexer, RemoteAssistant};

use crate::message::{compose_fallback, FallbackMessage};
use crate::service::QueryService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Remote(String),
    Offline(FallbackMessage),
}

/// Answers chat messages, preferring the remote tutor and falling back to
/// the local search when offline or when the remote call fails. The remote
/// call and the local search never run concurrently.
pub struct ChatResponder<'a, I: FuzzyIndexer, R: RemoteAssistant> {
    search: &'a QueryService<I>,
    remote: R,
    preview_chars: usize,
}

impl<'a, I: FuzzyIndexer, R: RemoteAssistant> ChatResponder<'a, I, R> {
    pub fn new(search: &'a QueryService<I>, remote: R, preview_chars: usize) -> Self {
        Self { search, remote, preview_chars }
    }

    pub fn respond(&self, message: &str, connectivity: Connectivity) -> Reply {
        if connectivity == Connectivity::Online {
            match self.remote.ask(message) {
                Ok(answer) => return Reply::Remote(answer),
                Err(e) => warn!(error = %e, "remote tutor failed, answering from offline content"),
            }
        } else {
            info!("offline, answering from local content");
        }
        Reply::Offline(self.offline_answer(message))
    }

    pub fn offline_answer(&self, message: &str) -> FallbackMessage {
        compose_fallback(&self.search.query(message), self.preview_chars)
    }
}
