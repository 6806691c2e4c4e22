//! tutor-fallback
//!
//! Offline answers for the tutor chat: `QueryService` ranks corpus chunks for
//! a user message, `compose_fallback` turns them into the assistant's reply,
//! and `ChatResponder` decides between the remote tutor and the local search.
pub mod chat;
pub mod message;
pub mod service;

pub use chat::{ChatResponder, Connectivity, Reply};
pub use message::{compose_fallback, FallbackMessage};
pub use service::{QueryService, RESULT_LIMIT};
