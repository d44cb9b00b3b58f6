//! # replykit-core
//!
//! Core library for replykit: the response normalization and serialization
//! pipeline that sits between application handlers and the wire format of
//! an HTTP API.
//!
//! Handlers return heterogeneous shapes — domain records, pre-formatted
//! result descriptors, already-canonical envelopes — possibly containing
//! values JSON cannot carry directly (big integers, fixed-point decimals,
//! timestamps, binary buffers, cyclic graphs). The pipeline sanitizes the
//! value graph, classifies it into exactly one canonical shape, and emits a
//! uniform envelope plus the status code the transport must apply.
//!
//! This crate is not meant to be used directly. Use `replykit` instead.

mod envelope;
mod error;
mod format;
mod payload;
mod reply;
mod response;
mod sanitize;

// Public API
pub use envelope::{Envelope, PageData, DEFAULT_MESSAGE};
pub use error::{ApiError, Result};
pub use format::{format, process};
pub use payload::{Entries, Fields, Members, Pattern, Payload, Shared};
pub use reply::Reply;
pub use response::{EncodeError, IntoResponse, Response};
pub use sanitize::{sanitize, CIRCULAR, MAX_SAFE_INTEGER};
