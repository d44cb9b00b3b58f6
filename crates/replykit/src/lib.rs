//! # replykit
//!
//! Uniform response envelopes for HTTP APIs.
//!
//! replykit sits between your handlers and the wire. Handlers return
//! whatever shape is natural — a domain record, a [`Reply`] descriptor with
//! a custom message or status, a paginated result — and the pipeline
//! normalizes it into one canonical envelope:
//! `{message, data, statusCode, date}`.
//!
//! Along the way the deep serializer makes every value JSON-safe without
//! losing precision: big integers and fixed-point decimals become exact
//! digit strings, timestamps become ISO-8601 text, buffers become base64,
//! and cyclic graphs terminate with a `"[Circular]"` marker instead of a
//! stack overflow.
//!
//! ## Quick Start
//!
//! ```rust
//! use replykit::prelude::*;
//! use http::Method;
//!
//! let user = Payload::record([
//!     ("id", Payload::Int(1)),
//!     ("name", Payload::from("Alice")),
//! ]);
//!
//! let (envelope, status) = process(&user, &Method::GET);
//!
//! assert_eq!(status, http::StatusCode::OK);
//! assert_eq!(envelope.message, "Success");
//! ```
//!
//! ## Paginated results
//!
//! ```rust
//! use replykit::prelude::*;
//! use http::Method;
//!
//! let reply = Reply::pagination(
//!     vec![Payload::from("a"), Payload::from("b")],
//!     42, // total count
//!     3,  // current page
//!     10, // page size
//! );
//!
//! let (envelope, _) = process(&reply.into(), &Method::GET);
//! assert_eq!(envelope.data["totalPage"], serde_json::json!(5));
//! assert_eq!(envelope.data["hasNextPage"], serde_json::json!(true));
//! ```

// Re-export core functionality
pub use replykit_core::*;

/// Commonly used replykit types, in one import.
pub mod prelude {
    pub use replykit_core::{
        format,
        process,
        sanitize,
        // Error handling
        ApiError,
        // Envelope types
        Envelope,
        // Transport seam
        IntoResponse,
        PageData,
        Pattern,
        // Handler value model
        Payload,
        // Intent descriptors
        Reply,
        Response,
        Result,
        Shared,
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use http::Method;

    #[test]
    fn prelude_covers_the_pipeline_surface() {
        let (envelope, status) = process(&Payload::from("hello"), &Method::GET);
        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(envelope.data, serde_json::json!("hello"));
    }
}
