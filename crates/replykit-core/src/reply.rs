//! Handler intent descriptors for replykit
//!
//! Handlers that want a custom message or status without assembling the
//! final envelope themselves return a [`Reply`]. It converts into the
//! tagged record shape the classifier recognizes, so intent travels through
//! the serializer like any other value.
//!
//! # Example
//!
//! ```rust
//! use replykit_core::{process, Payload, Reply};
//! use http::Method;
//!
//! let reply = Reply::response("User created", Payload::record([("id", 7i64.into())]))
//!     .with_status(201);
//! let (envelope, status) = process(&reply.into(), &Method::POST);
//!
//! assert_eq!(status, http::StatusCode::CREATED);
//! assert_eq!(envelope.message, "User created");
//! ```

use crate::format::{KIND, PAGINATED_TAG, SINGLE_TAG};
use crate::payload::Payload;

/// A pre-canonical result descriptor produced by a handler.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Single result with an explicit message.
    Response {
        /// Outcome description.
        message: String,
        /// Explicit status, when the method default is not wanted.
        status: Option<u16>,
        /// Result payload.
        data: Payload,
    },
    /// Paginated result; derived fields are computed by the pipeline.
    Pagination {
        /// Outcome description; the pipeline defaults it when absent.
        message: Option<String>,
        /// Explicit status, when the method default is not wanted.
        status: Option<u16>,
        /// Current page of items.
        items: Vec<Payload>,
        /// Total matching items across all pages.
        total_count: u64,
        /// 1-based page index.
        current_page: u64,
        /// Items per page.
        page_size: u64,
    },
}

impl Reply {
    /// Single-result descriptor with the given message.
    pub fn response(message: impl Into<String>, data: impl Into<Payload>) -> Self {
        Reply::Response {
            message: message.into(),
            status: None,
            data: data.into(),
        }
    }

    /// Paginated descriptor from the upstream pagination fields.
    pub fn pagination(
        items: Vec<Payload>,
        total_count: u64,
        current_page: u64,
        page_size: u64,
    ) -> Self {
        Reply::Pagination {
            message: None,
            status: None,
            items,
            total_count,
            current_page,
            page_size,
        }
    }

    /// Override the outcome message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        match &mut self {
            Reply::Response { message: m, .. } => *m = message.into(),
            Reply::Pagination { message: m, .. } => *m = Some(message.into()),
        }
        self
    }

    /// Supply an explicit status code.
    pub fn with_status(mut self, status: u16) -> Self {
        match &mut self {
            Reply::Response { status: s, .. } | Reply::Pagination { status: s, .. } => {
                *s = Some(status)
            }
        }
        self
    }

    /// Convert into the tagged record the classifier recognizes.
    pub fn into_payload(self) -> Payload {
        match self {
            Reply::Response {
                message,
                status,
                data,
            } => {
                let mut fields = vec![
                    (KIND.to_owned(), Payload::from(SINGLE_TAG)),
                    ("message".to_owned(), Payload::from(message)),
                    ("data".to_owned(), data),
                ];
                if let Some(code) = status {
                    fields.push(("statusCode".to_owned(), Payload::Int(code.into())));
                }
                Payload::record(fields)
            }
            Reply::Pagination {
                message,
                status,
                items,
                total_count,
                current_page,
                page_size,
            } => {
                let data = Payload::record([
                    ("items", Payload::list(items)),
                    ("totalCount", Payload::from(total_count)),
                    ("currentPage", Payload::from(current_page)),
                    ("pageSize", Payload::from(page_size)),
                ]);

                let mut fields = vec![(KIND.to_owned(), Payload::from(PAGINATED_TAG))];
                if let Some(message) = message {
                    fields.push(("message".to_owned(), Payload::from(message)));
                }
                if let Some(code) = status {
                    fields.push(("statusCode".to_owned(), Payload::Int(code.into())));
                }
                fields.push(("data".to_owned(), data));
                Payload::record(fields)
            }
        }
    }
}

impl From<Reply> for Payload {
    fn from(reply: Reply) -> Self {
        reply.into_payload()
    }
}
