//! Canonical envelope types for replykit
//!
//! Every completed request leaves the pipeline as exactly one [`Envelope`]:
//! `{message, data, statusCode, date}`. Paginated results carry a
//! [`PageData`] object in `data`, with the derived fields (`totalPage`,
//! `hasNextPage`, `hasPreviousPage`) always recomputed here and never
//! trusted from upstream.
//!
//! Envelopes are per-request values: constructed once at formatting time,
//! serialized to the wire, then discarded. The `date` field is stamped at
//! construction and is never the handler-supplied value.

use crate::sanitize::iso8601;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

/// Default outcome description when a handler supplies none.
pub const DEFAULT_MESSAGE: &str = "Success";

/// The canonical top-level response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    /// Human-readable outcome description.
    pub message: String,
    /// Sanitized payload, arbitrary JSON shape.
    pub data: Value,
    /// HTTP status, mirrored into the body.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// ISO-8601 UTC construction time.
    pub date: String,
}

impl Envelope {
    /// Build an envelope stamped with the current time.
    pub fn new(message: impl Into<String>, data: Value, status_code: u16) -> Self {
        Self {
            message: message.into(),
            data,
            status_code,
            date: iso8601(&Utc::now()),
        }
    }
}

/// Paginated `data` object with its derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PageData {
    /// Current page of sanitized items.
    pub items: Vec<Value>,
    /// Total matching items across all pages.
    pub total_count: u64,
    /// Derived: `ceil(total_count / page_size)`.
    pub total_page: u64,
    /// 1-based page index.
    pub current_page: u64,
    /// Items per page.
    pub page_size: u64,
    /// Derived: `current_page < total_page`.
    pub has_next_page: bool,
    /// Derived: `current_page > 1`.
    pub has_previous_page: bool,
}

impl PageData {
    /// Compute the derived pagination fields from the upstream ones.
    ///
    /// A `page_size` of zero is clamped to one so the arithmetic stays
    /// total; the classifier rejects that shape before it gets here.
    pub fn compute(items: Vec<Value>, total_count: u64, current_page: u64, page_size: u64) -> Self {
        let total_page = total_count.div_ceil(page_size.max(1));
        Self {
            items,
            total_count,
            total_page,
            current_page,
            page_size,
            has_next_page: current_page < total_page,
            has_previous_page: current_page > 1,
        }
    }

    /// Render as the wire-shaped `data` value.
    pub fn into_value(self) -> Value {
        json!({
            "items": self.items,
            "totalCount": self.total_count,
            "totalPage": self.total_page,
            "currentPage": self.current_page,
            "pageSize": self.page_size,
            "hasNextPage": self.has_next_page,
            "hasPreviousPage": self.has_previous_page,
        })
    }
}
