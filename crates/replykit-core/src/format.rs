//! Envelope classifier and formatter for replykit
//!
//! Consumes the deep serializer's output, decides which of five recognized
//! shapes the value matches, and produces the canonical [`Envelope`] plus
//! the [`StatusCode`] the transport layer must apply before writing the
//! body.
//!
//! # Classification order
//!
//! First match wins; the predicates overlap, so the order is load-bearing:
//!
//! 1. Single-result descriptor — `{"type": "response", message, data, statusCode?}`
//! 2. Paginated descriptor — `{"type": "pagination", data: {items, totalCount, currentPage, pageSize}, ...}`
//! 3. Already-canonical envelope — `{message, data, statusCode, date}`
//! 4. Bare paginated data — pagination-shaped `data` without the tag
//! 5. Fallback — any other value, wrapped as `{message: "Success", data: value, ...}`
//!
//! A descriptor whose required sub-fields are missing or mistyped is not an
//! error: it falls through to the next, broader predicate, ultimately to
//! the bare-value wrap. Classification is total — every JSON value maps to
//! exactly one canonical shape.

use crate::envelope::{Envelope, PageData, DEFAULT_MESSAGE};
use crate::payload::Payload;
use crate::sanitize::sanitize;
use http::{Method, StatusCode};
use serde_json::{Map, Value};
use tracing::trace;

/// Discriminator field handlers use to flag intent.
pub(crate) const KIND: &str = "type";
/// Discriminator value for a single-result descriptor.
pub(crate) const SINGLE_TAG: &str = "response";
/// Discriminator value for a paginated descriptor.
pub(crate) const PAGINATED_TAG: &str = "pagination";

/// Run the full pipeline: sanitize the handler value, then classify and
/// format it. The method selects the default status (`POST` → 201).
pub fn process(value: &Payload, method: &Method) -> (Envelope, StatusCode) {
    format(sanitize(value), *method == Method::POST)
}

/// Classify a sanitized value and emit the canonical envelope plus the
/// transport status. Never fails; see the module docs for the shape order.
pub fn format(value: Value, request_is_create: bool) -> (Envelope, StatusCode) {
    let default = if request_is_create {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    if let Value::Object(map) = &value {
        if let Some(out) = single_descriptor(map, default) {
            return out;
        }
        if tag(map) == Some(PAGINATED_TAG) {
            if let Some(params) = page_params(map) {
                trace!(shape = "pagination", "classified paginated descriptor");
                return paginated(map, params, default);
            }
        }
        if let Some(out) = canonical(map, default) {
            return out;
        }
        if let Some(params) = page_params(map) {
            trace!(shape = "bare-pagination", "classified untagged paginated data");
            return paginated(map, params, default);
        }
    }

    trace!(shape = "bare", "wrapped bare value");
    let envelope = Envelope::new(DEFAULT_MESSAGE, value, default.as_u16());
    (envelope, default)
}

/// Discriminator tag of a mapping, if any.
fn tag(map: &Map<String, Value>) -> Option<&str> {
    map.get(KIND).and_then(Value::as_str)
}

/// Explicitly supplied status, when it is an integer a status field can
/// hold. Any supplied integer is authoritative for the body, including 0.
fn explicit_status(map: &Map<String, Value>) -> Option<u16> {
    map.get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
}

/// Status the transport applies: the explicit one when it is a valid HTTP
/// code, the method default otherwise.
fn wire_status(explicit: Option<u16>, default: StatusCode) -> StatusCode {
    explicit
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(default)
}

/// Shape 1: a mapping tagged `"response"` carrying a string `message` and a
/// `data` field.
fn single_descriptor(
    map: &Map<String, Value>,
    default: StatusCode,
) -> Option<(Envelope, StatusCode)> {
    if tag(map) != Some(SINGLE_TAG) {
        return None;
    }
    let message = map.get("message")?.as_str()?.to_owned();
    let data = map.get("data")?.clone();

    let explicit = explicit_status(map);
    let body_status = explicit.unwrap_or(default.as_u16());
    trace!(
        shape = "response",
        status = u64::from(body_status),
        "classified single-result descriptor"
    );
    Some((
        Envelope::new(message, data, body_status),
        wire_status(explicit, default),
    ))
}

/// Shape 3: a mapping that already carries the four canonical fields with
/// canonical types. Passed through with a status re-applied from its own
/// `statusCode`.
fn canonical(map: &Map<String, Value>, default: StatusCode) -> Option<(Envelope, StatusCode)> {
    let message = map.get("message")?.as_str()?.to_owned();
    let data = map.get("data")?.clone();
    let status_code = explicit_status(map)?;
    let date = map.get("date")?.as_str()?.to_owned();

    trace!(
        shape = "canonical",
        status = u64::from(status_code),
        "passed through canonical envelope"
    );
    Some((
        Envelope {
            message,
            data,
            status_code,
            date,
        },
        wire_status(Some(status_code), default),
    ))
}

/// Upstream pagination fields, extracted from a mapping's nested `data`.
struct PageParams {
    items: Vec<Value>,
    total_count: u64,
    current_page: u64,
    page_size: u64,
}

/// Shapes 2 and 4 share this predicate: `data` must be a mapping holding an
/// `items` array and integer `totalCount`, `currentPage`, and a `pageSize`
/// of at least one. Anything less is malformed and falls through.
fn page_params(map: &Map<String, Value>) -> Option<PageParams> {
    let data = map.get("data")?.as_object()?;
    let items = data.get("items")?.as_array()?.clone();
    let total_count = data.get("totalCount").and_then(Value::as_u64)?;
    let current_page = data.get("currentPage").and_then(Value::as_u64)?;
    let page_size = data
        .get("pageSize")
        .and_then(Value::as_u64)
        .filter(|size| *size >= 1)?;

    Some(PageParams {
        items,
        total_count,
        current_page,
        page_size,
    })
}

/// Build the paginated envelope, recomputing every derived field.
fn paginated(
    map: &Map<String, Value>,
    params: PageParams,
    default: StatusCode,
) -> (Envelope, StatusCode) {
    let message = map
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_MESSAGE)
        .to_owned();
    let explicit = explicit_status(map);
    let body_status = explicit.unwrap_or(default.as_u16());

    let page = PageData::compute(
        params.items,
        params.total_count,
        params.current_page,
        params.page_size,
    );

    (
        Envelope::new(message, page.into_value(), body_status),
        wire_status(explicit, default),
    )
}
