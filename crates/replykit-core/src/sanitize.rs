//! Deep serializer for replykit
//!
//! Walks an arbitrary [`Payload`] graph and returns an isomorphic
//! [`serde_json::Value`] in which every node is JSON-safe: null, boolean,
//! number, string, array, or string-keyed object.
//!
//! # Coercion rules
//!
//! Applied in priority order, first match wins:
//!
//! | Input | Output |
//! |-------|--------|
//! | Null | `null` |
//! | Integer outside ±(2^53 − 1) | exact decimal string |
//! | Timestamp | ISO-8601 UTC string (`…Z`, millisecond precision) |
//! | Fixed-point decimal | exact decimal string |
//! | List | array, order preserved |
//! | Binary buffer | base64 string |
//! | Map (arbitrary keys) | object; keys sanitized, then stringified |
//! | Set | array of members in iteration order |
//! | Pattern | `/source/flags` string |
//! | Record | object, fields under their original keys |
//! | Other primitives | unchanged |
//!
//! Precision-sensitive numerics are encoded as strings rather than JSON
//! numbers because a binary double silently truncates their digits.
//!
//! # Cycle protection
//!
//! A per-call set of currently-visited node identities guards every descent
//! into a structured node. Re-entering a node that is still on the visiting
//! path emits the literal string `"[Circular]"` instead of recursing. The
//! identity is removed once its subtree finishes, so a node reached twice
//! via independent, non-cyclic paths serializes in full both times.

use crate::payload::{Payload, Shared};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Largest integer magnitude a JSON number can carry without loss.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Marker emitted in place of a node that is already on the visiting path.
pub const CIRCULAR: &str = "[Circular]";

/// Recursively coerce `value` into a JSON-safe representation.
///
/// Terminates on any finite-depth graph, including cyclic ones, and never
/// fails. See the module docs for the full rule table.
pub fn sanitize(value: &Payload) -> Value {
    let mut visiting = HashSet::new();
    walk(value, &mut visiting)
}

/// ISO-8601 rendering shared by timestamp coercion and envelope stamping.
pub(crate) fn iso8601(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn walk(value: &Payload, visiting: &mut HashSet<usize>) -> Value {
    match value {
        Payload::Null => Value::Null,
        Payload::Bool(b) => Value::Bool(*b),
        Payload::Int(v) => {
            if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(v) {
                Value::from(*v)
            } else {
                Value::String(v.to_string())
            }
        }
        Payload::Big(v) => {
            const SAFE: i128 = MAX_SAFE_INTEGER as i128;
            if (-SAFE..=SAFE).contains(v) {
                Value::from(*v as i64)
            } else {
                Value::String(v.to_string())
            }
        }
        // Non-finite floats have no JSON number form and become null.
        Payload::Float(v) => Value::from(*v),
        Payload::Decimal(v) => Value::String(v.to_string()),
        Payload::Timestamp(ts) => Value::String(iso8601(ts)),
        Payload::Text(s) => Value::String(s.clone()),
        Payload::Bytes(buf) => Value::String(STANDARD.encode(buf)),
        Payload::Pattern(p) => Value::String(format!("/{}/{}", p.source, p.flags)),
        Payload::List(node) | Payload::Set(node) => guarded(node, visiting, |members, visiting| {
            Value::Array(members.iter().map(|m| walk(m, visiting)).collect())
        }),
        Payload::Map(node) => guarded(node, visiting, |entries, visiting| {
            let mut out = Map::new();
            for (key, val) in entries {
                let key = map_key(&walk(key, visiting));
                let val = walk(val, visiting);
                out.insert(key, val);
            }
            Value::Object(out)
        }),
        Payload::Record(node) => guarded(node, visiting, |fields, visiting| {
            let mut out = Map::new();
            for (key, val) in fields {
                out.insert(key.clone(), walk(val, visiting));
            }
            Value::Object(out)
        }),
    }
}

/// Descend into a structured node unless it is already being visited.
///
/// The identity check happens before the node is borrowed, so cyclic graphs
/// never re-enter a lock they already hold.
fn guarded<T>(
    node: &Shared<T>,
    visiting: &mut HashSet<usize>,
    f: impl FnOnce(&T, &mut HashSet<usize>) -> Value,
) -> Value {
    let id = node.id();
    if !visiting.insert(id) {
        return Value::String(CIRCULAR.to_owned());
    }
    let out = node.with(|inner| f(inner, visiting));
    visiting.remove(&id);
    out
}

/// Render a sanitized key as a map key string.
///
/// Sanitized strings are used verbatim; every other value is rendered as
/// compact JSON text (`1` → `"1"`, `true` → `"true"`, `[1,2]` → `"[1,2]"`).
fn map_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
