//! Handler value model for replykit
//!
//! Handlers return heterogeneous shapes: domain records, lists, maps keyed by
//! non-string values, binary buffers, timestamps, precision-sensitive
//! numerics. [`Payload`] is the closed set of those shapes. It is what the
//! deep serializer consumes; nothing outside this enum ever reaches the
//! pipeline.
//!
//! Structured variants hold [`Shared`] handles. A handle can be cloned and
//! referenced from several places in the same graph, which is what makes
//! aliased and cyclic graphs expressible:
//!
//! ```rust
//! use replykit_core::{sanitize, Payload, Shared};
//! use serde_json::json;
//!
//! let node = Shared::new(vec![("name".to_string(), Payload::from("alice"))]);
//! node.insert("self", Payload::Record(node.clone()));
//!
//! // The serializer breaks the cycle with a marker instead of recursing.
//! assert_eq!(
//!     sanitize(&Payload::Record(node)),
//!     json!({ "name": "alice", "self": "[Circular]" })
//! );
//! ```

use bytes::Bytes;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Field list backing a [`Payload::Record`].
pub type Fields = Vec<(String, Payload)>;

/// Entry list backing a [`Payload::Map`]. Keys are arbitrary payloads.
pub type Entries = Vec<(Payload, Payload)>;

/// Member list backing a [`Payload::List`] or [`Payload::Set`].
pub type Members = Vec<Payload>;

/// A shared, identity-bearing handle to a structured node.
///
/// Cloning a handle yields another reference to the same node, so two
/// fields holding clones of one handle alias a single record. The pipeline
/// keys its cycle detection on the handle's pointer identity, never on
/// value equality.
pub struct Shared<T>(Arc<RwLock<T>>);

impl<T> Shared<T> {
    /// Wrap a value in a new shared handle.
    pub fn new(inner: T) -> Self {
        Self(Arc::new(RwLock::new(inner)))
    }

    /// Stable identity of this node for the lifetime of the handle.
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    /// Run `f` against the node's contents.
    ///
    /// A poisoned lock is recovered rather than propagated: the pipeline
    /// must stay total even if a writer panicked mid-update.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = match self.0.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&guard)
    }

    /// Mutate the node's contents.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut guard = match self.0.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard);
    }
}

impl Shared<Fields> {
    /// Append a field to a record node.
    pub fn insert(&self, key: impl Into<String>, value: Payload) {
        let key = key.into();
        self.update(|fields| fields.push((key, value)));
    }
}

impl Shared<Entries> {
    /// Append an entry to a map node.
    pub fn entry(&self, key: Payload, value: Payload) {
        self.update(|entries| entries.push((key, value)));
    }
}

impl Shared<Members> {
    /// Append a member to a list or set node.
    pub fn push(&self, value: Payload) {
        self.update(|members| members.push(value));
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

// Printing contents would recurse forever on cyclic graphs, so Debug only
// shows the node identity.
impl<T> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared({:#x})", self.id())
    }
}

/// A regular-expression value: pattern source plus flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Pattern source, without delimiters.
    pub source: String,
    /// Flag characters, possibly empty.
    pub flags: String,
}

impl Pattern {
    /// Create a pattern from source text and flags.
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }
}

/// A handler-produced value prior to wire normalization.
///
/// Scalar variants are plain values; `List`, `Set`, `Map` and `Record` are
/// [`Shared`] nodes so the same node may appear at several points of a graph,
/// including cyclically.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// Integer wider than 64 bits of practical range.
    Big(i128),
    /// Binary floating point number.
    Float(f64),
    /// Fixed-point decimal; never coerced through a binary float.
    Decimal(Decimal),
    /// UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// Text.
    Text(String),
    /// Raw binary buffer.
    Bytes(Bytes),
    /// Regular-expression value.
    Pattern(Pattern),
    /// Ordered sequence.
    List(Shared<Members>),
    /// Distinct-member container, kept in iteration order.
    Set(Shared<Members>),
    /// Associative container whose keys are arbitrary payloads.
    Map(Shared<Entries>),
    /// Plain key-value structure: domain records, DTOs.
    Record(Shared<Fields>),
}

impl Payload {
    /// Build a list from an iterator of members.
    pub fn list(items: impl IntoIterator<Item = Payload>) -> Self {
        Payload::List(Shared::new(items.into_iter().collect()))
    }

    /// Build a set from an iterator of members, in iteration order.
    pub fn set(members: impl IntoIterator<Item = Payload>) -> Self {
        Payload::Set(Shared::new(members.into_iter().collect()))
    }

    /// Build a map from key/value pairs. Keys may be any payload.
    pub fn map(entries: impl IntoIterator<Item = (Payload, Payload)>) -> Self {
        Payload::Map(Shared::new(entries.into_iter().collect()))
    }

    /// Build a record from named fields.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Payload)>) -> Self {
        Payload::Record(Shared::new(
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build a pattern value.
    pub fn pattern(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Payload::Pattern(Pattern::new(source, flags))
    }

    /// Whether this payload is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Payload::Null)
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Null
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Payload::Null
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Payload::Bool(value)
    }
}

impl From<i32> for Payload {
    fn from(value: i32) -> Self {
        Payload::Int(value.into())
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Payload::Int(value)
    }
}

impl From<u32> for Payload {
    fn from(value: u32) -> Self {
        Payload::Int(value.into())
    }
}

impl From<u64> for Payload {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Payload::Int(v),
            Err(_) => Payload::Big(value.into()),
        }
    }
}

impl From<i128> for Payload {
    fn from(value: i128) -> Self {
        Payload::Big(value)
    }
}

impl From<f64> for Payload {
    fn from(value: f64) -> Self {
        Payload::Float(value)
    }
}

impl From<Decimal> for Payload {
    fn from(value: Decimal) -> Self {
        Payload::Decimal(value)
    }
}

impl From<DateTime<Utc>> for Payload {
    fn from(value: DateTime<Utc>) -> Self {
        Payload::Timestamp(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_owned())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<Bytes> for Payload {
    fn from(value: Bytes) -> Self {
        Payload::Bytes(value)
    }
}

impl From<Vec<Payload>> for Payload {
    fn from(items: Vec<Payload>) -> Self {
        Payload::list(items)
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Payload::Null,
        }
    }
}
