//! Defines shared data structures for the wearable module.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier for a connected companion device.
///
/// Node ids come from the platform's discovery service and are only valid
/// for the send they were fetched for; they are never cached across
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A wearable node reported by the platform's discovery service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WearableNode {
    /// Platform-assigned identifier for the node
    pub id: NodeId,
    /// The display name of the node, if available
    pub name: Option<String>,
    /// Whether the node is directly reachable
    pub is_nearby: bool,
}

impl WearableNode {
    /// Creates a new WearableNode instance
    pub fn new(id: NodeId, name: Option<String>, is_nearby: bool) -> Self {
        Self { id, name, is_nearby }
    }
}

/// An inbound message delivered by the platform messaging service
#[derive(Debug, Clone)]
pub struct MessageEvent {
    /// Node the message originated from
    pub source: NodeId,
    /// Logical channel the message arrived on
    pub path: String,
    /// Raw message payload
    pub payload: Vec<u8>,
    /// When this bridge received the event
    pub received_at: DateTime<Utc>,
}

impl MessageEvent {
    pub fn new(source: NodeId, path: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            source,
            path: path.into(),
            payload,
            received_at: Utc::now(),
        }
    }
}

/// A typed value stored in a data item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Integer(i64),
    Text(String),
    Blob(Vec<u8>),
}

impl DataValue {
    /// Returns the integer value, if this value holds one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DataValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text value, if this value holds one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// A key-value item synchronized to the paired device.
/// Propagation is asynchronous and last-write-wins, both provided by the
/// platform's data-sync service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataItem {
    /// Logical path the item lives under
    pub path: String,
    /// Typed fields of the item
    pub fields: HashMap<String, DataValue>,
}

impl DataItem {
    /// Creates an empty data item at the given path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fields: HashMap::new(),
        }
    }

    /// Adds a field to the item
    pub fn with_field(mut self, key: impl Into<String>, value: DataValue) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Reads an integer field, if present and of the right type.
    pub fn integer(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(DataValue::as_integer)
    }
}

/// The kind of change carried by a data event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataEventKind {
    Changed,
    Deleted,
}

impl std::fmt::Display for DataEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataEventKind::Changed => write!(f, "changed"),
            DataEventKind::Deleted => write!(f, "deleted"),
        }
    }
}

/// A single change notification from the data-sync service.
/// The platform delivers these in batches, one batch per callback.
#[derive(Debug, Clone)]
pub struct DataEvent {
    pub kind: DataEventKind,
    pub item: DataItem,
    /// When this bridge received the event
    pub received_at: DateTime<Utc>,
}

impl DataEvent {
    pub fn new(kind: DataEventKind, item: DataItem) -> Self {
        Self {
            kind,
            item,
            received_at: Utc::now(),
        }
    }
}

/// Thread-safe single-slot holder for the most recent acknowledgment
/// string received from the wearable. Overwritten on each receipt, no
/// history. Written from the inbound listener task, readable from any
/// thread through the locked accessor.
#[derive(Debug, Clone, Default)]
pub(crate) struct AckSlot {
    inner: Arc<Mutex<Option<String>>>,
}

impl AckSlot {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn store(&self, ack: String) {
        *self.inner.lock().unwrap() = Some(ack);
    }

    pub(crate) fn get(&self) -> Option<String> {
        self.inner.lock().unwrap().clone()
    }
}
