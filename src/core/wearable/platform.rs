//! Trait seam to the platform's proximity messaging services.
//! The host supplies the concrete implementations; the bridge consumes node
//! discovery, message delivery and data sync as black boxes.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::core::wearable::error::Result;
use crate::core::wearable::types::{DataEvent, DataItem, MessageEvent, NodeId, WearableNode};

/// Stream of inbound message events.
pub type MessageStream = BoxStream<'static, MessageEvent>;

/// Stream of inbound data-event batches.
pub type DataEventStream = BoxStream<'static, Vec<DataEvent>>;

/// Node-discovery service
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Returns the currently connected wearable nodes. Order is unspecified.
    async fn connected_nodes(&self) -> Result<Vec<WearableNode>>;
}

/// Best-effort unicast message delivery to a node
#[async_trait]
pub trait MessageClient: Send + Sync {
    /// Sends a byte payload to the given node on a logical path.
    /// Resolves once the platform reports delivery success or failure.
    async fn send_message(&self, node: &NodeId, path: &str, payload: &[u8]) -> Result<()>;

    /// Subscribes to messages arriving from the wearable.
    ///
    /// At most one subscription per client instance; the stream stays live
    /// until it is dropped, which is the unregistration.
    async fn messages(&self) -> Result<MessageStream>;
}

/// Asynchronous, eventually-consistent key-value item propagation
#[async_trait]
pub trait DataClient: Send + Sync {
    /// Writes a data item for propagation to the paired device.
    /// Last-write-wins semantics come from the platform, not this crate.
    async fn put_data_item(&self, item: DataItem) -> Result<()>;

    /// Subscribes to change notifications pushed by the wearable.
    async fn data_events(&self) -> Result<DataEventStream>;
}
