//! Shared test fixtures: a channel-backed fake of the platform services.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::sync::mpsc;

use wearable_bridge::{
    BridgeError, DataClient, DataEvent, DataEventStream, DataItem, MessageClient, MessageEvent,
    MessageStream, NodeClient, NodeId, Result, WearableNode,
};

/// An outbound message recorded by the fake.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub node: NodeId,
    pub path: String,
    pub payload: Vec<u8>,
}

/// In-process fake of the node-discovery, messaging and data-sync services.
/// Records everything the bridge sends and feeds inbound events through
/// buffered channels.
pub struct FakePlatform {
    pub nodes: Mutex<Vec<WearableNode>>,
    pub discovery_error: Mutex<Option<String>>,
    pub sent_messages: Mutex<Vec<SentMessage>>,
    pub data_items: Mutex<Vec<DataItem>>,
    /// When set, send/put calls suspend forever (for timeout tests).
    pub hang_sends: Mutex<bool>,
    message_tx: mpsc::Sender<MessageEvent>,
    data_tx: mpsc::Sender<Vec<DataEvent>>,
    message_rx: Mutex<Option<mpsc::Receiver<MessageEvent>>>,
    data_rx: Mutex<Option<mpsc::Receiver<Vec<DataEvent>>>>,
}

impl FakePlatform {
    pub fn new() -> Arc<Self> {
        let (message_tx, message_rx) = mpsc::channel(16);
        let (data_tx, data_rx) = mpsc::channel(16);

        Arc::new(Self {
            nodes: Mutex::new(Vec::new()),
            discovery_error: Mutex::new(None),
            sent_messages: Mutex::new(Vec::new()),
            data_items: Mutex::new(Vec::new()),
            hang_sends: Mutex::new(false),
            message_tx,
            data_tx,
            message_rx: Mutex::new(Some(message_rx)),
            data_rx: Mutex::new(Some(data_rx)),
        })
    }

    /// A platform with a single connected node.
    pub fn with_node(id: &str) -> Arc<Self> {
        let platform = Self::new();
        platform.add_node(id);
        platform
    }

    pub fn add_node(&self, id: &str) {
        self.nodes.lock().unwrap().push(WearableNode::new(
            NodeId::new(id),
            Some("Test Watch".to_string()),
            true,
        ));
    }

    pub fn fail_discovery(&self, reason: &str) {
        *self.discovery_error.lock().unwrap() = Some(reason.to_string());
    }

    pub fn set_hang_sends(&self, hang: bool) {
        *self.hang_sends.lock().unwrap() = hang;
    }

    pub async fn push_message(&self, path: &str, payload: &[u8]) {
        let event = MessageEvent::new(NodeId::new("watch-node"), path, payload.to_vec());
        // After dispose the listener task has dropped the receiver; a send then
        // fails with SendError. Tolerate that so post-disposal pushes are a
        // no-op rather than a harness panic.
        let _ = self.message_tx.send(event).await;
    }

    pub async fn push_data_events(&self, batch: Vec<DataEvent>) {
        self.data_tx.send(batch).await.unwrap();
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }

    pub fn data_item_count(&self) -> usize {
        self.data_items.lock().unwrap().len()
    }

    async fn maybe_hang(&self) {
        if *self.hang_sends.lock().unwrap() {
            futures_util::future::pending::<()>().await;
        }
    }
}

fn receiver_stream<T: Send + 'static>(rx: mpsc::Receiver<T>) -> futures_util::stream::BoxStream<'static, T> {
    futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|item| (item, rx))
    })
    .boxed()
}

#[async_trait]
impl NodeClient for FakePlatform {
    async fn connected_nodes(&self) -> Result<Vec<WearableNode>> {
        if let Some(reason) = self.discovery_error.lock().unwrap().clone() {
            return Err(BridgeError::Discovery(reason));
        }
        Ok(self.nodes.lock().unwrap().clone())
    }
}

#[async_trait]
impl MessageClient for FakePlatform {
    async fn send_message(&self, node: &NodeId, path: &str, payload: &[u8]) -> Result<()> {
        self.maybe_hang().await;
        self.sent_messages.lock().unwrap().push(SentMessage {
            node: node.clone(),
            path: path.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }

    async fn messages(&self) -> Result<MessageStream> {
        let rx = self
            .message_rx
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| BridgeError::Subscription("message stream already taken".to_string()))?;
        Ok(receiver_stream(rx))
    }
}

#[async_trait]
impl DataClient for FakePlatform {
    async fn put_data_item(&self, item: DataItem) -> Result<()> {
        self.maybe_hang().await;
        self.data_items.lock().unwrap().push(item);
        Ok(())
    }

    async fn data_events(&self) -> Result<DataEventStream> {
        let rx = self
            .data_rx
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| BridgeError::Subscription("data stream already taken".to_string()))?;
        Ok(receiver_stream(rx))
    }
}
