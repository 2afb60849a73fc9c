//! Wearable bridge for the host application
//! This module provides the main interface for companion-device messaging:
//! outbound sends, inbound listener registration and teardown.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{error, info, warn};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::config::BridgeConfig;
use crate::core::wearable::constants::{ALARM_INTERVAL_PATH, APP_OPEN_PATH, APP_OPEN_PAYLOAD, INTERVAL_KEY};
use crate::core::wearable::error::{BridgeError, Result};
use crate::core::wearable::listener::InboundListener;
use crate::core::wearable::platform::{DataClient, MessageClient, NodeClient};
use crate::core::wearable::types::{AckSlot, DataItem, DataValue};

/// Bridge between the host application and a paired wearable device.
///
/// Construction subscribes to both inbound event streams and spawns their
/// listener tasks; [`WearableBridge::dispose`] cancels and awaits everything.
/// Send operations are fire-and-forget: each runs on a supervised task group
/// so a failure in one outbound call cannot cancel its siblings, and errors
/// are logged and swallowed rather than surfaced to the host.
pub struct WearableBridge {
    node_client: Arc<dyn NodeClient>,
    message_client: Arc<dyn MessageClient>,
    data_client: Arc<dyn DataClient>,
    config: BridgeConfig,
    ack_slot: AckSlot,
    tasks: TaskTracker,
    cancel: CancellationToken,
    disposed: AtomicBool,
}

impl WearableBridge {
    /// Creates a new bridge and registers the inbound listeners.
    pub async fn new(
        node_client: Arc<dyn NodeClient>,
        message_client: Arc<dyn MessageClient>,
        data_client: Arc<dyn DataClient>,
        config: BridgeConfig,
    ) -> Result<Self> {
        let messages = message_client.messages().await?;
        let data_events = data_client.data_events().await?;

        let ack_slot = AckSlot::new();
        let tasks = TaskTracker::new();
        let cancel = CancellationToken::new();

        InboundListener::new(ack_slot.clone()).spawn(
            &tasks,
            cancel.clone(),
            messages,
            data_events,
        );
        info!("Wearable bridge initialized, inbound listeners registered");

        Ok(Self {
            node_client,
            message_client,
            data_client,
            config,
            ack_slot,
            tasks,
            cancel,
            disposed: AtomicBool::new(false),
        })
    }

    /// Sends the app-open handshake payload to a connected node.
    ///
    /// Discovers the currently connected nodes and sends
    /// [`APP_OPEN_PAYLOAD`](crate::APP_OPEN_PAYLOAD) on the app-open path to
    /// one of them. The discovery result is unordered, so which node
    /// receives the ping is unspecified. With no node connected the absence
    /// is logged and nothing is sent.
    pub fn send_acknowledgment_ping(&self) {
        let node_client = self.node_client.clone();
        let message_client = self.message_client.clone();
        let limit = self.send_timeout();

        self.spawn_send("acknowledgment ping", async move {
            let nodes = with_timeout(limit, node_client.connected_nodes()).await?;
            let Some(node) = nodes.first() else {
                return Err(BridgeError::NoNodesConnected);
            };

            with_timeout(
                limit,
                message_client.send_message(&node.id, APP_OPEN_PATH, APP_OPEN_PAYLOAD.as_bytes()),
            )
            .await?;

            info!("Acknowledgment ping sent to node {}", node.id);
            Ok(())
        });
    }

    /// Writes the alarm interval as a data item for sync to the wearable.
    pub fn send_interval_update(&self, interval: i64) {
        let data_client = self.data_client.clone();
        let limit = self.send_timeout();

        self.spawn_send("interval update", async move {
            let item = DataItem::new(ALARM_INTERVAL_PATH)
                .with_field(INTERVAL_KEY, DataValue::Integer(interval));
            with_timeout(limit, data_client.put_data_item(item)).await?;

            info!("Interval update ({}) queued for sync", interval);
            Ok(())
        });
    }

    /// Returns the most recent acknowledgment received from the wearable.
    pub fn current_acknowledgment(&self) -> Option<String> {
        self.ack_slot.get()
    }

    /// Whether the bridge has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Unregisters the listeners and awaits all outstanding work.
    ///
    /// Idempotent. After this returns no inbound callback can reach the
    /// bridge and new send operations are refused. Failing to call this
    /// leaks the listener tasks for the process lifetime.
    pub async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        info!("Disposing wearable bridge");
        self.cancel.cancel();
        self.tasks.close();
        self.tasks.wait().await;
        info!("Wearable bridge disposed");
    }

    /// Runs an outbound operation on the supervised task group. Errors are
    /// logged and swallowed here; nothing propagates to the caller.
    fn spawn_send(&self, label: &'static str, op: impl Future<Output = Result<()>> + Send + 'static) {
        if self.is_disposed() {
            warn!("Bridge disposed, dropping {}", label);
            return;
        }

        let cancel = self.cancel.clone();
        self.tasks.spawn(async move {
            tokio::select! {
                result = op => {
                    match result {
                        Ok(()) => {}
                        Err(BridgeError::NoNodesConnected) => {
                            warn!("No connected wearable devices found, skipping {}", label);
                        }
                        Err(e) => {
                            error!("Failed to send {}: {}", label, e);
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("Cancelled {} during disposal", label);
                }
            }
        });
    }

    fn send_timeout(&self) -> Option<Duration> {
        self.config.send_timeout_ms.map(Duration::from_millis)
    }
}

/// Bounds a platform call when a send timeout is configured. Without one
/// the call may suspend indefinitely; that only holds up its own supervised
/// task, never the host.
async fn with_timeout<T>(
    limit: Option<Duration>,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| BridgeError::Timeout(format!("platform call exceeded {:?}", limit)))?,
        None => call.await,
    }
}
