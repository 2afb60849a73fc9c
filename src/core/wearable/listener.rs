//! Inbound event handling for the wearable bridge
//! This module runs one task per platform subscription and routes the
//! events the bridge cares about.

use futures_util::StreamExt;
use log::{debug, info};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::core::wearable::constants::{
    APP_OPEN_ACK_PAYLOAD, APP_OPEN_PATH, INTERVAL_FROM_WATCH_PATH, INTERVAL_KEY,
};
use crate::core::wearable::platform::{DataEventStream, MessageStream};
use crate::core::wearable::types::{AckSlot, DataEvent, DataEventKind, MessageEvent};

/// Listener half of the bridge: consumes the platform's inbound streams.
pub(crate) struct InboundListener {
    ack_slot: AckSlot,
}

impl InboundListener {
    pub(crate) fn new(ack_slot: AckSlot) -> Self {
        Self { ack_slot }
    }

    /// Spawns both listener tasks onto the bridge's task group.
    /// They run until their stream ends or the token is cancelled.
    pub(crate) fn spawn(
        self,
        tasks: &TaskTracker,
        cancel: CancellationToken,
        messages: MessageStream,
        data_events: DataEventStream,
    ) {
        let ack_slot = self.ack_slot.clone();
        let message_cancel = cancel.clone();
        tasks.spawn(async move {
            Self::process_messages(messages, ack_slot, message_cancel).await;
        });
        tasks.spawn(async move {
            Self::process_data_events(data_events, cancel).await;
        });
    }

    /// Processes inbound messages until cancellation
    async fn process_messages(
        mut messages: MessageStream,
        ack_slot: AckSlot,
        cancel: CancellationToken,
    ) {
        info!("Listening for wearable messages...");

        loop {
            tokio::select! {
                event = messages.next() => {
                    match event {
                        Some(event) => Self::handle_message(&event, &ack_slot),
                        None => {
                            info!("Message stream ended");
                            break;
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }

        info!("Message listener stopped");
    }

    /// Processes inbound data-event batches until cancellation
    async fn process_data_events(mut data_events: DataEventStream, cancel: CancellationToken) {
        info!("Listening for wearable data events...");

        loop {
            tokio::select! {
                batch = data_events.next() => {
                    match batch {
                        Some(batch) => Self::handle_data_events(&batch),
                        None => {
                            info!("Data event stream ended");
                            break;
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }

        info!("Data event listener stopped");
    }

    /// Handles a single inbound message. Only the exact acknowledgment
    /// payload on the app-open path changes any state; everything else is
    /// logged and ignored.
    fn handle_message(event: &MessageEvent, ack_slot: &AckSlot) {
        match std::str::from_utf8(&event.payload) {
            Ok(text) => {
                debug!("Received message on {} from {}: {}", event.path, event.source, text);

                if event.path == APP_OPEN_PATH && text == APP_OPEN_ACK_PAYLOAD {
                    ack_slot.store(text.to_string());
                    info!("Acknowledgment received from wearable device");
                }
            }
            Err(_) => {
                debug!(
                    "Received non-UTF-8 message on {} ({} bytes), ignoring",
                    event.path,
                    event.payload.len()
                );
            }
        }
    }

    /// Handles a batch of data events. Intervals reported by the watch are
    /// logged and deliberately not applied to any host state.
    fn handle_data_events(batch: &[DataEvent]) {
        for event in batch {
            if event.kind != DataEventKind::Changed {
                debug!("Ignoring {} event on {}", event.kind, event.item.path);
                continue;
            }
            if event.item.path != INTERVAL_FROM_WATCH_PATH {
                debug!("Ignoring data event on unknown path {}", event.item.path);
                continue;
            }

            match event.item.integer(INTERVAL_KEY) {
                Some(interval) => {
                    info!("Wearable reported interval: {}", interval);
                }
                None => {
                    debug!(
                        "Data item on {} without a usable '{}' field, skipping",
                        event.item.path, INTERVAL_KEY
                    );
                }
            }
        }
    }
}
