//! Wearable companion bridge library
//! This is the messaging bridge between a host application and a paired
//! wearable device, built on the platform's proximity messaging services.

// Module declarations
pub mod config;
pub mod core;

// Re-export the public surface
pub use crate::config::BridgeConfig;
pub use crate::core::wearable::{
    ALARM_INTERVAL_PATH, APP_OPEN_ACK_PAYLOAD, APP_OPEN_PATH, APP_OPEN_PAYLOAD, BridgeError,
    DataClient, DataEvent, DataEventKind, DataEventStream, DataItem, DataValue,
    INTERVAL_FROM_WATCH_PATH, INTERVAL_KEY, MessageClient, MessageEvent, MessageStream, NodeClient,
    NodeId, Result, WearableBridge, WearableNode,
};

/// Initialize logging
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::info!("Logging initialized");
    }
}
