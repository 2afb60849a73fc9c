//! Wearable messaging functionality for the bridge
//! This module handles node discovery, outbound sends and inbound
//! message/data callbacks from the paired device.

mod bridge;
mod constants;
mod error;
mod listener;
mod platform;
mod types;

// Re-export types that should be publicly accessible
pub use bridge::WearableBridge;
pub use constants::*; // Re-export all constants
pub use error::{BridgeError, Result};
pub use platform::{DataClient, DataEventStream, MessageClient, MessageStream, NodeClient};
pub use types::{DataEvent, DataEventKind, DataItem, DataValue, MessageEvent, NodeId, WearableNode};
