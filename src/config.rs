//! Bridge configuration
//! This module defines the tunables the host can set when constructing the
//! bridge. Persistence, if any, is the host's concern.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Upper bound in milliseconds for a single outbound platform call.
    /// `None` leaves the call unbounded, matching the platform's own
    /// behavior; a slow platform then only holds up its own supervised
    /// task, never the host.
    pub send_timeout_ms: Option<u64>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            send_timeout_ms: None,
        }
    }
}

impl BridgeConfig {
    /// Config with a send timeout applied to outbound platform calls.
    pub fn with_send_timeout_ms(timeout_ms: u64) -> Self {
        BridgeConfig {
            send_timeout_ms: Some(timeout_ms),
        }
    }
}
