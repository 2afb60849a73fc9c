use thiserror::Error;

/// Errors raised by the bridge and the platform services behind it.
///
/// None of these cross the host boundary. Every send operation logs its
/// error and swallows it, so a wearable-communication failure can never
/// affect the host application's primary function.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("no connected wearable devices found")]
    NoNodesConnected,

    #[error("node discovery failed: {0}")]
    Discovery(String),

    #[error("message send failed: {0}")]
    Send(String),

    #[error("data sync failed: {0}")]
    DataSync(String),

    #[error("event subscription failed: {0}")]
    Subscription(String),

    #[error("operation timed out: {0}")]
    Timeout(String),

    #[error("bridge already disposed")]
    Disposed,
}

pub type Result<T> = std::result::Result<T, BridgeError>;
