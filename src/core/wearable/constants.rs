//! Constants used throughout the bridge
//! This module contains the channel paths, payload strings and data-map
//! keys shared with the wearable app.

/// Logical channel for the app-open handshake, in both directions.
pub const APP_OPEN_PATH: &str = "/APP_OPEN_WEARABLE_PAYLOAD";

/// Payload sent to the wearable on the app-open channel.
pub const APP_OPEN_PAYLOAD: &str = "AppOpenWearable";

/// Payload the wearable replies with on the app-open channel.
pub const APP_OPEN_ACK_PAYLOAD: &str = "AppOpenWearableACK";

/// Data-sync path for interval updates pushed to the wearable.
pub const ALARM_INTERVAL_PATH: &str = "/alarm_interval";

/// Data-sync path for intervals reported back by the wearable.
pub const INTERVAL_FROM_WATCH_PATH: &str = "/interval_from_watch";

/// Key of the integer field carried by both interval data items.
pub const INTERVAL_KEY: &str = "interval";
