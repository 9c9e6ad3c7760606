//! Trigger events sent by the device host to the bridge.
//!
//! Each datagram from the device is one JSON object tagged by `event`, e.g.
//! `{"event":"ready"}` or `{"event":"webviewclosed","response":"..."}`.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ParseError;

/// An externally originating signal the bridge reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Trigger {
    /// The device runtime finished initializing.
    #[serde(rename = "ready")]
    Ready,
    /// The device asked for fresh data. Payload contents are not inspected.
    #[serde(rename = "appmessage")]
    AppMessage,
    /// The user asked to open the settings page.
    #[serde(rename = "showConfiguration")]
    ShowConfiguration,
    /// The settings page closed and returned `response`.
    #[serde(rename = "webviewclosed")]
    WebviewClosed {
        /// Raw, possibly URL-encoded, configuration payload.
        response: String,
    },
}

/// Payload-free discriminant of [`Trigger`], used as the dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum TriggerKind {
    /// Device runtime finished initializing.
    #[strum(serialize = "ready")]
    Ready,
    /// Device asked for fresh data.
    #[strum(serialize = "appmessage")]
    AppMessage,
    /// User asked to open the settings page.
    #[strum(serialize = "showConfiguration")]
    ShowConfiguration,
    /// Settings page closed.
    #[strum(serialize = "webviewclosed")]
    WebviewClosed,
}

impl Trigger {
    /// Dispatch key for this trigger.
    pub fn kind(&self) -> TriggerKind {
        match self {
            Trigger::Ready => TriggerKind::Ready,
            Trigger::AppMessage => TriggerKind::AppMessage,
            Trigger::ShowConfiguration => TriggerKind::ShowConfiguration,
            Trigger::WebviewClosed { .. } => TriggerKind::WebviewClosed,
        }
    }

    /// Encode the trigger to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ParseError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a trigger datagram.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
