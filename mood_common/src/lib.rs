//!
//! Common types and utilities shared by the mood bridge and the device simulator.
//!
//! This crate aggregates:
//! - `error` — unified error type `MoodError` and the payload `ParseError`.
//! - `result` — handy `Result<T, MoodError>` alias.
//! - `message` — the three-key record delivered to the device and its `Trend` code.
//! - `quote` — provider quote decoding and the `QuoteNormalizer`.
//! - `options` — settings page payloads and the `ConfigBridge` decoder.
//! - `trigger` — events the device host sends to the bridge.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod error;
pub mod message;
pub mod net;
pub mod options;
pub mod quote;
pub mod result;
pub mod trigger;

pub use error::{MoodError, ParseError};
pub use message::{DeviceMessage, Trend};
pub use options::{ConfigBridge, ConfigOutcome, Options};
pub use quote::QuoteNormalizer;
pub use result::Result;
pub use trigger::{Trigger, TriggerKind};
