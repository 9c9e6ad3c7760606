//! Error types shared between the bridge and the device simulator.
//!
//! The `MoodError` enum unifies the failure cases of the quote pipeline
//! (transport, parse, delivery) with the I/O, serialization and channel errors of
//! the binaries, allowing crates to propagate a single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the bridge and the device.
#[derive(Error, Debug)]
pub enum MoodError {
    /// The quote provider could not be reached or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A quote or configuration payload failed validation.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The paired device did not accept an outbound message.
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// I/O error originating from the standard library or sockets.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding a wire message via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// A background task panicked or was aborted before reporting.
    #[error("Task failed: {0}")]
    Task(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for MoodError {
    fn from(err: PoisonError<T>) -> Self {
        MoodError::MutexLock(err.to_string())
    }
}

/// Validation failures for untrusted quote and configuration payloads.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The payload is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A required field is absent or `null`.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A field is present but holds a value of the wrong shape.
    #[error("field `{field}` must be {expected}")]
    WrongType {
        /// Name of the offending field (`$` for the document root).
        field: &'static str,
        /// Human-readable description of the expected value.
        expected: &'static str,
    },

    /// The configuration payload is not valid percent-encoded UTF-8.
    #[error("invalid URL encoding: {0}")]
    InvalidEncoding(String),

    /// The configuration selected a blank ticker symbol.
    #[error("symbol must not be blank")]
    EmptySymbol,
}
