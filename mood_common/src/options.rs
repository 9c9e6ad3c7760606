//! Configuration payloads returned by the settings web view.
//!
//! When the settings page closes it hands back a URL-encoded JSON object such as
//! `%7B%22symbol%22%3A%22AAPL%22%7D`. Closing the page without saving yields an
//! empty string, the literal `CANCELLED`, or an empty object; those are not
//! errors. Anything else must decode to an object with a non-blank `symbol`.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;

/// Literal some hosts return when the user dismisses the settings page.
pub const CANCELLED: &str = "CANCELLED";
/// Options field holding the selected ticker.
pub const SYMBOL_OPTION: &str = "symbol";

/// User-selected options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Selected ticker, trimmed and upper-cased.
    pub symbol: String,
}

/// Result of decoding a configuration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOutcome {
    /// The page was closed without a selection.
    Cancelled,
    /// The user picked new options.
    Selected(Options),
}

/// Decoder for settings web view payloads.
pub struct ConfigBridge;

impl ConfigBridge {
    /// Decode `raw` into options, distinguishing a cancelled page from a malformed payload.
    pub fn decode(raw: &str) -> Result<ConfigOutcome, ParseError> {
        let raw = raw.trim();
        if is_cancelled(raw) {
            return Ok(ConfigOutcome::Cancelled);
        }

        let decoded =
            urlencoding::decode(raw).map_err(|e| ParseError::InvalidEncoding(e.to_string()))?;
        let decoded = decoded.trim();
        if is_cancelled(decoded) {
            return Ok(ConfigOutcome::Cancelled);
        }

        let value: Value = serde_json::from_str(decoded)?;
        let object = value.as_object().ok_or(ParseError::WrongType {
            field: "$",
            expected: "a JSON object",
        })?;

        let symbol = match object.get(SYMBOL_OPTION) {
            None | Some(Value::Null) => return Err(ParseError::MissingField(SYMBOL_OPTION)),
            Some(Value::String(symbol)) => symbol.trim().to_ascii_uppercase(),
            Some(_) => {
                return Err(ParseError::WrongType {
                    field: SYMBOL_OPTION,
                    expected: "a string",
                });
            }
        };
        if symbol.is_empty() {
            return Err(ParseError::EmptySymbol);
        }

        Ok(ConfigOutcome::Selected(Options { symbol }))
    }

    /// Encode options the way the settings page returns them.
    pub fn encode(options: &Options) -> Result<String, ParseError> {
        let json = serde_json::to_string(options)?;
        Ok(urlencoding::encode(&json).into_owned())
    }
}

fn is_cancelled(payload: &str) -> bool {
    payload.is_empty() || payload == CANCELLED || payload == "{}"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(symbol: &str) -> ConfigOutcome {
        ConfigOutcome::Selected(Options {
            symbol: symbol.to_string(),
        })
    }

    #[test]
    fn encoded_payload_round_trips() {
        let payload = ConfigBridge::encode(&Options {
            symbol: "AAPL".to_string(),
        })
        .unwrap();

        assert_eq!(payload, "%7B%22symbol%22%3A%22AAPL%22%7D");
        assert_eq!(ConfigBridge::decode(&payload).unwrap(), selected("AAPL"));
    }

    #[test]
    fn plain_json_payload_is_accepted() {
        assert_eq!(
            ConfigBridge::decode(r#"{"symbol":"msft"}"#).unwrap(),
            selected("MSFT")
        );
    }

    #[test]
    fn empty_payload_is_cancelled() {
        assert_eq!(ConfigBridge::decode("").unwrap(), ConfigOutcome::Cancelled);
        assert_eq!(ConfigBridge::decode("   ").unwrap(), ConfigOutcome::Cancelled);
        assert_eq!(ConfigBridge::decode(CANCELLED).unwrap(), ConfigOutcome::Cancelled);
    }

    #[test]
    fn bare_empty_object_is_cancelled() {
        assert_eq!(ConfigBridge::decode("{}").unwrap(), ConfigOutcome::Cancelled);
        assert_eq!(ConfigBridge::decode("%7B%7D").unwrap(), ConfigOutcome::Cancelled);
    }

    #[test]
    fn object_shaped_garbage_is_malformed_not_cancelled() {
        let err = ConfigBridge::decode("{symbol:AAPL}").unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn object_without_symbol_is_missing_field() {
        let err = ConfigBridge::decode(r#"{"theme":"dark"}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(SYMBOL_OPTION)));
    }

    #[test]
    fn blank_symbol_is_rejected() {
        let err = ConfigBridge::decode(r#"{"symbol":"  "}"#).unwrap_err();
        assert!(matches!(err, ParseError::EmptySymbol));
    }

    #[test]
    fn numeric_symbol_is_wrong_type() {
        let err = ConfigBridge::decode(r#"{"symbol":42}"#).unwrap_err();
        assert!(matches!(err, ParseError::WrongType { field: SYMBOL_OPTION, .. }));
    }

    #[test]
    fn broken_percent_encoding_is_reported() {
        let err = ConfigBridge::decode("%7B%22symbol%22%3A%22%FF%22%7D").unwrap_err();
        assert!(matches!(err, ParseError::InvalidEncoding(_)));
    }
}
