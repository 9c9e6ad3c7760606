//! Quote payloads from the provider and their normalization.
//!
//! The provider answers with a JSON object carrying many fields; only `Symbol`
//! and `ChangePercent` matter here. The body is untrusted: error responses from
//! the provider (e.g. `{"Message":"No symbol matches found"}`) arrive with a
//! success status, so every field is checked before it reaches the classifier.
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::message::DeviceMessage;

/// Provider field holding the ticker symbol.
pub const SYMBOL_FIELD: &str = "Symbol";
/// Provider field holding the percentage change since the previous close.
pub const CHANGE_FIELD: &str = "ChangePercent";

/// The two provider fields the pipeline relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Ticker symbol as reported by the provider.
    pub symbol: String,
    /// Percentage change, always finite.
    pub change_percent: f64,
}

impl Quote {
    /// Decode and validate a provider body.
    pub fn from_json(raw: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(raw)?;
        let object = value.as_object().ok_or(ParseError::WrongType {
            field: "$",
            expected: "a JSON object",
        })?;

        let symbol = match required(object, SYMBOL_FIELD)? {
            Value::String(symbol) => symbol.clone(),
            _ => {
                return Err(ParseError::WrongType {
                    field: SYMBOL_FIELD,
                    expected: "a string",
                });
            }
        };

        let change_percent = required(object, CHANGE_FIELD)?
            .as_f64()
            .filter(|change| change.is_finite())
            .ok_or(ParseError::WrongType {
                field: CHANGE_FIELD,
                expected: "a finite number",
            })?;

        Ok(Quote {
            symbol,
            change_percent,
        })
    }
}

fn required<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, ParseError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ParseError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

impl From<Quote> for DeviceMessage {
    fn from(quote: Quote) -> Self {
        DeviceMessage::new(quote.symbol, quote.change_percent)
    }
}

/// Turns raw provider bodies into device records.
pub struct QuoteNormalizer;

impl QuoteNormalizer {
    /// Parse `raw` and build the three-field device record.
    pub fn normalize(raw: &str) -> Result<DeviceMessage, ParseError> {
        Quote::from_json(raw).map(DeviceMessage::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Trend;

    #[test]
    fn strong_rise_maps_to_sign_zero() {
        let message = QuoteNormalizer::normalize(r#"{"Symbol":"YHOO","ChangePercent":0.73}"#)
            .unwrap();

        assert_eq!(message.symbol, "YHOO");
        assert_eq!(message.change, "0.73");
        assert_eq!(message.sign, Trend::UpStrong);
    }

    #[test]
    fn fall_maps_to_sign_two() {
        let message = QuoteNormalizer::normalize(r#"{"Symbol":"YHOO","ChangePercent":-2.5}"#)
            .unwrap();

        assert_eq!(message.change, "-2.50");
        assert_eq!(message.sign, Trend::Down);
    }

    #[test]
    fn integer_change_is_accepted() {
        let message = QuoteNormalizer::normalize(r#"{"Symbol":"AAPL","ChangePercent":3}"#)
            .unwrap();

        assert_eq!(message.change, "3.00");
        assert_eq!(message.sign, Trend::UpStrong);
    }

    #[test]
    fn extra_provider_fields_are_ignored() {
        let raw = r#"{"Status":"SUCCESS","Name":"Yahoo! Inc","Symbol":"YHOO","#.to_string()
            + r#""LastPrice":35.1,"ChangePercent":0.2}"#;
        let message = QuoteNormalizer::normalize(&raw).unwrap();

        assert_eq!(message.sign, Trend::UpWeak);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = QuoteNormalizer::normalize("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn provider_error_body_reports_missing_symbol() {
        let err = QuoteNormalizer::normalize(r#"{"Message":"No symbol matches found for XYZ"}"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingField(SYMBOL_FIELD)));
    }

    #[test]
    fn null_change_is_missing() {
        let err = QuoteNormalizer::normalize(r#"{"Symbol":"YHOO","ChangePercent":null}"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingField(CHANGE_FIELD)));
    }

    #[test]
    fn string_change_is_wrong_type() {
        let err = QuoteNormalizer::normalize(r#"{"Symbol":"YHOO","ChangePercent":"0.73"}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::WrongType {
                field: CHANGE_FIELD,
                ..
            }
        ));
    }

    #[test]
    fn non_object_root_is_wrong_type() {
        let err = QuoteNormalizer::normalize("[1,2,3]").unwrap_err();
        assert!(matches!(err, ParseError::WrongType { field: "$", .. }));
    }

    #[test]
    fn normalizing_twice_yields_identical_records() {
        let raw = r#"{"Symbol":"YHOO","ChangePercent":0.3}"#;
        assert_eq!(
            QuoteNormalizer::normalize(raw).unwrap(),
            QuoteNormalizer::normalize(raw).unwrap()
        );
    }
}
