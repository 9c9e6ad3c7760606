//! Fixed-schema record sent to the paired device.
//!
//! The watchface reads three keys from every inbound dictionary: the ticker
//! symbol, the percentage change already formatted for display, and an integer
//! sign code that selects the mood face. On the wire the record is a flat JSON
//! object keyed by the dictionary key names.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::ParseError;

/// Dictionary key carrying the ticker symbol.
pub const KEY_SYMBOL: &str = "KEY_SYMBOL";
/// Dictionary key carrying the formatted percentage change.
pub const KEY_CHANGE: &str = "KEY_CHANGE";
/// Dictionary key carrying the trend sign code.
pub const KEY_SIGN: &str = "KEY_SIGN";

/// Change above which a quote counts as a strong rise.
pub const STRONG_RISE_THRESHOLD: f64 = 0.5;

/// Trend bucket derived from the percentage change.
///
/// Encoded on the wire as its sign code: `0` strong rise, `1` weak rise, `2` flat or down.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(into = "u8", try_from = "u8")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    /// Change strictly above `STRONG_RISE_THRESHOLD`.
    UpStrong,
    /// Change in `(0, STRONG_RISE_THRESHOLD]`.
    UpWeak,
    /// Zero, negative, or not comparable.
    Down,
}

impl Trend {
    /// Classify a percentage change. Thresholds are checked in order and the first match wins.
    pub fn classify(change_percent: f64) -> Self {
        if change_percent > STRONG_RISE_THRESHOLD {
            Trend::UpStrong
        } else if change_percent > 0.0 {
            Trend::UpWeak
        } else {
            Trend::Down
        }
    }

    /// Integer code understood by the device.
    pub const fn sign(self) -> u8 {
        match self {
            Trend::UpStrong => 0,
            Trend::UpWeak => 1,
            Trend::Down => 2,
        }
    }

    /// Inverse of [`Self::sign`].
    pub const fn from_sign(sign: u8) -> Option<Self> {
        match sign {
            0 => Some(Trend::UpStrong),
            1 => Some(Trend::UpWeak),
            2 => Some(Trend::Down),
            _ => None,
        }
    }
}

impl From<Trend> for u8 {
    fn from(trend: Trend) -> Self {
        trend.sign()
    }
}

impl TryFrom<u8> for Trend {
    type Error = String;

    fn try_from(sign: u8) -> Result<Self, Self::Error> {
        Trend::from_sign(sign).ok_or_else(|| format!("unknown sign code {}", sign))
    }
}

/// Normalized quote as delivered to the device. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMessage {
    /// Ticker symbol as reported by the provider.
    #[serde(rename = "KEY_SYMBOL")]
    pub symbol: String,
    /// Percentage change with exactly two fractional digits.
    #[serde(rename = "KEY_CHANGE")]
    pub change: String,
    /// Trend bucket, serialized as the sign code.
    #[serde(rename = "KEY_SIGN")]
    pub sign: Trend,
}

impl DeviceMessage {
    /// Build the record from a raw symbol and percentage change.
    pub fn new(symbol: impl Into<String>, change_percent: f64) -> Self {
        DeviceMessage {
            symbol: symbol.into(),
            change: format_change(change_percent),
            sign: Trend::classify(change_percent),
        }
    }

    /// Encode the record to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ParseError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a record received by the device.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Render a percentage change with exactly two fractional digits.
///
/// Exact ties round away from zero and zero never carries a sign, so `0.125`
/// renders as `"0.13"` and `-0.0` as `"0.00"`.
pub fn format_change(change_percent: f64) -> String {
    if change_percent == 0.0 {
        return String::from("0.00");
    }
    // A value halfway between two cents is always an odd number of eighths.
    let eighths = change_percent * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let cents = (change_percent.abs() * 100.0).ceil();
        return format!("{:.2}", (cents / 100.0).copysign(change_percent));
    }
    format!("{:.2}", change_percent)
}
