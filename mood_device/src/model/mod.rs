//! Data model types for the simulated watchface.
//!
//! - `face` — the displayed mood, ticker line and clock.
pub mod face;
