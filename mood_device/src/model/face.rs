//! Watchface state rendered in the terminal.
//!
//! The face shows the clock, a `SYMBOL, CHANGE%` line and a mood picked by the
//! sign code of the last record: happy for a strong rise, indifferent for a weak
//! one, sad otherwise. Before the first record arrives it shows "Loading..." with
//! the no-connection face. The clock is redrawn once per wall-clock minute.
use chrono::{NaiveTime, Timelike};
use mood_common::{DeviceMessage, Trend};
use strum::Display;

/// Face picture selected by the last record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Mood {
    #[strum(serialize = ":)")]
    Happy,
    #[strum(serialize = ":|")]
    Indifferent,
    #[strum(serialize = ":(")]
    Sad,
    #[strum(serialize = "x_x")]
    NoConnection,
}

impl From<Trend> for Mood {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::UpStrong => Mood::Happy,
            Trend::UpWeak => Mood::Indifferent,
            Trend::Down => Mood::Sad,
        }
    }
}

/// Everything the watchface displays besides the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchface {
    stock_line: String,
    mood: Mood,
    shown_minute: Option<u32>,
}

impl Default for Watchface {
    fn default() -> Self {
        Self {
            stock_line: String::from("Loading..."),
            mood: Mood::NoConnection,
            shown_minute: None,
        }
    }
}

/// Minutes elapsed since midnight.
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

impl Watchface {
    /// Apply a record received from the bridge.
    pub fn update(&mut self, message: &DeviceMessage) {
        self.stock_line = format!("{}, {}%", message.symbol, message.change);
        self.mood = Mood::from(message.sign);
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// Render again only if the clock moved past the last rendered minute.
    pub fn redraw_on_new_minute(&mut self, time: NaiveTime, clock_24h: bool) -> Option<String> {
        if self.shown_minute == Some(minute_of_day(time)) {
            return None;
        }
        Some(self.render(time, clock_24h))
    }

    /// One-line rendering: `HH:MM | SYMBOL, CHANGE% | face`.
    pub fn render(&mut self, time: NaiveTime, clock_24h: bool) -> String {
        self.shown_minute = Some(minute_of_day(time));
        let clock = if clock_24h {
            time.format("%H:%M")
        } else {
            time.format("%I:%M")
        };
        format!("{} | {} | {}", clock, self.stock_line, self.mood)
    }
}
