//! Settings page launcher.
use log::info;
use mood_common::MoodError;

/// Default settings page.
pub const DEFAULT_CONFIG_URL: &str =
    "http://pebble-demo-embedded.s3-website-us-east-1.amazonaws.com/index.html";

/// Opens the external settings page. Closing it arrives later as a `webviewclosed` trigger.
pub trait ConfigurationView: Send + Sync {
    fn open(&self, url: &str) -> Result<(), MoodError>;
}

/// Headless view: logs the URL for the operator to open by hand.
#[derive(Debug, Default)]
pub struct LogView;

impl ConfigurationView for LogView {
    fn open(&self, url: &str) -> Result<(), MoodError> {
        info!("Open the configuration page at: {}", url);
        Ok(())
    }
}
