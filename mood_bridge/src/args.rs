//! Command-line arguments for the mood bridge.
//!
//! Every flag can also be set through the environment variable named next to it.
use clap::Parser;
use mood_bridge::fetcher::DEFAULT_PROVIDER_URL;
use mood_bridge::pipeline::DEFAULT_SYMBOL;
use mood_bridge::view::DEFAULT_CONFIG_URL;
use mood_bridge::{PipelineSettings, QuoteEndpoint};
use mood_common::net::BRIDGE_PORT;
use std::time::Duration;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Local UDP port the paired device sends triggers to.
    #[clap(long, env = "MOOD_LISTEN_PORT", default_value_t = BRIDGE_PORT)]
    pub listen_port: u16,

    /// Base URL of the quote provider.
    #[clap(long, env = "MOOD_PROVIDER_URL", default_value = DEFAULT_PROVIDER_URL)]
    pub provider_url: String,

    /// Settings page opened on a `showConfiguration` trigger.
    #[clap(long, env = "MOOD_CONFIG_URL", default_value = DEFAULT_CONFIG_URL)]
    pub config_url: String,

    /// Ticker quoted until the settings page selects another one.
    #[clap(long, env = "MOOD_SYMBOL", default_value = DEFAULT_SYMBOL)]
    pub symbol: String,

    /// Per-request timeout in seconds. Unset means no timeout.
    #[clap(long, env = "MOOD_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl Args {
    pub fn settings(&self) -> PipelineSettings {
        PipelineSettings {
            endpoint: QuoteEndpoint::new(self.provider_url.trim()),
            config_url: self.config_url.trim().to_string(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Symbol trimmed and upper-cased like a settings page selection.
    pub fn initial_symbol(&self) -> String {
        self.symbol.trim().to_ascii_uppercase()
    }
}
