//! Command-line arguments for the device simulator.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use mood_common::net::BRIDGE_PORT;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Bridge IP address (IPv4 or IPv6).
    #[clap(long, env = "MOOD_BRIDGE_IP", default_value = "127.0.0.1")]
    pub bridge_ip: String,

    /// UDP port the bridge listens on.
    #[clap(long, env = "MOOD_BRIDGE_PORT", default_value_t = BRIDGE_PORT)]
    pub bridge_port: u16,

    /// Local UDP port for receiving records. 0 picks a free port.
    #[clap(long, env = "MOOD_DEVICE_PORT", default_value_t = 0)]
    pub listen_port: u16,

    /// Request a refresh whenever the wall-clock minute of the day is a multiple of this.
    #[clap(long, env = "MOOD_REFRESH_MINUTES", default_value_t = 30)]
    pub refresh_minutes: u32,

    /// Simulate the settings page closing with this ticker selected.
    #[clap(long)]
    pub symbol: Option<String>,

    /// Ask the bridge to open the settings page.
    #[clap(long)]
    pub show_configuration: bool,

    /// Render the clock in 12-hour style.
    #[clap(long)]
    pub clock_12h: bool,
}
