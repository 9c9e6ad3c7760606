//! Shared networking constants and helpers used by the bridge and the device.

/// UDP port the bridge listens on for device events.
pub const BRIDGE_PORT: u16 = 8081;

/// Largest encoded record the device inbox accepts, in bytes.
pub const MAX_OUTBOX_BYTES: usize = 656;

/// Datagram receive buffer size; anything larger than the outbox limit is truncated.
pub const DATAGRAM_BUF_BYTES: usize = 2048;

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}
