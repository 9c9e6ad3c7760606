//! Paired-device address tracker.
//!
//! The bridge has no pairing handshake: whichever address last sent a valid
//! trigger is treated as the paired device, and outbound records go there.
//!
//! - `DevicePeer::pair(addr)` — record a trigger from `addr` and make it the target.
//! - `DevicePeer::current()` — the address records should be sent to, if any.
//!
//! Clones share the same state.
use log::info;
use mood_common::Result;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Shared handle to the currently paired device.
#[derive(Clone, Default)]
pub struct DevicePeer {
    addr: Arc<Mutex<Option<SocketAddr>>>,
}

impl DevicePeer {
    /// Record a trigger from `addr`; switches the target if a different device spoke.
    pub fn pair(&self, addr: SocketAddr) -> Result<()> {
        let mut paired = self.addr.lock()?;
        if *paired != Some(addr) {
            info!("Device paired on: {}", addr);
            *paired = Some(addr);
        }
        Ok(())
    }

    /// Address of the paired device.
    pub fn current(&self) -> Result<Option<SocketAddr>> {
        Ok(*self.addr.lock()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpaired_peer_has_no_target() {
        let peer = DevicePeer::default();
        assert_eq!(peer.current().unwrap(), None);
    }

    #[test]
    fn latest_sender_becomes_target() {
        let peer = DevicePeer::default();
        let first: SocketAddr = "127.0.0.1:40000".parse().unwrap();
        let second: SocketAddr = "127.0.0.1:40001".parse().unwrap();

        peer.pair(first).unwrap();
        peer.pair(first).unwrap();
        assert_eq!(peer.current().unwrap(), Some(first));

        peer.clone().pair(second).unwrap();
        assert_eq!(peer.current().unwrap(), Some(second));
    }
}
