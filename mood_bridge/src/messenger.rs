//! Outbound link to the paired device.
//!
//! A send either succeeds or fails with `MoodError::Delivery`; the caller only
//! logs the result. Nothing is queued for later delivery.
use crate::peer::DevicePeer;
use log::debug;
use mood_common::net::MAX_OUTBOX_BYTES;
use mood_common::{DeviceMessage, MoodError};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::UdpSocket;

/// Future returned by [`DeviceMessenger::send`].
pub type SendFuture<'a> = Pin<Box<dyn Future<Output = Result<(), MoodError>> + Send + 'a>>;

/// Relays a record to the paired device and reports whether it was accepted.
pub trait DeviceMessenger: Send + Sync {
    fn send<'a>(&'a self, message: &'a DeviceMessage) -> SendFuture<'a>;
}

/// Sends records as JSON datagrams to whichever device last sent a trigger.
pub struct UdpMessenger {
    socket: Arc<UdpSocket>,
    peer: DevicePeer,
}

impl UdpMessenger {
    pub fn new(socket: Arc<UdpSocket>, peer: DevicePeer) -> Self {
        Self { socket, peer }
    }
}

impl DeviceMessenger for UdpMessenger {
    fn send<'a>(&'a self, message: &'a DeviceMessage) -> SendFuture<'a> {
        Box::pin(async move {
            let target = self
                .peer
                .current()?
                .ok_or_else(|| MoodError::Delivery("no device paired".to_string()))?;

            let data = message.to_json_bytes()?;
            if data.len() > MAX_OUTBOX_BYTES {
                return Err(MoodError::Delivery(format!(
                    "record is {} bytes, device accepts at most {}",
                    data.len(),
                    MAX_OUTBOX_BYTES
                )));
            }

            self.socket
                .send_to(&data, target)
                .await
                .map_err(|e| MoodError::Delivery(format!("send to {} failed: {}", target, e)))?;
            debug!("Sent {} bytes to {}", data.len(), target);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mood_common::Trend;

    async fn messenger() -> (UdpMessenger, DevicePeer) {
        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await.unwrap());
        let peer = DevicePeer::default();
        (UdpMessenger::new(socket, peer.clone()), peer)
    }

    #[tokio::test]
    async fn send_without_paired_device_is_rejected() {
        let (messenger, _) = messenger().await;
        let err = messenger
            .send(&DeviceMessage::new("YHOO", 0.73))
            .await
            .unwrap_err();
        assert!(matches!(err, MoodError::Delivery(_)));
    }

    #[tokio::test]
    async fn record_reaches_paired_device() {
        let (messenger, peer) = messenger().await;
        let device = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        peer.pair(device.local_addr().unwrap()).unwrap();

        messenger
            .send(&DeviceMessage::new("YHOO", -2.5))
            .await
            .unwrap();

        let mut buf = [0u8; 1024];
        let size = device.recv(&mut buf).await.unwrap();
        let received = DeviceMessage::from_json_slice(&buf[..size]).unwrap();
        assert_eq!(received.symbol, "YHOO");
        assert_eq!(received.change, "-2.50");
        assert_eq!(received.sign, Trend::Down);
    }

    #[tokio::test]
    async fn oversized_record_is_rejected() {
        let (messenger, peer) = messenger().await;
        peer.pair("127.0.0.1:9".parse().unwrap()).unwrap();

        let err = messenger
            .send(&DeviceMessage::new("X".repeat(MAX_OUTBOX_BYTES), 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, MoodError::Delivery(_)));
    }
}
