use crate::peer::DevicePeer;
use log::{debug, info, warn};
use mood_common::net::DATAGRAM_BUF_BYTES;
use mood_common::{MoodError, Trigger};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::mpsc::Sender;

/// UDP trigger receiver for the paired device.
///
/// Decodes each incoming datagram into a `Trigger`, marks its sender as the
/// paired device, and forwards the trigger to the dispatch loop. A datagram that
/// does not decode is logged and dropped without affecting later ones.
pub struct TriggerReceiver {
    socket: Arc<UdpSocket>,
    peer: DevicePeer,
}

impl TriggerReceiver {
    pub fn new(socket: Arc<UdpSocket>, peer: DevicePeer) -> Self {
        Self { socket, peer }
    }

    /// Loop until the socket fails or the dispatch loop hangs up.
    pub async fn receive_loop_with_channel(self, tx: Sender<Trigger>) -> Result<(), MoodError> {
        info!(
            "Trigger UDP receiver is started on {}",
            self.socket.local_addr()?
        );
        let mut buf = vec![0u8; DATAGRAM_BUF_BYTES];

        loop {
            let (size, device_addr) = self.socket.recv_from(&mut buf).await?;
            let trigger = match Trigger::from_json_slice(&buf[..size]) {
                Ok(trigger) => trigger,
                Err(e) => {
                    warn!("Dropping datagram from {}: {}", device_addr, e);
                    continue;
                }
            };
            debug!("Received {:?} from {}", trigger, device_addr);

            self.peer.pair(device_addr)?;
            tx.send(trigger)
                .await
                .map_err(|e| MoodError::ChannelSend(format!("trigger queue closed: {}", e)))?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn garbage_is_skipped_and_sender_is_paired() {
        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await.unwrap());
        let bridge_addr = socket.local_addr().unwrap();
        let peer = DevicePeer::default();
        let (tx, mut rx) = mpsc::channel(4);
        tokio::spawn(TriggerReceiver::new(socket, peer.clone()).receive_loop_with_channel(tx));

        let device = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        device.send_to(b"not json", bridge_addr).await.unwrap();
        device
            .send_to(br#"{"event":"ready"}"#, bridge_addr)
            .await
            .unwrap();

        assert_eq!(rx.recv().await, Some(Trigger::Ready));
        assert_eq!(peer.current().unwrap(), Some(device.local_addr().unwrap()));
    }
}
