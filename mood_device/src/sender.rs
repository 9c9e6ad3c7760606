//! Sending triggers to the bridge over UDP.
//!
//! This module provides a small helper for encoding and sending `Trigger`
//! datagrams and for running the background refresh ticker that stands in for
//! the watchface's refresh request at fixed wall-clock minutes.
use crate::model::face::minute_of_day;
use chrono::Local;
use crossbeam_channel::{Receiver, select, tick};
use log::{debug, error, info};
use mood_common::{MoodError, Trigger};
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How often the refresh thread checks the wall clock.
const CLOCK_POLL: Duration = Duration::from_secs(1);

/// Helper type for sending triggers to the bridge.
pub struct TriggerSender;

impl TriggerSender {
    /// Encode `trigger` and send it to `target` as a single datagram.
    pub fn send_trigger(
        socket: &UdpSocket,
        target: SocketAddr,
        trigger: &Trigger,
    ) -> Result<(), MoodError> {
        let data = trigger.to_json_bytes()?;
        socket.send_to(&data, target)?;
        info!("Sent {} to {}", trigger.kind(), target);
        Ok(())
    }

    /// Request a refresh each time the wall-clock minute of the day becomes a
    /// multiple of `refresh_minutes`, until `shutdown_rx` fires or disconnects.
    pub fn start_refresh_thread(
        socket: Arc<UdpSocket>,
        target: SocketAddr,
        refresh_minutes: u32,
        shutdown_rx: Receiver<()>,
    ) -> JoinHandle<()> {
        let refresh_minutes = refresh_minutes.max(1);
        info!(
            "Refresh thread started. Every {} minutes to {}",
            refresh_minutes, target
        );
        thread::spawn(move || {
            let ticker = tick(CLOCK_POLL);
            let mut last_minute = minute_of_day(Local::now().time());
            loop {
                select! {
                    recv(shutdown_rx) -> _ => break,
                    recv(ticker) -> _ => {
                        let minute = minute_of_day(Local::now().time());
                        if minute != last_minute {
                            last_minute = minute;
                            if is_refresh_minute(minute, refresh_minutes) {
                                match Self::send_trigger(&socket, target, &Trigger::AppMessage) {
                                    Ok(()) => debug!("Refresh requested from {}", target),
                                    Err(e) => error!("Failed to request refresh: {}", e),
                                }
                            }
                        }
                    }
                }
            }
            info!("Refresh thread stopping...");
        })
    }
}

/// Whether a refresh is due at `minute` minutes past midnight.
pub fn is_refresh_minute(minute: u32, refresh_minutes: u32) -> bool {
    minute % refresh_minutes.max(1) == 0
}
