//! Stock mood bridge binary.
//!
//! Binds a UDP socket for the paired device and wires the pipeline together:
//!
//! - `TriggerReceiver` — decodes device datagrams into `Trigger`s and remembers
//!   the sender as the paired device.
//! - `QuotePipeline` — dispatches each trigger; refresh triggers spawn a
//!   fetch → normalize → send task.
//! - `UdpMessenger` — sends normalized records back over the same socket.
//!
//! Triggers are dispatched one at a time from a bounded queue, so the active
//! symbol has a single writer. Ctrl+C stops the loop.
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use log::{error, info};
use mood_bridge::{
    DevicePeer, LogView, QuotePipeline, ReqwestFetcher, TriggerReceiver, UdpMessenger,
};
use mood_common::net::addr;
use mood_common::{MoodError, Result, Trigger};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;

/// Pending triggers buffered between the receiver and the dispatch loop.
const TRIGGER_QUEUE: usize = 32;

#[tokio::main]
async fn main() -> Result<(), MoodError> {
    init_logger();
    let args = Args::parse();

    let udp_socket = Arc::new(UdpSocket::bind(addr("0.0.0.0", args.listen_port)).await?);
    info!("UDP socket created on: {}", udp_socket.local_addr()?);
    let peer = DevicePeer::default();

    let mut pipeline = QuotePipeline::new(
        Arc::new(ReqwestFetcher::new()?),
        Arc::new(UdpMessenger::new(Arc::clone(&udp_socket), peer.clone())),
        Arc::new(LogView),
        args.settings(),
    );
    pipeline.set_active_symbol(args.initial_symbol());

    let (trigger_tx, mut trigger_rx) = mpsc::channel::<Trigger>(TRIGGER_QUEUE);
    let receiver = TriggerReceiver::new(udp_socket, peer);
    tokio::spawn(async move {
        if let Err(e) = receiver.receive_loop_with_channel(trigger_tx).await {
            error!("Receiver loop failed: {}", e);
        }
    });

    info!(
        "Bridge is running for {}. Press Ctrl+C to exit.",
        pipeline.active_symbol()
    );
    loop {
        tokio::select! {
            trigger = trigger_rx.recv() => match trigger {
                // Refresh tasks log their own outcome.
                Some(trigger) => drop(pipeline.dispatch(trigger)),
                None => {
                    error!("Trigger queue closed");
                    return Err(MoodError::ChannelRecv("trigger queue closed".to_string()));
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received. Shutting down bridge...");
                break;
            }
        }
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
