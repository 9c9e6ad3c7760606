//! Mood Device — a terminal stand-in for the stock mood watchface. It announces
//! itself to the bridge with a `ready` trigger, requests a refresh on a fixed
//! interval, and renders every record it receives as a clock, a ticker line and
//! a mood face.
//!
//! Usage example (CLI):
//! ```bash
//! mood_device --bridge-ip 192.168.0.10 --refresh-minutes 1 --symbol AAPL
//! ```
//!
//! `--symbol` simulates the settings page closing with that ticker selected;
//! `--show-configuration` asks the bridge to open the settings page.
#![warn(missing_docs)]
mod args;
mod model;
mod sender;

use crate::args::Args;
use crate::model::face::Watchface;
use crate::sender::TriggerSender;
use chrono::Local;
use clap::Parser;
use crossbeam_channel::unbounded;
use log::{error, info, warn};
use mood_common::net::{DATAGRAM_BUF_BYTES, addr};
use mood_common::{ConfigBridge, DeviceMessage, MoodError, Options, Result, Trigger};
use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

/// Runs a blocking loop that receives records from the bridge and redraws the
/// watchface on every record and every new minute. Undecodable datagrams are
/// logged as dropped.
fn start_receiver_loop(
    socket: Arc<UdpSocket>,
    shutdown: Arc<AtomicBool>,
    clock_24h: bool,
) -> Result<(), MoodError> {
    info!("Record receiver running on: {}", socket.local_addr()?);
    let mut face = Watchface::default();
    info!("{}", face.render(Local::now().time(), clock_24h));
    let mut buf = vec![0u8; DATAGRAM_BUF_BYTES];

    while !shutdown.load(Ordering::Relaxed) {
        match socket.recv_from(&mut buf) {
            Ok((size, _)) => match DeviceMessage::from_json_slice(&buf[..size]) {
                Ok(message) => {
                    face.update(&message);
                    info!("{}", face.render(Local::now().time(), clock_24h));
                }
                Err(e) => warn!("Message dropped! {}", e),
            },
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {}
            Err(e) => {
                error!("Receive data error: {}", e);
                return Err(MoodError::Io(e));
            }
        }
        if let Some(frame) = face.redraw_on_new_minute(Local::now().time(), clock_24h) {
            info!("{}", frame);
        }
    }
    info!("Receiver loop stopping...");
    Ok(())
}

fn main() -> Result<(), MoodError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    let (shutdown_tx, shutdown_rx) = unbounded::<()>();
    let stop_refresh = shutdown_tx.clone();
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down device...");
            shutdown.store(true, Ordering::SeqCst);
            let _ = shutdown_tx.send(());
        })
        .map_err(|e| MoodError::ChannelSend(format!("failed to set Ctrl+C handler: {}", e)))?;
    }

    let bridge_addr: SocketAddr = addr(args.bridge_ip.trim(), args.bridge_port)
        .parse()
        .map_err(|e| MoodError::Io(std::io::Error::new(ErrorKind::InvalidInput, e)))?;
    let socket = Arc::new(UdpSocket::bind(addr("0.0.0.0", args.listen_port))?);
    socket.set_read_timeout(Some(Duration::from_secs(1)))?;
    info!("Device listening on: {}", socket.local_addr()?);

    TriggerSender::send_trigger(&socket, bridge_addr, &Trigger::Ready)?;
    if args.show_configuration {
        TriggerSender::send_trigger(&socket, bridge_addr, &Trigger::ShowConfiguration)?;
    }
    if let Some(symbol) = args.symbol.as_deref() {
        let response = ConfigBridge::encode(&Options {
            symbol: symbol.to_string(),
        })?;
        TriggerSender::send_trigger(&socket, bridge_addr, &Trigger::WebviewClosed { response })?;
    }

    let refresh = TriggerSender::start_refresh_thread(
        socket.clone(),
        bridge_addr,
        args.refresh_minutes,
        shutdown_rx,
    );

    info!("Device is running. Press Ctrl+C to exit.");
    let result = start_receiver_loop(socket, shutdown, !args.clock_12h);
    let _ = stop_refresh.send(());
    if refresh.join().is_err() {
        error!("Refresh thread panicked");
    }
    result
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
