//! Stock mood bridge.
//!
//! Fetches a quote for the active ticker symbol, reduces it to the three-key
//! record the watchface understands, and forwards it to the paired device.
//! The building blocks:
//!
//! - `fetcher` — `HttpFetcher` transport contract and the reqwest implementation.
//! - `messenger` — `DeviceMessenger` contract and the UDP implementation.
//! - `view` — `ConfigurationView`, which opens the settings page.
//! - `peer` — tracks which device address records are sent to.
//! - `receiver` — decodes device datagrams into `Trigger`s.
//! - `pipeline` — `QuotePipeline`, the dispatch table and the refresh tasks.
pub mod fetcher;
pub mod messenger;
pub mod peer;
pub mod pipeline;
pub mod receiver;
pub mod view;

pub use fetcher::{HttpFetcher, QuoteEndpoint, ReqwestFetcher};
pub use messenger::{DeviceMessenger, UdpMessenger};
pub use peer::DevicePeer;
pub use pipeline::{PipelineSettings, QuotePipeline, RefreshOutcome, RefreshTask};
pub use receiver::TriggerReceiver;
pub use view::{ConfigurationView, LogView};
