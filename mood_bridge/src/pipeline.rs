//! Quote pipeline orchestrator.
//!
//! `QuotePipeline` owns the active ticker symbol and a dispatch table mapping
//! each `TriggerKind` to its handler. Handlers run one at a time on the caller's
//! task; a refresh runs as its own spawned task:
//!
//! fetch (`HttpFetcher`) → normalize (`QuoteNormalizer`) → send (`DeviceMessenger`)
//!
//! Every refresh takes a new generation number. A refresh whose quote is ready
//! after a newer refresh started drops it instead of sending, so the device
//! never receives a stale quote after a fresher one. Failures at any stage are
//! logged and end that refresh; nothing is retried or reported to the device.
use crate::fetcher::{HttpFetcher, HttpRequest, QuoteEndpoint};
use crate::messenger::DeviceMessenger;
use crate::view::{ConfigurationView, DEFAULT_CONFIG_URL};
use log::{debug, error, info, warn};
use mood_common::{
    ConfigBridge, ConfigOutcome, DeviceMessage, MoodError, QuoteNormalizer, Trigger, TriggerKind,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Symbol used until the user picks another one.
pub const DEFAULT_SYMBOL: &str = "YHOO";

/// Static pipeline settings.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub endpoint: QuoteEndpoint,
    pub config_url: String,
    pub timeout: Option<Duration>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            endpoint: QuoteEndpoint::default(),
            config_url: DEFAULT_CONFIG_URL.to_string(),
            timeout: None,
        }
    }
}

/// How a single refresh ended.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The device accepted the record.
    Delivered(DeviceMessage),
    /// A newer refresh started before this one could send.
    Superseded,
    /// A stage failed; the error was logged.
    Failed(MoodError),
}

/// Handle to a spawned refresh. Dropping it leaves the refresh running.
pub struct RefreshTask {
    generation: u64,
    symbol: String,
    handle: JoinHandle<RefreshOutcome>,
}

impl RefreshTask {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Wait for the refresh to finish.
    pub async fn outcome(self) -> RefreshOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => RefreshOutcome::Failed(MoodError::Task(e.to_string())),
        }
    }
}

type Handler = fn(&mut QuotePipeline, Trigger) -> Option<RefreshTask>;

/// Orchestrates triggers, the active symbol and refreshes.
pub struct QuotePipeline {
    fetcher: Arc<dyn HttpFetcher>,
    messenger: Arc<dyn DeviceMessenger>,
    view: Arc<dyn ConfigurationView>,
    settings: PipelineSettings,
    active_symbol: String,
    latest_generation: Arc<AtomicU64>,
    handlers: HashMap<TriggerKind, Handler>,
}

impl QuotePipeline {
    pub fn new(
        fetcher: Arc<dyn HttpFetcher>,
        messenger: Arc<dyn DeviceMessenger>,
        view: Arc<dyn ConfigurationView>,
        settings: PipelineSettings,
    ) -> Self {
        let mut handlers: HashMap<TriggerKind, Handler> = HashMap::new();
        handlers.insert(TriggerKind::Ready, on_ready);
        handlers.insert(TriggerKind::AppMessage, on_app_message);
        handlers.insert(TriggerKind::ShowConfiguration, on_show_configuration);
        handlers.insert(TriggerKind::WebviewClosed, on_webview_closed);

        Self {
            fetcher,
            messenger,
            view,
            settings,
            active_symbol: DEFAULT_SYMBOL.to_string(),
            latest_generation: Arc::new(AtomicU64::new(0)),
            handlers,
        }
    }

    /// Symbol every refresh trigger quotes.
    pub fn active_symbol(&self) -> &str {
        &self.active_symbol
    }

    /// The only writer of the active symbol.
    pub fn set_active_symbol(&mut self, symbol: impl Into<String>) {
        let symbol = symbol.into();
        if symbol != self.active_symbol {
            info!("Active symbol changed: {} -> {}", self.active_symbol, symbol);
        }
        self.active_symbol = symbol;
    }

    /// Trigger kinds with a registered handler.
    pub fn handled_kinds(&self) -> impl Iterator<Item = TriggerKind> + '_ {
        self.handlers.keys().copied()
    }

    /// Route `trigger` to its handler. Returns the refresh it started, if any.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, trigger: Trigger) -> Option<RefreshTask> {
        let kind = trigger.kind();
        info!("Trigger received: {}", kind);
        match self.handlers.get(&kind).copied() {
            Some(handler) => handler(self, trigger),
            None => {
                warn!("No handler registered for {}", kind);
                None
            }
        }
    }

    /// Start a refresh for `symbol` and supersede any refresh still in flight.
    pub fn refresh(&self, symbol: &str) -> RefreshTask {
        let generation = self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let request = HttpRequest::get(self.settings.endpoint.quote_url(symbol))
            .with_timeout(self.settings.timeout);
        let fetcher = Arc::clone(&self.fetcher);
        let messenger = Arc::clone(&self.messenger);
        let latest_generation = Arc::clone(&self.latest_generation);
        let label = symbol.to_string();
        debug!("Refresh #{} for {}: {}", generation, symbol, request.url);

        let handle = tokio::spawn(async move {
            let outcome = match run_refresh(
                fetcher.as_ref(),
                messenger.as_ref(),
                request,
                generation,
                &latest_generation,
            )
            .await
            {
                Ok(Some(message)) => RefreshOutcome::Delivered(message),
                Ok(None) => RefreshOutcome::Superseded,
                Err(e) => RefreshOutcome::Failed(e),
            };
            match &outcome {
                RefreshOutcome::Delivered(message) => info!(
                    "Stock info sent to device: {} {}% ({})",
                    message.symbol, message.change, message.sign
                ),
                RefreshOutcome::Superseded => {
                    info!("Refresh #{} for {} superseded, dropping quote", generation, label)
                }
                RefreshOutcome::Failed(e) => {
                    error!("Refresh #{} for {} failed: {}", generation, label, e)
                }
            }
            outcome
        });

        RefreshTask {
            generation,
            symbol: symbol.to_string(),
            handle,
        }
    }

    fn refresh_active(&self) -> RefreshTask {
        self.refresh(&self.active_symbol)
    }
}

/// Returns `None` when a newer refresh started before the quote was ready.
async fn run_refresh(
    fetcher: &dyn HttpFetcher,
    messenger: &dyn DeviceMessenger,
    request: HttpRequest,
    generation: u64,
    latest_generation: &AtomicU64,
) -> Result<Option<DeviceMessage>, MoodError> {
    let body = fetcher.fetch(request).await?;
    let message = QuoteNormalizer::normalize(&body)?;
    debug!("Percentage change is: {}", message.change);

    if latest_generation.load(Ordering::SeqCst) != generation {
        return Ok(None);
    }
    messenger.send(&message).await?;
    Ok(Some(message))
}

fn on_ready(pipeline: &mut QuotePipeline, _: Trigger) -> Option<RefreshTask> {
    Some(pipeline.refresh_active())
}

fn on_app_message(pipeline: &mut QuotePipeline, _: Trigger) -> Option<RefreshTask> {
    Some(pipeline.refresh_active())
}

fn on_show_configuration(pipeline: &mut QuotePipeline, _: Trigger) -> Option<RefreshTask> {
    if let Err(e) = pipeline.view.open(&pipeline.settings.config_url) {
        error!("Failed to open configuration page: {}", e);
    }
    None
}

fn on_webview_closed(pipeline: &mut QuotePipeline, trigger: Trigger) -> Option<RefreshTask> {
    let Trigger::WebviewClosed { response } = trigger else {
        return None;
    };
    match ConfigBridge::decode(&response) {
        Ok(ConfigOutcome::Selected(options)) => {
            info!("Options = {:?}", options);
            pipeline.set_active_symbol(options.symbol);
            Some(pipeline.refresh_active())
        }
        Ok(ConfigOutcome::Cancelled) => {
            info!("Configuration cancelled");
            None
        }
        Err(e) => {
            warn!("Ignoring malformed configuration payload: {}", e);
            None
        }
    }
}
