//! In-memory collaborators for driving `QuotePipeline` without a network or device.
#![allow(dead_code)]

use mood_bridge::fetcher::{FetchFuture, HttpFetcher, HttpRequest};
use mood_bridge::messenger::{DeviceMessenger, SendFuture};
use mood_bridge::{ConfigurationView, PipelineSettings, QuotePipeline};
use mood_common::{DeviceMessage, MoodError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Answers from a fixed symbol → body table; unknown symbols fail as transport errors.
#[derive(Default)]
pub struct ScriptedFetcher {
    bodies: Mutex<HashMap<String, String>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    pub requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedFetcher {
    pub fn with_body(self, symbol: &str, body: &str) -> Self {
        self.bodies
            .lock()
            .unwrap()
            .insert(symbol.to_string(), body.to_string());
        self
    }

    /// Hold responses for `symbol` until the returned gate is notified.
    pub fn gate(&self, symbol: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(symbol.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn symbol_of(url: &str) -> String {
    url.rsplit("symbol=").next().unwrap_or_default().to_string()
}

impl HttpFetcher for ScriptedFetcher {
    fn fetch<'a>(&'a self, request: HttpRequest) -> FetchFuture<'a> {
        Box::pin(async move {
            let symbol = symbol_of(&request.url);
            self.requests.lock().unwrap().push(request);

            let gate = self.gates.lock().unwrap().get(&symbol).cloned();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            self.bodies
                .lock()
                .unwrap()
                .get(&symbol)
                .cloned()
                .ok_or_else(|| MoodError::Transport(format!("connection failed for {}", symbol)))
        })
    }
}

/// Records every accepted message; rejects everything when `reject` is set.
#[derive(Default)]
pub struct RecordingMessenger {
    pub sent: Mutex<Vec<DeviceMessage>>,
    pub reject: bool,
}

impl RecordingMessenger {
    pub fn rejecting() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject: true,
        }
    }

    pub fn sent(&self) -> Vec<DeviceMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl DeviceMessenger for RecordingMessenger {
    fn send<'a>(&'a self, message: &'a DeviceMessage) -> SendFuture<'a> {
        Box::pin(async move {
            if self.reject {
                return Err(MoodError::Delivery("outbox full".to_string()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        })
    }
}

/// Records the URLs it was asked to open.
#[derive(Default)]
pub struct RecordingView {
    pub opened: Mutex<Vec<String>>,
}

impl ConfigurationView for RecordingView {
    fn open(&self, url: &str) -> Result<(), MoodError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub struct Harness {
    pub pipeline: QuotePipeline,
    pub fetcher: Arc<ScriptedFetcher>,
    pub messenger: Arc<RecordingMessenger>,
    pub view: Arc<RecordingView>,
}

pub fn harness(fetcher: ScriptedFetcher) -> Harness {
    harness_with(fetcher, RecordingMessenger::default())
}

pub fn harness_with(fetcher: ScriptedFetcher, messenger: RecordingMessenger) -> Harness {
    let fetcher = Arc::new(fetcher);
    let messenger = Arc::new(messenger);
    let view = Arc::new(RecordingView::default());
    let pipeline = QuotePipeline::new(
        fetcher.clone(),
        messenger.clone(),
        view.clone(),
        PipelineSettings::default(),
    );
    Harness {
        pipeline,
        fetcher,
        messenger,
        view,
    }
}
