// Desktop backend: drives an audio element inside the webview through `document::eval`.
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::bridge_bootstrap::BRIDGE_BOOTSTRAP_JS;
use crate::transport::{
    EventSink, MediaCommand, MediaElement, MediaError, MediaEvent, MediaFailure, Subscription,
};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One drain of the bridge's event queue.
///
/// `seq` is the last command the bridge had applied when the drain ran.
#[derive(Debug, Deserialize, PartialEq)]
struct BridgeDrain {
    paused: bool,
    #[serde(default)]
    seq: u64,
    #[serde(default)]
    events: Vec<QueuedEvent>,
}

/// An event stamped with the last command applied before it was queued.
#[derive(Debug, Deserialize, PartialEq)]
struct QueuedEvent {
    #[serde(default)]
    seq: u64,
    event: BridgeEvent,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum BridgeEvent {
    TimeUpdate {
        position: f64,
        duration: Option<f64>,
    },
    LoadedMetadata {
        duration: Option<f64>,
    },
    Playing,
    Paused,
    Ended,
    VolumeChanged {
        level: f64,
    },
    PlayRejected {
        reason: String,
    },
    Error {
        #[serde(default)]
        code: u16,
    },
}

impl From<BridgeEvent> for MediaEvent {
    fn from(event: BridgeEvent) -> Self {
        match event {
            BridgeEvent::TimeUpdate { position, duration } => MediaEvent::TimeUpdate {
                position,
                duration: duration.unwrap_or(f64::NAN),
            },
            BridgeEvent::LoadedMetadata { duration } => MediaEvent::LoadedMetadata {
                duration: duration.unwrap_or(f64::NAN),
            },
            BridgeEvent::Playing => MediaEvent::Playing,
            BridgeEvent::Paused => MediaEvent::Paused,
            BridgeEvent::Ended => MediaEvent::Ended,
            BridgeEvent::VolumeChanged { level } => MediaEvent::VolumeChanged { level },
            BridgeEvent::PlayRejected { reason } => MediaEvent::PlayRejected { reason },
            BridgeEvent::Error { code } => MediaEvent::Failed(MediaFailure::from_code(code)),
        }
    }
}

/// Orders drained state against the commands issued since.
///
/// Evals run in the order they are sent, but a drain may already be queued
/// when a command goes out. Its paused flag then predates the command, and
/// its clock readings may predate a seek.
#[derive(Debug)]
struct BridgeSync {
    issued: Cell<u64>,
    last_seek: Cell<u64>,
    paused: Cell<bool>,
}

impl Default for BridgeSync {
    fn default() -> Self {
        Self {
            issued: Cell::new(0),
            last_seek: Cell::new(0),
            paused: Cell::new(true),
        }
    }
}

impl BridgeSync {
    fn is_paused(&self) -> bool {
        self.paused.get()
    }

    /// Stamps an outgoing command and applies its optimistic effect.
    fn issue(&self, command: &MediaCommand) -> u64 {
        let seq = self.issued.get() + 1;
        self.issued.set(seq);
        match command {
            MediaCommand::Play => self.paused.set(false),
            MediaCommand::Pause => self.paused.set(true),
            MediaCommand::Seek { .. } => self.last_seek.set(seq),
            MediaCommand::SetVolume { .. } => {}
        }
        seq
    }

    /// Adopts a drained batch and returns the events still worth delivering.
    fn settle(&self, batch: BridgeDrain) -> Vec<MediaEvent> {
        if batch.seq >= self.issued.get() {
            self.paused.set(batch.paused);
        } else {
            debug!(
                drained = batch.seq,
                issued = self.issued.get(),
                "keeping optimistic paused flag over stale drain"
            );
        }

        let last_seek = self.last_seek.get();
        batch
            .events
            .into_iter()
            .filter(|queued| {
                !(queued.seq < last_seek && matches!(queued.event, BridgeEvent::TimeUpdate { .. }))
            })
            .map(|queued| queued.event.into())
            .collect()
    }
}

fn ensure_bridge() {
    let _ = document::eval(BRIDGE_BOOTSTRAP_JS);
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

pub struct BridgeMedia {
    id: String,
    sync: Rc<BridgeSync>,
}

impl BridgeMedia {
    pub fn open(src: &str) -> Result<Self, MediaError> {
        ensure_bridge();
        let id = format!("aguila-{}", Uuid::new_v4());
        let script = format!(
            "return window.__aguilaTracks.open({}, {});",
            js_string(&id),
            js_string(src)
        );
        let _ = document::eval(&script);
        debug!(%id, %src, "opened bridged audio element");

        Ok(Self {
            id,
            sync: Rc::new(BridgeSync::default()),
        })
    }

    fn send(&self, command: MediaCommand) {
        let payload = match serde_json::to_string(&command) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(?command, %err, "failed to encode bridge command");
                return;
            }
        };
        let seq = self.sync.issue(&command);
        let script = format!(
            "return window.__aguilaTracks.apply({}, {seq}, {payload});",
            js_string(&self.id)
        );
        let _ = document::eval(&script);
    }
}

async fn drain(id: &str) -> Option<BridgeDrain> {
    let script = format!(
        r#"return (function () {{
            const bridge = window.__aguilaTracks;
            return bridge ? bridge.drain({}) : {{ paused: true, seq: 0, events: [] }};
        }})();"#,
        js_string(id)
    );
    document::eval(&script).join::<BridgeDrain>().await.ok()
}

impl MediaElement for BridgeMedia {
    fn is_paused(&self) -> bool {
        self.sync.is_paused()
    }

    fn play(&self) {
        self.send(MediaCommand::Play);
    }

    fn pause(&self) {
        self.send(MediaCommand::Pause);
    }

    fn seek(&self, position: f64) {
        self.send(MediaCommand::Seek { position });
    }

    fn set_volume(&self, level: f64) {
        self.send(MediaCommand::SetVolume {
            level: level.clamp(0.0, 1.0),
        });
    }

    fn subscribe(&self, sink: EventSink) -> Subscription {
        let id = self.id.clone();
        let sync = self.sync.clone();
        let task = spawn(async move {
            loop {
                tokio::time::sleep(POLL_INTERVAL).await;
                let Some(batch) = drain(&id).await else {
                    continue;
                };
                for event in sync.settle(batch) {
                    sink(event);
                }
            }
        });
        Subscription::new(move || task.cancel())
    }
}

impl Drop for BridgeMedia {
    fn drop(&mut self) {
        let script = format!(
            "return window.__aguilaTracks && window.__aguilaTracks.release({});",
            js_string(&self.id)
        );
        let _ = document::eval(&script);
        debug!(id = %self.id, "released bridged audio element");
    }
}
