// Browser backend: one detached HTMLAudioElement per track.
use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Event, HtmlAudioElement};

use crate::transport::{
    EventSink, MediaElement, MediaError, MediaEvent, MediaFailure, Subscription,
};

const LISTENED_EVENTS: &[&str] = &[
    "timeupdate",
    "loadedmetadata",
    "durationchange",
    "play",
    "pause",
    "ended",
    "volumechange",
    "error",
];

pub struct WebMedia {
    audio: HtmlAudioElement,
    // where async play rejections are reported while subscribed
    sink: Rc<RefCell<Option<EventSink>>>,
}

impl WebMedia {
    pub fn open(src: &str) -> Result<Self, MediaError> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or(MediaError::NoDocument)?;
        let audio: HtmlAudioElement = document
            .create_element("audio")
            .map_err(|err| MediaError::Create(describe_js_error(&err)))?
            .dyn_into()
            .map_err(|_| MediaError::Create("created element is not <audio>".to_string()))?;
        audio.set_preload("metadata");
        audio.set_src(src);

        Ok(Self {
            audio,
            sink: Rc::new(RefCell::new(None)),
        })
    }
}

fn report_to(slot: &Rc<RefCell<Option<EventSink>>>, event: MediaEvent) {
    let sink = slot.borrow().clone();
    if let Some(sink) = sink {
        sink(event);
    }
}

fn describe_js_error(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &"name".into())
                .ok()
                .and_then(|value| value.as_string())
        })
        .unwrap_or_else(|| "unknown error".to_string())
}

fn event_from_dom(audio: &HtmlAudioElement, kind: &str) -> Option<MediaEvent> {
    Some(match kind {
        "timeupdate" => MediaEvent::TimeUpdate {
            position: audio.current_time(),
            duration: audio.duration(),
        },
        "loadedmetadata" | "durationchange" => MediaEvent::LoadedMetadata {
            duration: audio.duration(),
        },
        "play" => MediaEvent::Playing,
        "pause" => MediaEvent::Paused,
        "ended" => MediaEvent::Ended,
        "volumechange" => MediaEvent::VolumeChanged {
            level: audio.volume(),
        },
        "error" => {
            let code = audio.error().map(|err| err.code()).unwrap_or(0);
            MediaEvent::Failed(MediaFailure::from_code(code))
        }
        _ => return None,
    })
}

impl MediaElement for WebMedia {
    fn is_paused(&self) -> bool {
        self.audio.paused()
    }

    fn play(&self) {
        // Reported from a task: the caller still holds the transport borrow.
        let slot = self.sink.clone();
        let outcome = self.audio.play();
        spawn(async move {
            let result = match outcome {
                Ok(promise) => wasm_bindgen_futures::JsFuture::from(promise)
                    .await
                    .map(|_| ()),
                Err(err) => Err(err),
            };
            if let Err(err) = result {
                report_to(
                    &slot,
                    MediaEvent::PlayRejected {
                        reason: describe_js_error(&err),
                    },
                );
            }
        });
    }

    fn pause(&self) {
        if let Err(err) = self.audio.pause() {
            warn!(reason = %describe_js_error(&err), "pause failed");
        }
    }

    fn seek(&self, position: f64) {
        self.audio.set_current_time(position);
    }

    fn set_volume(&self, level: f64) {
        self.audio.set_volume(level.clamp(0.0, 1.0));
    }

    fn subscribe(&self, sink: EventSink) -> Subscription {
        *self.sink.borrow_mut() = Some(sink.clone());

        let audio = self.audio.clone();
        let callback = Closure::wrap(Box::new(move |event: Event| {
            if let Some(media_event) = event_from_dom(&audio, &event.type_()) {
                sink(media_event);
            }
        }) as Box<dyn FnMut(Event)>);

        for kind in LISTENED_EVENTS {
            if let Err(err) = self
                .audio
                .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            {
                warn!(event = *kind, reason = %describe_js_error(&err), "failed to attach listener");
            }
        }

        let audio = self.audio.clone();
        let slot = self.sink.clone();
        Subscription::new(move || {
            for kind in LISTENED_EVENTS {
                let _ = audio
                    .remove_event_listener_with_callback(kind, callback.as_ref().unchecked_ref());
            }
            slot.borrow_mut().take();
            debug!("audio listeners removed");
        })
    }
}

impl Drop for WebMedia {
    fn drop(&mut self) {
        let _ = self.audio.pause();
        let _ = self.audio.remove_attribute("src");
        self.audio.load();
    }
}
