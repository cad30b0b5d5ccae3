//! Recording media element for tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{EventSink, MediaCommand, MediaElement, MediaError, MediaEvent, Subscription};

thread_local! {
    static OPENED: RefCell<Vec<(String, MockMedia)>> = RefCell::new(Vec::new());
}

#[derive(Default)]
struct Inner {
    paused: Cell<bool>,
    commands: RefCell<Vec<MediaCommand>>,
    listeners: RefCell<Vec<(u64, EventSink)>>,
    next_id: Cell<u64>,
}

/// Clones share one element, so a test can keep a handle after handing the
/// element to a [`super::MountedTrack`].
#[derive(Clone)]
pub struct MockMedia {
    inner: Rc<Inner>,
}

impl MockMedia {
    pub fn new() -> Self {
        let inner = Inner::default();
        inner.paused.set(true);
        Self {
            inner: Rc::new(inner),
        }
    }

    /// Platform constructor used by components under test. Empty sources
    /// fail the way a missing document does.
    pub fn open(src: &str) -> Result<Self, MediaError> {
        if src.is_empty() {
            return Err(MediaError::Create("empty source".to_string()));
        }
        let media = Self::new();
        OPENED.with(|opened| opened.borrow_mut().push((src.to_string(), media.clone())));
        Ok(media)
    }

    /// Drains the elements opened on this thread, in mount order.
    pub fn take_opened() -> Vec<(String, MockMedia)> {
        OPENED.with(|opened| opened.take())
    }

    pub fn commands(&self) -> Vec<MediaCommand> {
        self.inner.commands.borrow().clone()
    }

    pub fn clear_commands(&self) {
        self.inner.commands.borrow_mut().clear();
    }

    pub fn set_paused(&self, paused: bool) {
        self.inner.paused.set(paused);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Deliver an event to every live listener.
    pub fn emit(&self, event: MediaEvent) {
        let sinks: Vec<EventSink> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, sink)| sink.clone())
            .collect();
        for sink in sinks {
            sink(event.clone());
        }
    }

    fn record(&self, command: MediaCommand) {
        self.inner.commands.borrow_mut().push(command);
    }
}

impl MediaElement for MockMedia {
    fn is_paused(&self) -> bool {
        self.inner.paused.get()
    }

    fn play(&self) {
        self.inner.paused.set(false);
        self.record(MediaCommand::Play);
    }

    fn pause(&self) {
        self.inner.paused.set(true);
        self.record(MediaCommand::Pause);
    }

    fn seek(&self, position: f64) {
        self.record(MediaCommand::Seek { position });
    }

    fn set_volume(&self, level: f64) {
        self.record(MediaCommand::SetVolume { level });
    }

    fn subscribe(&self, sink: EventSink) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, sink));

        let inner = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.borrow_mut().retain(|(other, _)| *other != id);
            }
        })
    }
}
