//! Track transport - keeps the UI state of one track in step with its media
//! element's asynchronous clock.
//!
//! Commands go out through [`MediaElement`]; outcomes come back as
//! [`MediaEvent`]s fed to [`TransportState::apply`]. The element's own
//! notifications are authoritative, so an optimistic play that the browser
//! rejects is rolled back once the rejection arrives.

mod volume;

#[cfg(test)]
pub mod mock;

use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, warn};

pub use volume::{EffectiveVolume, VolumeState};

/// Play/pause flag shown by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playback {
    #[default]
    Paused,
    Playing,
}

/// Commands issued to a playback element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaCommand {
    Play,
    Pause,
    Seek { position: f64 },
    SetVolume { level: f64 },
}

/// Notifications coming back from a playback element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Periodic clock advance. `duration` is NaN until metadata resolves.
    TimeUpdate { position: f64, duration: f64 },
    LoadedMetadata { duration: f64 },
    Playing,
    Paused,
    Ended,
    VolumeChanged { level: f64 },
    PlayRejected { reason: String },
    Failed(MediaFailure),
}

/// Load/decode failures, mirroring the media element error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MediaFailure {
    #[error("loading was aborted")]
    Aborted,
    #[error("network error while loading the track")]
    Network,
    #[error("the track could not be decoded")]
    Decode,
    #[error("no supported source was found")]
    SourceNotSupported,
    #[error("the track could not be loaded")]
    Unknown,
}

impl MediaFailure {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => MediaFailure::Aborted,
            2 => MediaFailure::Network,
            3 => MediaFailure::Decode,
            4 => MediaFailure::SourceNotSupported,
            _ => MediaFailure::Unknown,
        }
    }
}

/// Per-track status channel; the default UI does not render it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaybackIssue {
    #[error("play request rejected: {0}")]
    PlayRejected(String),
    #[error(transparent)]
    Failed(#[from] MediaFailure),
}

/// Raised when a playback element cannot be created at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MediaError {
    #[error("no document is available to host an audio element")]
    NoDocument,
    #[error("failed to create audio element: {0}")]
    Create(String),
}

/// Rejection name a media element uses when a pending play is interrupted by a
/// pause or a new load.
pub const INTERRUPTED_PLAY: &str = "AbortError";

/// Receives every [`MediaEvent`] of one element.
pub type EventSink = Rc<dyn Fn(MediaEvent)>;

/// Active listener registration. Dropping it unregisters the listeners.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// The host's native playback primitive.
///
/// Commands are fire-and-forget; `play` may fail later and report it as
/// [`MediaEvent::PlayRejected`].
pub trait MediaElement {
    fn is_paused(&self) -> bool;
    fn play(&self);
    fn pause(&self);
    fn seek(&self, position: f64);
    fn set_volume(&self, level: f64);
    fn subscribe(&self, sink: EventSink) -> Subscription;
}

/// An element bound to its listeners for the lifetime of a mounted player.
pub struct MountedTrack<M: MediaElement> {
    // dropped before `media` so no listener outlives the element
    subscription: Subscription,
    media: M,
}

impl<M: MediaElement> MountedTrack<M> {
    pub fn mount(media: M, sink: EventSink) -> Self {
        let subscription = media.subscribe(sink);
        Self {
            subscription,
            media,
        }
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Tear down explicitly; equivalent to dropping.
    #[allow(dead_code)]
    pub fn unmount(self) {
        let Self {
            subscription,
            media,
        } = self;
        subscription.cancel();
        drop(media);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransportState {
    playback: Playback,
    position: f64,
    duration: Option<f64>,
    volume: VolumeState,
    issue: Option<PlaybackIssue>,
}

impl TransportState {
    #[allow(dead_code)]
    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn is_playing(&self) -> bool {
        self.playback == Playback::Playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// `duration - position`, unknown until metadata resolves.
    pub fn remaining(&self) -> Option<f64> {
        self.duration
            .map(|duration| (duration - self.position).max(0.0))
    }

    pub fn volume(&self) -> &VolumeState {
        &self.volume
    }

    pub fn issue(&self) -> Option<&PlaybackIssue> {
        self.issue.as_ref()
    }

    pub fn toggle_play(&mut self, media: &impl MediaElement) {
        if media.is_paused() {
            media.play();
            self.playback = Playback::Playing;
        } else {
            media.pause();
            self.playback = Playback::Paused;
        }
    }

    /// Returns whether the seek was applied. Seeking is inert while the
    /// duration is unknown.
    pub fn seek(&mut self, media: &impl MediaElement, target: f64) -> bool {
        let Some(duration) = self.duration else {
            debug!(requested = target, "seek ignored, duration unknown");
            return false;
        };
        if !target.is_finite() {
            return false;
        }
        let target = target.clamp(0.0, duration);
        media.seek(target);
        self.position = target;
        true
    }

    pub fn set_volume(&mut self, media: &impl MediaElement, value: f64) {
        if let Some(level) = self.volume.set_volume(value) {
            media.set_volume(level);
        }
    }

    pub fn toggle_mute(&mut self, media: &impl MediaElement) {
        let level = self.volume.toggle_mute();
        media.set_volume(level);
    }

    /// Reconcile with a notification from the element.
    ///
    /// Returns the issue when this event raised one.
    pub fn apply(&mut self, event: MediaEvent) -> Option<PlaybackIssue> {
        match event {
            MediaEvent::TimeUpdate { position, duration } => {
                self.update_duration(duration);
                self.update_position(position);
                None
            }
            MediaEvent::LoadedMetadata { duration } => {
                self.update_duration(duration);
                self.update_position(self.position);
                None
            }
            MediaEvent::Playing => {
                self.playback = Playback::Playing;
                self.issue = None;
                None
            }
            MediaEvent::Paused | MediaEvent::Ended => {
                self.playback = Playback::Paused;
                None
            }
            MediaEvent::VolumeChanged { level } => {
                self.volume.reconcile(level);
                None
            }
            MediaEvent::PlayRejected { reason } if reason == INTERRUPTED_PLAY => {
                // the interrupting pause reports its own state
                debug!("pending play interrupted");
                None
            }
            MediaEvent::PlayRejected { reason } => {
                warn!(%reason, "play request rejected");
                self.playback = Playback::Paused;
                self.raise(PlaybackIssue::PlayRejected(reason))
            }
            MediaEvent::Failed(failure) => {
                warn!(%failure, "media failed to load");
                self.playback = Playback::Paused;
                self.duration = None;
                self.raise(PlaybackIssue::Failed(failure))
            }
        }
    }

    fn raise(&mut self, issue: PlaybackIssue) -> Option<PlaybackIssue> {
        self.issue = Some(issue.clone());
        Some(issue)
    }

    fn update_duration(&mut self, duration: f64) {
        self.duration = (duration.is_finite() && duration >= 0.0).then_some(duration);
    }

    fn update_position(&mut self, position: f64) {
        if !position.is_finite() {
            return;
        }
        let position = position.max(0.0);
        self.position = match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
    }
}
