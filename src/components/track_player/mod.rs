use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
use dioxus::prelude::*;
use tracing::{debug, error};

use crate::components::audio_manager::PlatformMedia;
use crate::transport::{EventSink, MediaEvent, MountedTrack, PlaybackIssue, TransportState};
use crate::utils::{format_optional_time, format_time, slugify};

mod controls;

use controls::{MuteButton, PlayPauseButton, SeekBar, VolumeSlider};

type Track = Rc<MountedTrack<PlatformMedia>>;

/// Routes element notifications into the transport signal.
fn transport_sink(
    transport: Signal<TransportState>,
    on_issue: Option<EventHandler<PlaybackIssue>>,
) -> EventSink {
    // browser listeners fire outside the runtime
    #[cfg(target_arch = "wasm32")]
    let runtime = Runtime::current();

    Rc::new(move |event: MediaEvent| {
        #[cfg(target_arch = "wasm32")]
        let _guard = RuntimeGuard::new(runtime.clone());

        let mut transport = transport;
        let issue = match transport.try_write() {
            Ok(mut state) => state.apply(event),
            Err(_) => return,
        };
        if let (Some(issue), Some(handler)) = (issue, on_issue) {
            handler.call(issue);
        }
    })
}

fn status_label(issue: Option<&PlaybackIssue>) -> &'static str {
    match issue {
        None => "ok",
        Some(PlaybackIssue::PlayRejected(_)) => "play-rejected",
        Some(PlaybackIssue::Failed(_)) => "load-failed",
    }
}

/// Custom transport for one audio file.
///
/// Owns a hidden playback element for as long as it is mounted. Listeners are
/// removed when the component unmounts. `on_issue` receives load and play
/// failures; the player itself stays silent about them.
#[component]
pub fn TrackPlayer(
    src: String,
    label: String,
    on_issue: Option<EventHandler<PlaybackIssue>>,
) -> Element {
    let mut transport = use_signal(TransportState::default);
    let mut volume_open = use_signal(|| false);

    let track: Option<Track> = use_hook(|| {
        let sink = transport_sink(transport, on_issue);
        match PlatformMedia::open(&src) {
            Ok(media) => {
                debug!(%src, "track mounted");
                Some(Rc::new(MountedTrack::mount(media, sink)))
            }
            Err(err) => {
                error!(%src, %err, "could not create audio element");
                None
            }
        }
    });

    let on_toggle_play = {
        let track = track.clone();
        move |_: MouseEvent| {
            if let Some(track) = &track {
                transport.with_mut(|state| state.toggle_play(track.media()));
            }
        }
    };

    let on_seek = {
        let track = track.clone();
        move |target: f64| {
            if let Some(track) = &track {
                transport.with_mut(|state| {
                    state.seek(track.media(), target);
                });
            }
        }
    };

    let on_toggle_mute = {
        let track = track.clone();
        move |_: MouseEvent| {
            if let Some(track) = &track {
                transport.with_mut(|state| state.toggle_mute(track.media()));
            }
        }
    };

    let on_volume = {
        let track = track.clone();
        move |level: f64| {
            if let Some(track) = &track {
                transport.with_mut(|state| state.set_volume(track.media(), level));
            }
        }
    };

    let state = transport();
    let volume = *state.volume();
    let slug = slugify(&label);
    let status = status_label(state.issue());

    rsx! {
        div {
            class: "bg-zinc-800/80 backdrop-blur-md p-4 rounded-lg hover:bg-zinc-700/80 transition",
            id: "track-{slug}",
            "data-status": status,
            p { class: "text-lg font-medium mb-4 text-center", "{label}" }
            div { class: "flex items-center gap-2 text-sm text-zinc-300",
                PlayPauseButton {
                    playing: state.is_playing(),
                    disabled: track.is_none(),
                    ontoggle: on_toggle_play,
                }
                span { class: "w-12 text-right tabular-nums", {format_time(state.position())} }
                SeekBar {
                    position: state.position(),
                    duration: state.duration(),
                    onseek: on_seek,
                }
                span { class: "w-12 tabular-nums", {format_optional_time(state.remaining())} }
                div {
                    class: "relative text-white",
                    onmouseenter: move |_| volume_open.set(true),
                    onmouseleave: move |_| volume_open.set(false),
                    MuteButton {
                        show_muted: volume.shows_muted_icon(),
                        ontoggle: on_toggle_mute,
                    }
                    if volume_open() {
                        VolumeSlider { value: volume.slider_value(), onchange: on_volume }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use dioxus::core::VirtualDom;

    use super::*;
    use crate::config::PortfolioConfig;
    use crate::transport::mock::MockMedia;
    use crate::transport::{MediaFailure, INTERRUPTED_PLAY};

    #[derive(Clone, Default)]
    struct IssueLog(Rc<RefCell<Vec<(String, PlaybackIssue)>>>);

    fn reference_players(log: IssueLog) -> Element {
        let tracks = PortfolioConfig::default().tracks;

        rsx! {
            for track in tracks {
                TrackPlayer {
                    key: "{track.src}",
                    src: track.src.clone(),
                    label: track.label.clone(),
                    on_issue: {
                        let log = log.clone();
                        let label = track.label.clone();
                        move |issue: PlaybackIssue| log.0.borrow_mut().push((label.clone(), issue))
                    },
                }
            }
        }
    }

    fn broken_player() -> Element {
        rsx! {
            TrackPlayer { src: String::new(), label: "Broken".to_string() }
        }
    }

    #[test]
    fn status_reflects_the_issue_channel() {
        assert_eq!(status_label(None), "ok");
        assert_eq!(
            status_label(Some(&PlaybackIssue::PlayRejected("x".into()))),
            "play-rejected"
        );
        assert_eq!(
            status_label(Some(&PlaybackIssue::Failed(MediaFailure::Decode))),
            "load-failed"
        );
    }

    #[test]
    fn rendered_players_each_own_one_element() {
        let config = PortfolioConfig::default();
        let log = IssueLog::default();
        let mut dom = VirtualDom::new_with_props(reference_players, log.clone());
        dom.rebuild_in_place();

        let opened = MockMedia::take_opened();
        let sources: Vec<&str> = opened.iter().map(|(src, _)| src.as_str()).collect();
        let expected: Vec<&str> = config.tracks.iter().map(|t| t.src.as_str()).collect();
        assert_eq!(sources, expected);
        for (_, media) in &opened {
            assert_eq!(media.listener_count(), 1);
            assert!(media.commands().is_empty());
        }

        // only the failing track reports, and only once per failure
        let (_, third) = &opened[2];
        dom.in_runtime(|| {
            third.emit(MediaEvent::LoadedMetadata { duration: 90.0 });
            third.emit(MediaEvent::Failed(MediaFailure::Decode));
            third.emit(MediaEvent::PlayRejected {
                reason: INTERRUPTED_PLAY.into(),
            });
        });
        assert_eq!(
            *log.0.borrow(),
            vec![(
                config.tracks[2].label.clone(),
                PlaybackIssue::Failed(MediaFailure::Decode)
            )]
        );
    }

    #[test]
    fn unmounting_players_removes_their_listeners() {
        let mut dom = VirtualDom::new_with_props(reference_players, IssueLog::default());
        dom.rebuild_in_place();
        let opened = MockMedia::take_opened();
        assert_eq!(opened.len(), 5);

        drop(dom);
        for (src, media) in &opened {
            assert_eq!(media.listener_count(), 0, "{src} still has listeners");
        }
    }

    #[test]
    fn player_without_an_element_renders_inert() {
        let mut dom = VirtualDom::new(broken_player);
        dom.rebuild_in_place();
        assert!(MockMedia::take_opened().is_empty());
    }
}
