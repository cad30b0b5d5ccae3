use crate::components::Icon;
use dioxus::prelude::*;

const BUTTON_CLASS: &str =
    "p-1 cursor-pointer hover:opacity-80 disabled:opacity-40 disabled:cursor-default";

/// Play/Pause toggle - icon follows the transport flag
#[component]
pub(super) fn PlayPauseButton(
    playing: bool,
    disabled: bool,
    ontoggle: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: BUTTON_CLASS,
            disabled,
            onclick: move |evt| ontoggle.call(evt),
            if playing {
                Icon { name: "pause".to_string(), class: "w-5 h-5 fill-current".to_string() }
            } else {
                Icon { name: "play".to_string(), class: "w-5 h-5 fill-current".to_string() }
            }
        }
    }
}

/// Seek bar - inert until the track length is known
#[component]
pub(super) fn SeekBar(position: f64, duration: Option<f64>, onseek: EventHandler<f64>) -> Element {
    rsx! {
        input {
            r#type: "range",
            class: "flex-grow accent-zinc-500",
            min: "0",
            max: duration.unwrap_or(1.0),
            step: "any",
            value: position,
            disabled: duration.is_none(),
            oninput: move |e: Event<FormData>| {
                if let Ok(target) = e.value().parse::<f64>() {
                    onseek.call(target);
                }
            },
        }
    }
}

#[component]
pub(super) fn MuteButton(show_muted: bool, ontoggle: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "{BUTTON_CLASS} text-white",
            onclick: move |evt| ontoggle.call(evt),
            Icon {
                name: if show_muted { "volume-muted".to_string() } else { "volume".to_string() },
                class: "w-5 h-5 fill-current".to_string(),
            }
        }
    }
}

/// Vertical volume slider shown while hovering the mute button
#[component]
pub(super) fn VolumeSlider(value: f64, onchange: EventHandler<f64>) -> Element {
    rsx! {
        input {
            r#type: "range",
            class: "absolute bottom-full mb-7 left-1/2 -translate-x-1/2 w-13 h-1 -rotate-90 origin-bottom accent-zinc-500",
            min: "0",
            max: "1",
            step: "0.01",
            value,
            oninput: move |e: Event<FormData>| {
                if let Ok(level) = e.value().parse::<f64>() {
                    onchange.call(level);
                }
            },
        }
    }
}
