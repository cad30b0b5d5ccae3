use crate::components::{Icon, TrackPlayer};
use crate::config::{PortfolioConfig, SocialLink, TrackConfig};
use crate::transport::PlaybackIssue;
use dioxus::prelude::*;
use tracing::info;

#[component]
pub fn HomeView() -> Element {
    let portfolio = use_context::<PortfolioConfig>();
    let mailto = portfolio.mailto();

    rsx! {
        header { class: "text-center pt-16 pb-6",
            h1 { class: "text-5xl font-bold tracking-tight mb-4", "{portfolio.artist}" }
            p { class: "text-zinc-300 text-lg", "{portfolio.tagline}" }
        }

        section { class: "flex justify-center gap-6 mb-12",
            for link in portfolio.socials.iter().cloned() {
                SocialIcon { key: "{link.name}", link }
            }
        }

        // Beats list (no section title)
        section { class: "mb-16",
            ul { class: "space-y-4",
                for track in portfolio.tracks.iter().cloned() {
                    TrackItem { key: "{track.src}", track }
                }
            }
        }

        footer { class: "text-center text-zinc-400 text-sm pb-8",
            a { class: "hover:underline", href: "{mailto}", "{portfolio.contact_email}" }
        }
    }
}

#[component]
fn SocialIcon(link: SocialLink) -> Element {
    rsx! {
        a {
            class: "hover:scale-110 transition",
            href: "{link.href}",
            target: "_blank",
            rel: "noopener noreferrer",
            title: "{link.name}",
            Icon { name: link.icon.clone(), class: "w-6 h-6".to_string() }
        }
    }
}

#[component]
fn TrackItem(track: TrackConfig) -> Element {
    let label = track.label.clone();

    rsx! {
        li {
            TrackPlayer {
                src: track.src,
                label: track.label,
                on_issue: move |issue: PlaybackIssue| {
                    info!(track = %label, %issue, "track reported a problem");
                },
            }
        }
    }
}
