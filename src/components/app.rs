use crate::components::AppView;
use crate::config::PortfolioConfig;
use dioxus::prelude::*;

/// Page frame shared by every route: background video behind a centered column.
#[component]
pub fn AppShell() -> Element {
    let portfolio = use_context_provider(PortfolioConfig::bundled);

    rsx! {
        main { class: "relative min-h-screen text-white font-sans overflow-hidden",
            if let Some(video) = portfolio.background_video.clone() {
                video {
                    class: "absolute inset-0 w-full h-full object-cover z-0",
                    src: "{video}",
                    autoplay: true,
                    r#loop: true,
                    muted: true,
                    playsinline: true,
                }
            }
            section { class: "relative z-10 max-w-4xl mx-auto p-6 transform scale-90 origin-top",
                Outlet::<AppView> {}
            }
        }
    }
}
