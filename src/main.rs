use dioxus::prelude::*;
use tracing::Level;

mod components;
mod config;
mod transport;
mod utils;

use components::AppView;
use config::PortfolioConfig;

const APP_CSS: Asset = asset!("/assets/styling/app.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    if let Err(err) = dioxus::logger::init(level) {
        eprintln!("failed to initialize logger: {err}");
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let portfolio = PortfolioConfig::bundled();

    rsx! {
        document::Title { "{portfolio.artist}" }
        document::Meta { name: "description", content: "{portfolio.tagline}" }
        document::Meta { name: "theme-color", content: "#18181b" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }

        document::Stylesheet { href: TAILWIND_CSS }
        document::Stylesheet { href: APP_CSS }

        Router::<AppView> {}
    }
}
