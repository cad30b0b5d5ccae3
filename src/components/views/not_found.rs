use crate::components::AppView;
use dioxus::prelude::*;

#[component]
pub fn NotFoundView(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        div { class: "text-center py-24",
            h1 { class: "text-5xl font-bold tracking-tight mb-4", "404" }
            p { class: "text-zinc-300 text-lg mb-6", "Nothing lives at /{path}" }
            Link { class: "text-zinc-400 hover:underline", to: AppView::HomeView {}, "Back to the beats" }
        }
    }
}
