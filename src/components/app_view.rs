//! Defines the routes of the page.

use crate::components::views::{HomeView, NotFoundView};
use crate::components::AppShell;
use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum AppView {
    #[layout(AppShell)]
        #[route("/")]
        HomeView {},
        #[route("/:..segments")]
        NotFoundView { segments: Vec<String> },
}
