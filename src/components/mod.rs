//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod audio_manager;
mod icons;
mod track_player;
mod views;

pub use app::*;
pub use app_view::*;
pub use icons::*;
pub use track_player::*;
// Views are accessed via views::ViewName
