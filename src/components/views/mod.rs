mod home;
mod not_found;

pub use home::HomeView;
pub use not_found::NotFoundView;
