//! Audio Manager - binds a track transport to the platform's media element.
//! The browser build owns an `HTMLAudioElement` directly; native builds drive one
//! inside the webview through a script bridge.

#[cfg(target_arch = "wasm32")]
#[cfg_attr(test, allow(dead_code))]
mod web_backend;
#[cfg(all(target_arch = "wasm32", not(test)))]
pub use web_backend::WebMedia as PlatformMedia;

#[cfg(not(target_arch = "wasm32"))]
#[cfg_attr(test, allow(dead_code))]
mod bridge_bootstrap;
#[cfg(not(target_arch = "wasm32"))]
#[cfg_attr(test, allow(dead_code))]
mod bridge_backend;
#[cfg(all(not(target_arch = "wasm32"), not(test)))]
pub use bridge_backend::BridgeMedia as PlatformMedia;

// components under test drive the recording element
#[cfg(test)]
pub use crate::transport::mock::MockMedia as PlatformMedia;
