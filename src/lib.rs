//! Client-side behaviour for the portfolio pages: chrome (nav, anchors, scroll
//! state), the work page filter/sort view, the contact form, the gallery
//! lightbox and lazy videos.
//!
//! Components are plain controllers over [`dom::Node`]; the `web` module binds
//! them to the browser and is only built for wasm32.

pub mod components;
pub mod config;
pub mod debounce;
pub mod dom;
pub mod forms;
pub mod models;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod fake_dom;
