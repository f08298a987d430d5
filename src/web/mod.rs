//! Browser entry point and DOM wiring.

pub mod element;
pub mod mount;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::config::{get_bool, settings_from_attributes, SiteConfig};

pub use element::El;
pub use mount::Registrations;

const CONFIG_SCRIPT_ID: &str = "folio-config";

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

/// Handles of every mounted component. `None` fields self-disabled because the
/// page lacks their elements.
pub struct Site {
    pub chrome: Registrations,
    pub work: Option<Registrations>,
    pub contact: Option<Registrations>,
    pub lightbox: Option<Registrations>,
    pub videos: Option<Registrations>,
}

impl Site {
    pub fn mount(window: &Window, document: &Document, cfg: &SiteConfig) -> Option<Self> {
        let root = El(document.document_element()?);
        let site = Site {
            chrome: mount::mount_chrome(window, document, &root, &cfg.chrome),
            work: mount::mount_work(&root, &cfg.work),
            contact: mount::mount_contact(&root, &cfg.contact),
            lightbox: mount::mount_lightbox(document, &root, &cfg.lightbox),
            videos: mount::mount_videos(window, &root, &cfg.video),
        };
        log::info!(
            "[site] mounted: work={} contact={} lightbox={} videos={}",
            site.work.is_some(),
            site.contact.is_some(),
            site.lightbox.is_some(),
            site.videos.is_some()
        );
        Some(site)
    }

    /// Drops every component's registrations.
    pub fn dispose(self) {
        drop(self);
    }
}

fn body_settings(document: &Document) -> std::collections::HashMap<String, String> {
    let body = match document.body() {
        Some(b) => b,
        None => return Default::default(),
    };
    let attrs = body
        .get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| body.get_attribute(&name).map(|value| (name, value)))
        .collect::<Vec<_>>();
    settings_from_attributes(attrs)
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };
    let document = match window.document() {
        Some(d) => d,
        None => return,
    };

    let settings = body_settings(&document);
    let level = if get_bool(&settings, "debug") {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    let _ = console_log::init_with_level(level);

    let json = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content());
    let cfg = SiteConfig::load(&settings, json.as_deref());

    if let Some(site) = Site::mount(&window, &document, &cfg) {
        SITE.with(|s| *s.borrow_mut() = Some(site));
    }
}

/// Unhook everything `start` mounted.
#[wasm_bindgen]
pub fn stop() {
    if let Some(site) = SITE.with(|s| s.borrow_mut().take()) {
        site.dispose();
    }
}
