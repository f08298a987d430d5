use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, SubmitEvent, Window,
};

use crate::components::chrome::{scroll_offset, Chrome};
use crate::components::contact::{should_intercept, ContactForm};
use crate::components::lightbox::Lightbox;
use crate::components::video::{strategy, LazyVideos, LoadStrategy};
use crate::components::work::ProjectList;
use crate::config::{ChromeConfig, ContactConfig, LightboxConfig, VideoConfig, WorkConfig};
use crate::debounce::{BrowserTimers, Debouncer};
use crate::forms::FormspreeTransport;

use super::element::El;

// ── Registrations ─────────────────────────────────────

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct ObserverGuard {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Everything one component hooked into the page. Dropping it removes every
/// listener and disconnects every observer.
#[derive(Default)]
pub struct Registrations {
    listeners: Vec<EventListener>,
    observers: Vec<ObserverGuard>,
}

impl Registrations {
    fn push(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len() + self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Teardown is the drop; this names it at call sites.
    pub fn dispose(self) {
        drop(self);
    }
}

fn scroll_y(window: &Window) -> f64 {
    scroll_offset(window.scroll_y().ok(), || {
        window
            .document()
            .and_then(|d| d.document_element())
            .map(|el| el.scroll_top() as f64)
            .unwrap_or(0.0)
    })
}

/// Run `f` on `load`, or right away if the page has already finished loading
/// (the module usually initializes after the event).
fn on_load(window: &Window, document: &Document, regs: &mut Registrations, f: impl Fn() + 'static) {
    if document.ready_state() == "complete" {
        f();
    } else {
        regs.push(EventListener::once(window, "load", move |_| f()));
    }
}

fn event_element(event: &Event) -> Option<El> {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .map(El)
}

// ── Components ────────────────────────────────────────

pub fn mount_chrome(window: &Window, document: &Document, root: &El, cfg: &ChromeConfig) -> Registrations {
    let body = document.body().map(|b| El(b.into()));
    let chrome = Rc::new(Chrome::from_root(root, body, cfg));
    let mut regs = Registrations::default();

    {
        let chrome = chrome.clone();
        let w = window.clone();
        on_load(window, document, &mut regs, move || {
            chrome.set_current_year();
            chrome.on_scroll(scroll_y(&w));
        });
    }

    if let Some(button) = chrome.menu_button() {
        let chrome = chrome.clone();
        regs.push(EventListener::new(&button.0, "click", move |_| {
            chrome.toggle_menu();
        }));
    }

    for anchor in chrome.anchors() {
        let chrome = chrome.clone();
        let link = anchor.clone();
        regs.push(EventListener::new_with_options(
            &anchor.0,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if let Some(target) = chrome.follow_anchor(&link) {
                    event.prevent_default();
                    let opts = ScrollIntoViewOptions::new();
                    opts.set_behavior(ScrollBehavior::Smooth);
                    opts.set_block(ScrollLogicalPosition::Start);
                    target.0.scroll_into_view_with_scroll_into_view_options(&opts);
                }
            },
        ));
    }

    {
        let chrome = chrome.clone();
        let w = window.clone();
        regs.push(EventListener::new(window, "scroll", move |_| {
            chrome.on_scroll(scroll_y(&w));
        }));
    }

    log::debug!(
        "[chrome] mounted: {} anchors, {} tracked sections",
        chrome.anchors().len(),
        chrome.tracked_sections()
    );
    regs
}

pub fn mount_work(root: &El, cfg: &WorkConfig) -> Option<Registrations> {
    let list = match ProjectList::from_root(root, cfg) {
        Some(list) => Rc::new(list),
        None => {
            log::debug!("[work] no project container, disabled");
            return None;
        }
    };
    list.init();
    let mut regs = Registrations::default();

    if let Some(sort) = list.sort_control() {
        let list = list.clone();
        regs.push(EventListener::new(&sort.0, "change", move |_| list.on_sort_change()));
    }

    if let Some(search) = list.search_control() {
        let target = list.clone();
        let debouncer = Debouncer::new(BrowserTimers, list.debounce_ms(), move || {
            target.apply_filters();
        });
        regs.push(EventListener::new(&search.0, "input", move |_| debouncer.call()));
    }

    if let Some(kind) = list.type_control() {
        let list = list.clone();
        regs.push(EventListener::new(&kind.0, "change", move |_| list.on_type_change()));
    }

    log::debug!("[work] mounted on {:?} container", list.role());
    Some(regs)
}

pub fn mount_contact(root: &El, cfg: &ContactConfig) -> Option<Registrations> {
    let contact = match ContactForm::from_root(root, cfg) {
        Some(contact) => Rc::new(contact),
        None => {
            log::debug!("[contact] no form, disabled");
            return None;
        }
    };
    let transport = Rc::new(FormspreeTransport::new());
    let form = contact.form().0.clone();
    let mut regs = Registrations::default();

    regs.push(EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let submitter = event
                .dyn_ref::<SubmitEvent>()
                .and_then(|e| e.submitter())
                .map(|el| El(el.into()));
            if !should_intercept(submitter.as_ref()) {
                return;
            }
            event.prevent_default();

            let contact = contact.clone();
            let transport = transport.clone();
            spawn_local(async move {
                let outcome = contact.submit(transport.as_ref()).await;
                log::debug!("[contact] outcome {:?}", outcome);
            });
        },
    ));

    Some(regs)
}

pub fn mount_lightbox(document: &Document, root: &El, cfg: &LightboxConfig) -> Option<Registrations> {
    let lightbox = match Lightbox::from_root(root, cfg) {
        Some(lightbox) => Rc::new(lightbox),
        None => {
            log::debug!("[lightbox] no overlay or image, disabled");
            return None;
        }
    };
    let mut regs = Registrations::default();

    for thumb in lightbox.thumbnails() {
        let lightbox = lightbox.clone();
        let img = thumb.clone();
        regs.push(EventListener::new(&thumb.0, "click", move |_| lightbox.open_from(&img)));
    }

    if let Some(close) = lightbox.close_control() {
        let lightbox = lightbox.clone();
        regs.push(EventListener::new(&close.0, "click", move |_| lightbox.close()));
    }

    {
        let lb = lightbox.clone();
        regs.push(EventListener::new(&lightbox.overlay().0, "click", move |event| {
            lb.on_overlay_click(event_element(event).as_ref());
        }));
    }

    {
        let lightbox = lightbox.clone();
        regs.push(EventListener::new(document, "keydown", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                lightbox.on_key(&key.key());
            }
        }));
    }

    Some(regs)
}

pub fn mount_videos(window: &Window, root: &El, cfg: &VideoConfig) -> Option<Registrations> {
    let videos = match LazyVideos::from_root(root, cfg) {
        Some(videos) => Rc::new(videos),
        None => {
            log::debug!("[video] no deferred sources, disabled");
            return None;
        }
    };
    let mut regs = Registrations::default();

    let supported = js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
    if strategy(supported) == LoadStrategy::Immediate {
        let n = videos.reveal_all();
        log::debug!("[video] no IntersectionObserver, loaded {} sources now", n);
        return Some(regs);
    }

    let handler = videos.clone();
    let callback: ObserverCallback = Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry = match entry.dyn_into::<IntersectionObserverEntry>() {
                Ok(e) => e,
                Err(_) => continue,
            };
            let target = entry.target();
            if handler.on_intersection(&El(target.clone()), entry.is_intersecting()) {
                observer.unobserve(&target);
            }
        }
    });

    let init = IntersectionObserverInit::new();
    init.set_root_margin(videos.root_margin());
    let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(o) => o,
        Err(e) => {
            log::warn!("[video] observer rejected ({:?}), loading sources now", e);
            videos.reveal_all();
            return Some(regs);
        }
    };
    for video in videos.videos() {
        observer.observe(&video.0);
    }
    regs.observers.push(ObserverGuard {
        observer,
        _callback: callback,
    });

    Some(regs)
}
