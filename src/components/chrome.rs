use chrono::Datelike;

use crate::config::ChromeConfig;
use crate::dom::{in_page_fragment, Node};

/// Site-wide chrome: footer year, mobile menu, in-page anchors, active nav link,
/// and the solid nav bar once the page has scrolled.
#[derive(Clone)]
pub struct Chrome<N: Node> {
    root: N,
    body: Option<N>,
    year: Option<N>,
    button: Option<N>,
    nav: Option<N>,
    anchors: Vec<N>,
    links: Vec<N>,
    /// Targets of `links`, collected once; links without a target are not tracked.
    sections: Vec<N>,
    cfg: ChromeConfig,
}

impl<N: Node> Chrome<N> {
    pub fn from_root(root: &N, body: Option<N>, cfg: &ChromeConfig) -> Self {
        let links = root.query_all(&cfg.nav_link_selector);
        let sections = links
            .iter()
            .filter_map(|l| {
                let href = l.attribute("href").unwrap_or_default();
                in_page_fragment(&href).and_then(|frag| root.query(frag))
            })
            .collect();

        Chrome {
            root: root.clone(),
            body,
            year: root.query(&cfg.year_selector),
            button: root.query(&cfg.menu_button_selector),
            nav: root.query(&cfg.nav_selector),
            anchors: root.query_all(&cfg.anchor_selector),
            links,
            sections,
            cfg: cfg.clone(),
        }
    }

    pub fn menu_button(&self) -> Option<&N> {
        self.button.as_ref()
    }

    pub fn anchors(&self) -> &[N] {
        &self.anchors
    }

    pub fn tracked_sections(&self) -> usize {
        self.sections.len()
    }

    // ── Footer year ───────────────────────────────────

    pub fn set_year(&self, year: i32) -> bool {
        match &self.year {
            Some(el) => {
                el.set_text(&year.to_string());
                true
            }
            None => false,
        }
    }

    pub fn set_current_year(&self) -> bool {
        self.set_year(chrono::Local::now().year())
    }

    // ── Mobile menu ───────────────────────────────────

    /// Flip the nav's open state and mirror it into the button. `None` when the
    /// button or nav is missing.
    pub fn toggle_menu(&self) -> Option<bool> {
        let (button, nav) = (self.button.as_ref()?, self.nav.as_ref()?);
        let open = nav.toggle_class(&self.cfg.nav_open_class);
        button.set_attribute(&self.cfg.expanded_attribute, if open { "true" } else { "false" });
        Some(open)
    }

    pub fn collapse_menu(&self) {
        if let Some(nav) = &self.nav {
            nav.remove_class(&self.cfg.nav_open_class);
        }
        if let Some(button) = &self.button {
            button.set_attribute(&self.cfg.expanded_attribute, "false");
        }
    }

    // ── Anchors ───────────────────────────────────────

    /// Element an in-page anchor points at, if it exists right now.
    pub fn anchor_target(&self, anchor: &N) -> Option<N> {
        let href = anchor.attribute("href")?;
        self.root.query(in_page_fragment(&href)?)
    }

    /// Handle an anchor click. Returns the element to scroll to; `None` means the
    /// click is left to the browser.
    pub fn follow_anchor(&self, anchor: &N) -> Option<N> {
        let target = self.anchor_target(anchor)?;
        self.collapse_menu();
        Some(target)
    }

    // ── Scroll state ──────────────────────────────────

    /// `#id` of the first tracked section containing `scroll_y + offset`.
    pub fn active_section(&self, scroll_y: f64) -> Option<String> {
        let y = scroll_y + self.cfg.section_offset;
        self.sections
            .iter()
            .find(|sec| {
                let top = sec.offset_top();
                y >= top && y < top + sec.offset_height()
            })
            .map(|sec| format!("#{}", sec.id()))
    }

    pub fn highlight_active(&self, scroll_y: f64) {
        if self.sections.is_empty() {
            return;
        }
        let active = self.active_section(scroll_y);
        for link in &self.links {
            let href = link.attribute("href").unwrap_or_default();
            link.set_class(&self.cfg.active_class, active.as_deref() == Some(href.as_str()));
        }
    }

    pub fn update_nav_solid(&self, scroll_y: f64) {
        if let Some(body) = &self.body {
            body.set_class(&self.cfg.scrolled_class, scroll_y > self.cfg.scrolled_threshold);
        }
    }

    /// Everything that runs on `scroll` and on `load`.
    pub fn on_scroll(&self, scroll_y: f64) {
        self.highlight_active(scroll_y);
        self.update_nav_solid(scroll_y);
    }
}

/// Page scroll offset: the window's value, or the root element's `scrollTop`
/// when the window reports nothing (missing or zero).
pub fn scroll_offset(window_y: Option<f64>, root_scroll_top: impl FnOnce() -> f64) -> f64 {
    match window_y {
        Some(y) if y > 0.0 => y,
        _ => root_scroll_top(),
    }
}
