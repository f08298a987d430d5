use serde::Deserialize;
use std::collections::HashMap;

/// Page level configuration. Every selector, class name, timing and message the
/// components rely on lives here so a page can retarget them without a rebuild.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub chrome: ChromeConfig,
    pub work: WorkConfig,
    pub contact: ContactConfig,
    pub lightbox: LightboxConfig,
    pub video: VideoConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    pub year_selector: String,
    pub menu_button_selector: String,
    pub nav_selector: String,
    pub nav_open_class: String,
    pub expanded_attribute: String,
    pub anchor_selector: String,
    pub nav_link_selector: String,
    pub active_class: String,
    /// Added to `scrollY` before probing which section is under the nav bar.
    pub section_offset: f64,
    pub scrolled_class: String,
    /// Body gets `scrolled_class` once the scroll offset is strictly above this.
    pub scrolled_threshold: f64,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        ChromeConfig {
            year_selector: "#year".to_string(),
            menu_button_selector: "#menu-btn".to_string(),
            nav_selector: "#nav-links".to_string(),
            nav_open_class: "open".to_string(),
            expanded_attribute: "aria-expanded".to_string(),
            anchor_selector: "a[href^=\"#\"]".to_string(),
            nav_link_selector: ".nav-link".to_string(),
            active_class: "active".to_string(),
            section_offset: 100.0,
            scrolled_class: "scrolled".to_string(),
            scrolled_threshold: 8.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkConfig {
    pub stack_selector: String,
    pub grid_selector: String,
    pub sort_selector: String,
    pub search_selector: String,
    pub type_filter_selector: String,
    pub name_selector: String,
    pub tags_selector: String,
    pub type_attribute: String,
    pub date_attribute: String,
    pub search_debounce_ms: u32,
}

impl Default for WorkConfig {
    fn default() -> Self {
        WorkConfig {
            stack_selector: "#work-stack".to_string(),
            grid_selector: "#work-grid".to_string(),
            sort_selector: "#sort".to_string(),
            search_selector: "#search".to_string(),
            type_filter_selector: "#filter-type".to_string(),
            name_selector: "h3".to_string(),
            tags_selector: ".project-tags li".to_string(),
            type_attribute: "data-type".to_string(),
            date_attribute: "data-date".to_string(),
            search_debounce_ms: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub form_selector: String,
    pub status_selector: String,
    pub honeypot_selector: String,
    /// Literal left in the form action until the site owner wires a real endpoint.
    pub placeholder_token: String,
    pub show_class: String,
    pub success_class: String,
    pub error_class: String,
    pub not_configured_message: String,
    pub spam_message: String,
    pub success_message: String,
    pub failure_message: String,
    pub network_error_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        ContactConfig {
            form_selector: "form[name=\"contact\"]".to_string(),
            status_selector: "#form-status".to_string(),
            honeypot_selector: "input[name=\"website\"]".to_string(),
            placeholder_token: "YOUR_FORM_ID".to_string(),
            show_class: "show".to_string(),
            success_class: "success".to_string(),
            error_class: "error".to_string(),
            not_configured_message: "Form is not configured yet. Replace YOUR_FORM_ID in index.html with your Formspree form ID.".to_string(),
            spam_message: "Spam detected. Message not sent.".to_string(),
            success_message: "Thanks! Your message was sent.".to_string(),
            failure_message: "Something went wrong. Please try again.".to_string(),
            network_error_message: "Network error. Please try again later.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    pub overlay_selector: String,
    pub image_selector: String,
    pub close_selector: String,
    pub thumbnail_selector: String,
    pub open_class: String,
    pub default_alt: String,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        LightboxConfig {
            overlay_selector: "#lightbox".to_string(),
            image_selector: "#lightbox-img".to_string(),
            close_selector: ".lightbox-close".to_string(),
            thumbnail_selector: ".gallery-grid img".to_string(),
            open_class: "open".to_string(),
            default_alt: "Gallery image".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub video_selector: String,
    pub source_attribute: String,
    pub root_margin: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            video_selector: "video[data-src]".to_string(),
            source_attribute: "data-src".to_string(),
            root_margin: "200px 0px".to_string(),
        }
    }
}

// ── Loading ───────────────────────────────────────────

impl SiteConfig {
    /// Parse a full JSON config blob. Missing keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("invalid config JSON: {}", e))
    }

    /// Build from flat `key -> value` settings (normally the body's `data-*`
    /// attributes). Only the scalar tunables are exposed this way.
    pub fn from_settings(settings: &HashMap<String, String>) -> Self {
        let mut cfg = SiteConfig::default();

        let sg = |key: &str, def: &str| -> String {
            settings
                .get(key)
                .cloned()
                .unwrap_or_else(|| def.to_string())
        };

        cfg.work.search_debounce_ms = get_u32(settings, "search_debounce_ms", cfg.work.search_debounce_ms);
        cfg.chrome.section_offset = get_f64(settings, "section_offset", cfg.chrome.section_offset);
        cfg.chrome.scrolled_threshold = get_f64(settings, "scrolled_threshold", cfg.chrome.scrolled_threshold);
        cfg.contact.placeholder_token = sg("form_placeholder", &cfg.contact.placeholder_token);
        cfg.contact.success_message = sg("form_success_message", &cfg.contact.success_message);
        cfg.contact.failure_message = sg("form_failure_message", &cfg.contact.failure_message);
        cfg.contact.network_error_message = sg("form_network_message", &cfg.contact.network_error_message);
        cfg.lightbox.default_alt = sg("lightbox_default_alt", &cfg.lightbox.default_alt);
        cfg.video.root_margin = sg("video_root_margin", &cfg.video.root_margin);
        cfg
    }

    /// The JSON blob wins when present and valid; otherwise fall back to settings.
    pub fn load(settings: &HashMap<String, String>, json: Option<&str>) -> Self {
        if let Some(raw) = json.filter(|s| !s.trim().is_empty()) {
            match Self::from_json(raw) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!("[config] {}, using data attributes", e),
            }
        }
        Self::from_settings(settings)
    }
}

/// Turn `data-search-debounce-ms` style attribute names into `search_debounce_ms`
/// settings keys. Non-`data-` attributes are skipped.
pub fn settings_from_attributes<I, K, V>(attrs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    attrs
        .into_iter()
        .filter_map(|(name, value)| {
            let key = name.as_ref().strip_prefix("data-")?;
            if key.is_empty() {
                return None;
            }
            Some((key.replace('-', "_"), value.into()))
        })
        .collect()
}

pub fn get_bool(settings: &HashMap<String, String>, key: &str) -> bool {
    settings
        .get(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

fn get_u32(settings: &HashMap<String, String>, key: &str, default: u32) -> u32 {
    match settings.get(key) {
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            log::warn!("[config] {}={:?} is not a whole number, keeping {}", key, v, default);
            default
        }),
        None => default,
    }
}

fn get_f64(settings: &HashMap<String, String>, key: &str, default: f64) -> f64 {
    match settings.get(key) {
        Some(v) => match v.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => {
                log::warn!("[config] {}={:?} is not a number, keeping {}", key, v, default);
                default
            }
        },
        None => default,
    }
}
