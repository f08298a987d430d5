//! The slice of the DOM the components touch.
//!
//! Controllers are generic over [`Node`] so they can run against real
//! `web_sys::Element`s in the browser and an in-memory tree in tests.

pub trait Node: Clone {
    /// Lowercase tag name, e.g. `"button"`.
    fn tag_name(&self) -> String;
    fn id(&self) -> String;
    fn text(&self) -> String;
    fn set_text(&self, text: &str);

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);

    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Force `class` on or off.
    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
    /// Flip `class` and return whether it is now present.
    fn toggle_class(&self, class: &str) -> bool {
        let on = !self.has_class(class);
        self.set_class(class, on);
        on
    }

    /// First descendant matching `selector`. Invalid selectors match nothing.
    fn query(&self, selector: &str) -> Option<Self>;
    fn query_all(&self, selector: &str) -> Vec<Self>;
    /// Direct element children, in document order.
    fn children(&self) -> Vec<Self>;
    /// Append (or move, if already attached) `child` as the last child.
    fn append_child(&self, child: &Self);
    fn same_node(&self, other: &Self) -> bool;

    /// Hidden means inline `display: none`; showing clears the inline value.
    fn set_hidden(&self, hidden: bool);
    fn is_hidden(&self) -> bool;

    /// Current value of a form control; empty for anything else.
    fn value(&self) -> String;

    fn offset_top(&self) -> f64;
    fn offset_height(&self) -> f64;
}

/// A `<form>`: field snapshot, resolved endpoint, reset.
pub trait FormNode: Node {
    /// String entries of the form's data set, in document order.
    fn fields(&self) -> Vec<(String, String)>;
    /// Resolved `action` URL (the raw attribute is `attribute("action")`).
    fn action_url(&self) -> String;
    fn reset(&self);
}

/// A `<video>` (or any media element).
pub trait MediaNode: Node {
    /// Re-run resource selection after a source change. Does not start playback.
    fn load_media(&self);
}

// ── Helpers ───────────────────────────────────────────

/// Lowercased, trimmed text used for every comparison in the work view.
pub fn norm(s: &str) -> String {
    s.trim().to_lowercase()
}

/// `#foo` style in-page reference. A lone `#` is not a reference.
pub fn in_page_fragment(href: &str) -> Option<&str> {
    if href.starts_with('#') && href != "#" {
        Some(href)
    } else {
        None
    }
}
