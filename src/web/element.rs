use wasm_bindgen::JsCast;
use web_sys::{
    Element, FormData, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlMediaElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

use crate::dom::{FormNode, MediaNode, Node};

/// A live DOM element.
#[derive(Debug, Clone, PartialEq)]
pub struct El(pub Element);

impl El {
    fn html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }
}

impl From<Element> for El {
    fn from(el: Element) -> Self {
        El(el)
    }
}

impl Node for El {
    fn tag_name(&self) -> String {
        self.0.tag_name().to_lowercase()
    }

    fn id(&self) -> String {
        self.0.id()
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(e) = self.0.set_attribute(name, value) {
            log::debug!("[dom] set_attribute({}) failed: {:?}", name, e);
        }
    }

    fn remove_attribute(&self, name: &str) {
        let _ = self.0.remove_attribute(name);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn set_class(&self, class: &str, on: bool) {
        let _ = self.0.class_list().toggle_with_force(class, on);
    }

    fn query(&self, selector: &str) -> Option<Self> {
        self.0.query_selector(selector).ok().flatten().map(El)
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        let list = match self.0.query_selector_all(selector) {
            Ok(list) => list,
            Err(_) => return vec![],
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .map(El)
            .collect()
    }

    fn children(&self) -> Vec<Self> {
        let kids = self.0.children();
        (0..kids.length()).filter_map(|i| kids.item(i)).map(El).collect()
    }

    fn append_child(&self, child: &Self) {
        let _ = self.0.append_child(&child.0);
    }

    fn same_node(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn set_hidden(&self, hidden: bool) {
        if let Some(el) = self.html() {
            let style = el.style();
            let _ = if hidden {
                style.set_property("display", "none")
            } else {
                style.remove_property("display").map(|_| ())
            };
        }
    }

    fn is_hidden(&self) -> bool {
        self.html()
            .and_then(|el| el.style().get_property_value("display").ok())
            .is_some_and(|v| v == "none")
    }

    fn value(&self) -> String {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn offset_top(&self) -> f64 {
        self.html().map(|el| el.offset_top() as f64).unwrap_or(0.0)
    }

    fn offset_height(&self) -> f64 {
        self.html().map(|el| el.offset_height() as f64).unwrap_or(0.0)
    }
}

impl FormNode for El {
    fn fields(&self) -> Vec<(String, String)> {
        let form = match self.0.dyn_ref::<HtmlFormElement>() {
            Some(f) => f,
            None => return vec![],
        };
        let data = match FormData::new_with_form(form) {
            Ok(d) => d,
            Err(_) => return vec![],
        };
        let entries = match js_sys::try_iter(&data) {
            Ok(Some(it)) => it,
            _ => return vec![],
        };
        // File entries do not stringify and are skipped.
        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let pair = entry.dyn_into::<js_sys::Array>().ok()?;
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }

    fn action_url(&self) -> String {
        match self.0.dyn_ref::<HtmlFormElement>() {
            Some(f) => f.action(),
            None => self.attribute("action").unwrap_or_default(),
        }
    }

    fn reset(&self) {
        if let Some(f) = self.0.dyn_ref::<HtmlFormElement>() {
            f.reset();
        }
    }
}

impl MediaNode for El {
    fn load_media(&self) {
        if let Some(media) = self.0.dyn_ref::<HtmlMediaElement>() {
            media.load();
        }
    }
}
