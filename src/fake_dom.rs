//! In-memory element tree implementing the `dom` traits, with enough CSS
//! selector support (tag, `#id`, `.class`, `[attr]`, `[attr="v"]`,
//! `[attr^="v"]`, descendant combinator, `,` groups) for the default config.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::dom::{FormNode, MediaNode, Node};

#[derive(Default)]
struct Inner {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    value: String,
    hidden: bool,
    top: f64,
    height: f64,
    loads: usize,
    children: Vec<FakeNode>,
    parent: Weak<RefCell<Inner>>,
}

#[derive(Clone)]
pub struct FakeNode(Rc<RefCell<Inner>>);

impl std::fmt::Debug for FakeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.0.borrow();
        write!(f, "<{} {:?} {:?}>", inner.tag, inner.attrs, inner.classes)
    }
}

impl FakeNode {
    pub fn new(tag: &str) -> Self {
        FakeNode(Rc::new(RefCell::new(Inner {
            tag: tag.to_lowercase(),
            ..Default::default()
        })))
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        Node::set_attribute(&self, name, value);
        self
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.0.borrow_mut().text = text.to_string();
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_geometry(self, top: f64, height: f64) -> Self {
        {
            let mut inner = self.0.borrow_mut();
            inner.top = top;
            inner.height = height;
        }
        self
    }

    pub fn child(self, child: FakeNode) -> Self {
        self.append_child(&child);
        self
    }

    pub fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = value.to_string();
    }

    pub fn loads(&self) -> usize {
        self.0.borrow().loads
    }

    fn parent(&self) -> Option<FakeNode> {
        self.0.borrow().parent.upgrade().map(FakeNode)
    }

    fn descendants(&self) -> Vec<FakeNode> {
        let mut out = Vec::new();
        for c in self.0.borrow().children.iter() {
            out.push(c.clone());
            out.extend(c.descendants());
        }
        out
    }

    fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.0.borrow_mut().children.retain(|c| !Rc::ptr_eq(&c.0, &self.0));
        }
        self.0.borrow_mut().parent = Weak::new();
    }
}

impl Node for FakeNode {
    fn tag_name(&self) -> String {
        self.0.borrow().tag.clone()
    }

    fn id(&self) -> String {
        self.attribute("id").unwrap_or_default()
    }

    fn text(&self) -> String {
        let inner = self.0.borrow();
        let mut out = inner.text.clone();
        for c in &inner.children {
            out.push_str(&c.text());
        }
        out
    }

    fn set_text(&self, text: &str) {
        let kids: Vec<FakeNode> = self.0.borrow().children.clone();
        for k in kids {
            k.detach();
        }
        self.0.borrow_mut().text = text.to_string();
    }

    fn attribute(&self, name: &str) -> Option<String> {
        let inner = self.0.borrow();
        if name == "class" {
            return if inner.classes.is_empty() {
                None
            } else {
                Some(inner.classes.join(" "))
            };
        }
        inner.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut inner = self.0.borrow_mut();
        if name == "class" {
            inner.classes = value.split_whitespace().map(String::from).collect();
            return;
        }
        match inner.attrs.iter().position(|(k, _)| k == name) {
            Some(i) => inner.attrs[i].1 = value.to_string(),
            None => inner.attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attrs.retain(|(k, _)| k != name);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn query(&self, selector: &str) -> Option<Self> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        let groups = match Selector::parse(selector) {
            Some(g) => g,
            None => return vec![],
        };
        self.descendants()
            .into_iter()
            .filter(|n| groups.iter().any(|chain| chain.matches(n)))
            .collect()
    }

    fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    fn append_child(&self, child: &Self) {
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
    }

    fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn set_hidden(&self, hidden: bool) {
        self.0.borrow_mut().hidden = hidden;
    }

    fn is_hidden(&self) -> bool {
        self.0.borrow().hidden
    }

    fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    fn offset_top(&self) -> f64 {
        self.0.borrow().top
    }

    fn offset_height(&self) -> f64 {
        self.0.borrow().height
    }
}

fn is_field(n: &FakeNode) -> bool {
    matches!(n.tag_name().as_str(), "input" | "textarea" | "select")
}

impl FormNode for FakeNode {
    fn fields(&self) -> Vec<(String, String)> {
        self.descendants()
            .into_iter()
            .filter(is_field)
            .filter_map(|n| n.attribute("name").map(|name| (name, n.value())))
            .collect()
    }

    fn action_url(&self) -> String {
        self.attribute("action").unwrap_or_default()
    }

    fn reset(&self) {
        for n in self.descendants().into_iter().filter(is_field) {
            n.set_value("");
        }
    }
}

impl MediaNode for FakeNode {
    fn load_media(&self) {
        self.0.borrow_mut().loads += 1;
    }
}

// ── Selectors ─────────────────────────────────────────

enum AttrOp {
    Exists,
    Eq(String),
    Prefix(String),
}

#[derive(Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, AttrOp)>,
}

impl Compound {
    fn parse(s: &str) -> Option<Self> {
        let is_delim = |c: char| c == '#' || c == '.' || c == '[';
        let mut out = Compound::default();
        let tag_end = s.find(is_delim).unwrap_or(s.len());
        let tag = &s[..tag_end];
        if !tag.is_empty() && tag != "*" {
            out.tag = Some(tag.to_lowercase());
        }
        let mut rest = &s[tag_end..];
        while let Some(first) = rest.chars().next() {
            match first {
                '#' | '.' => {
                    let end = rest[1..].find(is_delim).map(|i| i + 1).unwrap_or(rest.len());
                    let name = &rest[1..end];
                    if name.is_empty() {
                        return None;
                    }
                    if first == '#' {
                        out.id = Some(name.to_string());
                    } else {
                        out.classes.push(name.to_string());
                    }
                    rest = &rest[end..];
                }
                '[' => {
                    let end = rest.find(']')?;
                    let body = &rest[1..end];
                    let unquote = |v: &str| v.trim().trim_matches('"').trim_matches('\'').to_string();
                    let attr = if let Some((k, v)) = body.split_once("^=") {
                        (k.trim().to_string(), AttrOp::Prefix(unquote(v)))
                    } else if let Some((k, v)) = body.split_once('=') {
                        (k.trim().to_string(), AttrOp::Eq(unquote(v)))
                    } else {
                        (body.trim().to_string(), AttrOp::Exists)
                    };
                    out.attrs.push(attr);
                    rest = &rest[end + 1..];
                }
                _ => return None,
            }
        }
        Some(out)
    }

    fn matches(&self, n: &FakeNode) -> bool {
        if let Some(tag) = &self.tag {
            if &n.tag_name() != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if &n.id() != id {
                return false;
            }
        }
        if !self.classes.iter().all(|c| n.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, op)| match (n.attribute(name), op) {
            (None, _) => false,
            (Some(_), AttrOp::Exists) => true,
            (Some(v), AttrOp::Eq(want)) => &v == want,
            (Some(v), AttrOp::Prefix(want)) => v.starts_with(want.as_str()),
        })
    }
}

/// Descendant chain, outermost compound first.
struct Selector(Vec<Compound>);

impl Selector {
    fn parse(s: &str) -> Option<Vec<Selector>> {
        s.split(',')
            .map(|group| {
                let parts = group
                    .split_whitespace()
                    .map(Compound::parse)
                    .collect::<Option<Vec<_>>>()?;
                if parts.is_empty() {
                    None
                } else {
                    Some(Selector(parts))
                }
            })
            .collect()
    }

    fn matches(&self, n: &FakeNode) -> bool {
        let (last, ancestors) = match self.0.split_last() {
            Some(split) => split,
            None => return false,
        };
        if !last.matches(n) {
            return false;
        }
        let mut remaining = ancestors.iter().rev().peekable();
        let mut cursor = n.parent();
        while let Some(&want) = remaining.peek() {
            match cursor {
                Some(p) => {
                    if want.matches(&p) {
                        remaining.next();
                    }
                    cursor = p.parent();
                }
                None => return false,
            }
        }
        true
    }
}
