use crate::config::WorkConfig;
use crate::dom::Node;
use crate::models::project::{sort_order, Filter, ProjectEntry, SortMode};

/// Which of the two list layouts the page uses. Resolved once at mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRole {
    Stack,
    Grid,
}

/// Filter + sort view over the work page's project cards. Cards are only ever
/// shown, hidden or moved inside their container; none are created or removed.
#[derive(Clone)]
pub struct ProjectList<N: Node> {
    container: N,
    role: ContainerRole,
    sort_control: Option<N>,
    search_control: Option<N>,
    type_control: Option<N>,
    cfg: WorkConfig,
}

impl<N: Node> ProjectList<N> {
    /// `None` when the page has neither container; nothing else is queried then.
    pub fn from_root(root: &N, cfg: &WorkConfig) -> Option<Self> {
        let (container, role) = match root.query(&cfg.stack_selector) {
            Some(el) => (el, ContainerRole::Stack),
            None => (root.query(&cfg.grid_selector)?, ContainerRole::Grid),
        };

        Some(ProjectList {
            container,
            role,
            sort_control: root.query(&cfg.sort_selector),
            search_control: root.query(&cfg.search_selector),
            type_control: root.query(&cfg.type_filter_selector),
            cfg: cfg.clone(),
        })
    }

    pub fn role(&self) -> ContainerRole {
        self.role
    }

    pub fn sort_control(&self) -> Option<&N> {
        self.sort_control.as_ref()
    }

    pub fn search_control(&self) -> Option<&N> {
        self.search_control.as_ref()
    }

    pub fn type_control(&self) -> Option<&N> {
        self.type_control.as_ref()
    }

    pub fn debounce_ms(&self) -> u32 {
        self.cfg.search_debounce_ms
    }

    pub fn items(&self) -> Vec<N> {
        self.container.children()
    }

    pub fn read_entry(&self, el: &N) -> ProjectEntry {
        let name = el.query(&self.cfg.name_selector).map(|h| h.text());
        let tags: Vec<String> = el
            .query_all(&self.cfg.tags_selector)
            .iter()
            .map(|li| li.text())
            .collect();
        ProjectEntry::new(
            name.as_deref(),
            &tags,
            el.attribute(&self.cfg.type_attribute).as_deref(),
            el.attribute(&self.cfg.date_attribute).as_deref(),
        )
    }

    /// Filter state, read live from the controls.
    pub fn current_filter(&self) -> Filter {
        let value = |c: &Option<N>| c.as_ref().map(|el| el.value()).unwrap_or_default();
        Filter::new(&value(&self.search_control), &value(&self.type_control))
    }

    pub fn current_sort(&self) -> SortMode {
        match &self.sort_control {
            Some(el) => SortMode::from_str(&el.value()),
            None => SortMode::Newest,
        }
    }

    /// Show the cards matching the current filter, hide the rest. Returns how
    /// many are visible.
    pub fn apply_filters(&self) -> usize {
        let filter = self.current_filter();
        let mut visible = 0;
        for el in self.items() {
            let show = self.read_entry(&el).matches(&filter);
            el.set_hidden(!show);
            if show {
                visible += 1;
            }
        }
        log::debug!("[work] filter {:?}: {} visible", filter, visible);
        visible
    }

    /// Reorder cards in place. Stable: ties keep their current order.
    pub fn sort_items(&self, mode: SortMode) {
        let items = self.items();
        let entries: Vec<ProjectEntry> = items.iter().map(|el| self.read_entry(el)).collect();
        for idx in sort_order(&entries, mode) {
            self.container.append_child(&items[idx]);
        }
        log::debug!("[work] sorted {} items by {}", items.len(), mode.as_str());
    }

    // ── Event entry points ────────────────────────────

    pub fn init(&self) {
        self.sort_items(self.current_sort());
        self.apply_filters();
    }

    pub fn on_sort_change(&self) {
        self.sort_items(self.current_sort());
        self.apply_filters();
    }

    pub fn on_type_change(&self) {
        self.apply_filters();
    }
}
