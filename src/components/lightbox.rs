use crate::config::LightboxConfig;
use crate::dom::Node;

/// Overlay image viewer for project galleries. Closed until a thumbnail is clicked.
#[derive(Clone)]
pub struct Lightbox<N: Node> {
    overlay: N,
    image: N,
    close_control: Option<N>,
    thumbnails: Vec<N>,
    cfg: LightboxConfig,
}

impl<N: Node> Lightbox<N> {
    /// `None` when the overlay or its image is missing.
    pub fn from_root(root: &N, cfg: &LightboxConfig) -> Option<Self> {
        let overlay = root.query(&cfg.overlay_selector)?;
        let image = root.query(&cfg.image_selector)?;
        Some(Lightbox {
            overlay,
            image,
            close_control: root.query(&cfg.close_selector),
            thumbnails: root.query_all(&cfg.thumbnail_selector),
            cfg: cfg.clone(),
        })
    }

    pub fn overlay(&self) -> &N {
        &self.overlay
    }

    pub fn close_control(&self) -> Option<&N> {
        self.close_control.as_ref()
    }

    pub fn thumbnails(&self) -> &[N] {
        &self.thumbnails
    }

    pub fn is_open(&self) -> bool {
        self.overlay.has_class(&self.cfg.open_class)
    }

    pub fn open_from(&self, thumbnail: &N) {
        let src = thumbnail.attribute("src").unwrap_or_default();
        let alt = thumbnail
            .attribute("alt")
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| self.cfg.default_alt.clone());
        self.overlay.add_class(&self.cfg.open_class);
        self.image.set_attribute("src", &src);
        self.image.set_attribute("alt", &alt);
    }

    pub fn close(&self) {
        self.overlay.remove_class(&self.cfg.open_class);
    }

    /// Clicks inside the overlay only close it when they land on the backdrop
    /// itself, not on the image or other content.
    pub fn on_overlay_click(&self, target: Option<&N>) {
        if target.is_some_and(|t| t.same_node(&self.overlay)) {
            self.close();
        }
    }

    pub fn on_key(&self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }
}
