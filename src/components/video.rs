use crate::config::VideoConfig;
use crate::dom::MediaNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategy {
    /// No intersection observer: assign every source now.
    Immediate,
    /// Assign each source the first time its element nears the viewport.
    Observe,
}

pub fn strategy(observer_supported: bool) -> LoadStrategy {
    if observer_supported {
        LoadStrategy::Observe
    } else {
        LoadStrategy::Immediate
    }
}

/// Videos whose real source sits in a deferred attribute until they are needed.
#[derive(Clone)]
pub struct LazyVideos<V: MediaNode> {
    videos: Vec<V>,
    cfg: VideoConfig,
}

impl<V: MediaNode> LazyVideos<V> {
    /// `None` when the page has no deferred videos.
    pub fn from_root(root: &V, cfg: &VideoConfig) -> Option<Self> {
        let videos = root.query_all(&cfg.video_selector);
        if videos.is_empty() {
            return None;
        }
        Some(LazyVideos {
            videos,
            cfg: cfg.clone(),
        })
    }

    pub fn videos(&self) -> &[V] {
        &self.videos
    }

    pub fn root_margin(&self) -> &str {
        &self.cfg.root_margin
    }

    /// Move the deferred source into `src` and load metadata. Returns false if
    /// the element had nothing deferred.
    pub fn reveal(&self, video: &V) -> bool {
        let src = match video.attribute(&self.cfg.source_attribute) {
            Some(s) if !s.is_empty() => s,
            _ => return false,
        };
        video.set_attribute("src", &src);
        video.remove_attribute(&self.cfg.source_attribute);
        video.load_media();
        true
    }

    pub fn reveal_all(&self) -> usize {
        self.videos.iter().filter(|v| self.reveal(v)).count()
    }

    /// Observer callback for one entry. Returns true when the element should be
    /// unobserved; observation is one-shot.
    pub fn on_intersection(&self, video: &V, intersecting: bool) -> bool {
        if !intersecting {
            return false;
        }
        if self.reveal(video) {
            log::debug!("[video] loaded deferred source");
        }
        true
    }
}
