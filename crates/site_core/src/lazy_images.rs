use serde::Serialize;
use shared::{
    domain::{ImageId, Rect},
    markup::ImageMarkup,
};
use tracing::{debug, warn};

use crate::viewport::{IntersectionOptions, Viewport};

#[derive(Debug, Clone, Serialize)]
pub struct LazyImage {
    pub src: Option<String>,
    pub data_src: Option<String>,
    /// Deferred-load marker; removed once the real source is assigned on intersection.
    pub lazy: bool,
    pub rect: Rect,
    pub observed: bool,
}

impl LazyImage {
    fn load(&mut self) {
        match &self.data_src {
            Some(source) => self.src = Some(source.clone()),
            None => warn!("lazy image has no deferred source"),
        }
    }
}

#[derive(Debug)]
pub struct LazyImages {
    options: IntersectionOptions,
    images: Vec<LazyImage>,
}

impl LazyImages {
    /// Without intersection observation every deferred source is assigned immediately.
    pub fn init(markup: &[ImageMarkup], observer_available: bool) -> Self {
        let mut images: Vec<LazyImage> = markup
            .iter()
            .map(|image| LazyImage {
                src: image.src.clone(),
                data_src: image.data_src.clone(),
                lazy: image.lazy,
                rect: image.rect,
                observed: image.lazy && observer_available,
            })
            .collect();

        if !observer_available {
            for image in images.iter_mut().filter(|image| image.lazy) {
                image.load();
            }
            debug!("intersection observation unavailable; loaded all deferred images");
        }

        Self {
            options: IntersectionOptions::default(),
            images,
        }
    }

    pub fn image(&self, id: ImageId) -> Option<&LazyImage> {
        self.images.get(id.index())
    }

    pub fn images(&self) -> &[LazyImage] {
        &self.images
    }

    pub fn on_viewport_change(&mut self, viewport: &Viewport) -> Vec<ImageId> {
        let mut loaded = Vec::new();
        for (index, image) in self.images.iter_mut().enumerate() {
            if !image.observed || !self.options.is_intersecting(&image.rect, viewport) {
                continue;
            }
            image.load();
            image.lazy = false;
            image.observed = false;
            loaded.push(ImageId(index));
        }
        if !loaded.is_empty() {
            debug!(count = loaded.len(), "deferred images loaded");
        }
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(top: f64, lazy: bool) -> ImageMarkup {
        ImageMarkup {
            src: None,
            data_src: Some(format!("/img/{top}.jpg")),
            lazy,
            rect: Rect::new(top, 200.0),
        }
    }

    #[test]
    fn loads_on_first_intersection_only() {
        let mut images = LazyImages::init(&[image(1500.0, true), image(100.0, false)], true);
        let mut viewport = Viewport::new(1280.0, 800.0);

        assert!(images.on_viewport_change(&viewport).is_empty());
        assert!(images.image(ImageId(1)).and_then(|i| i.src.as_ref()).is_none());

        viewport.scroll_y = 800.0;
        assert_eq!(images.on_viewport_change(&viewport), vec![ImageId(0)]);
        let loaded = images.image(ImageId(0)).expect("image");
        assert_eq!(loaded.src.as_deref(), Some("/img/1500.jpg"));
        assert!(!loaded.lazy);

        viewport.scroll_y = 0.0;
        images.on_viewport_change(&viewport);
        viewport.scroll_y = 800.0;
        assert!(images.on_viewport_change(&viewport).is_empty());
    }

    #[test]
    fn fallback_assigns_every_deferred_source_up_front() {
        let images = LazyImages::init(&[image(5000.0, true), image(100.0, false)], false);
        let far = images.image(ImageId(0)).expect("far image");
        assert_eq!(far.src.as_deref(), Some("/img/5000.jpg"));
        assert!(!far.observed);
        assert!(images.image(ImageId(1)).and_then(|i| i.src.as_ref()).is_none());
    }
}
