use serde::Serialize;
use shared::domain::Rect;

/// Visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }
}

/// True when `rect` lies entirely inside the visible viewport.
pub fn is_in_viewport(rect: &Rect, viewport: &Viewport) -> bool {
    let top = rect.top - viewport.scroll_y;
    let bottom = rect.bottom() - viewport.scroll_y;
    top >= 0.0 && rect.left >= 0.0 && bottom <= viewport.height && rect.right() <= viewport.width
}

/// Vertical intersection test with a ratio threshold and a bottom root margin
/// that shrinks the observed area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionOptions {
    pub threshold: f64,
    pub bottom_margin: f64,
}

impl Default for IntersectionOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            bottom_margin: 0.0,
        }
    }
}

impl IntersectionOptions {
    pub fn intersection_ratio(&self, rect: &Rect, viewport: &Viewport) -> Option<f64> {
        let root_top = viewport.scroll_y;
        let root_bottom = viewport.scroll_y + viewport.height - self.bottom_margin;
        if root_bottom <= root_top {
            return None;
        }

        let top = rect.top.max(root_top);
        let bottom = rect.bottom().min(root_bottom);
        if bottom < top {
            return None;
        }
        if rect.height <= 0.0 {
            return Some(1.0);
        }
        Some((bottom - top) / rect.height)
    }

    pub fn is_intersecting(&self, rect: &Rect, viewport: &Viewport) -> bool {
        match self.intersection_ratio(rect, viewport) {
            Some(_) if self.threshold <= 0.0 => true,
            Some(ratio) => ratio >= self.threshold,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reveal_options() -> IntersectionOptions {
        IntersectionOptions {
            threshold: 0.1,
            bottom_margin: 50.0,
        }
    }

    #[test]
    fn bottom_margin_delays_entry() {
        let viewport = Viewport::new(1280.0, 800.0);
        let card = Rect::new(760.0, 200.0);

        // 40px of the card is on screen, but all of it sits inside the 50px margin.
        assert!(!reveal_options().is_intersecting(&card, &viewport));
        assert!(IntersectionOptions::default().is_intersecting(&card, &viewport));
    }

    #[test]
    fn threshold_requires_ten_percent_visible() {
        let options = reveal_options();
        let card = Rect::new(1000.0, 200.0);
        let mut viewport = Viewport::new(1280.0, 800.0);

        viewport.scroll_y = 265.0; // root bottom at 1015: 15px visible, 7.5%
        assert!(!options.is_intersecting(&card, &viewport));

        viewport.scroll_y = 270.0; // root bottom at 1020: 20px visible, 10%
        assert!(options.is_intersecting(&card, &viewport));
    }

    #[test]
    fn scrolled_past_is_not_intersecting() {
        let mut viewport = Viewport::new(1280.0, 800.0);
        viewport.scroll_y = 2000.0;
        assert!(!IntersectionOptions::default().is_intersecting(&Rect::new(100.0, 300.0), &viewport));
    }

    #[test]
    fn full_containment_check() {
        let viewport = Viewport::new(1000.0, 800.0);
        let inside = Rect {
            top: 10.0,
            left: 10.0,
            width: 300.0,
            height: 200.0,
        };
        let clipped = Rect {
            top: 700.0,
            ..inside
        };
        assert!(is_in_viewport(&inside, &viewport));
        assert!(!is_in_viewport(&clipped, &viewport));
    }
}
