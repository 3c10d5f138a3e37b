//! In-page anchor scrolling under the sticky navbar, and external link hardening.

use std::collections::HashMap;

use serde::Serialize;
use shared::{
    events::ScrollRequest,
    markup::{LinkMarkup, SectionMarkup},
};
use url::Url;

#[derive(Debug, Default)]
pub struct AnchorScroller {
    navbar_height: f64,
    offset: f64,
    sections: HashMap<String, f64>,
}

impl AnchorScroller {
    pub fn init(sections: &[SectionMarkup], navbar_height: Option<f64>, offset: f64) -> Self {
        Self {
            navbar_height: navbar_height.unwrap_or_default(),
            offset,
            sections: sections
                .iter()
                .map(|section| (section.id.clone(), section.top))
                .collect(),
        }
    }

    /// Smooth-scroll target for `#id` links whose section exists; `None` for
    /// a bare `#`, non-anchor links, and unknown ids.
    pub fn resolve(&self, href: &str) -> Option<ScrollRequest> {
        let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
        let top = self.sections.get(id)?;
        Some(ScrollRequest {
            top: top - self.navbar_height - self.offset,
            smooth: true,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkAttributes {
    pub href: String,
    pub rel: Option<String>,
    pub target: Option<String>,
}

/// Off-site absolute links open in a new tab without an opener reference.
pub fn harden_links(links: &[LinkMarkup], hostname: &str) -> Vec<LinkAttributes> {
    links
        .iter()
        .map(|link| {
            let external = link.href.starts_with("http")
                && Url::parse(&link.href).is_ok()
                && !link.href.contains(hostname);
            LinkAttributes {
                href: link.href.clone(),
                rel: external.then(|| "noopener noreferrer".to_string()),
                target: external.then(|| "_blank".to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(href: &str) -> LinkMarkup {
        LinkMarkup {
            label: String::new(),
            href: href.to_string(),
        }
    }

    #[test]
    fn anchor_scroll_clears_the_navbar() {
        let scroller = AnchorScroller::init(
            &[SectionMarkup {
                id: "admissions".into(),
                top: 1800.0,
            }],
            Some(80.0),
            20.0,
        );
        assert_eq!(
            scroller.resolve("#admissions"),
            Some(ScrollRequest {
                top: 1700.0,
                smooth: true
            })
        );
        assert_eq!(scroller.resolve("#"), None);
        assert_eq!(scroller.resolve("#missing"), None);
        assert_eq!(scroller.resolve("/admissions"), None);
    }

    #[test]
    fn only_offsite_links_are_hardened() {
        let hardened = harden_links(
            &[
                link("https://maps.example.org/school"),
                link("https://bissschool.edu.ng/news"),
                link("/contact"),
            ],
            "bissschool.edu.ng",
        );
        assert_eq!(hardened[0].rel.as_deref(), Some("noopener noreferrer"));
        assert_eq!(hardened[0].target.as_deref(), Some("_blank"));
        assert_eq!(hardened[1].rel, None);
        assert_eq!(hardened[2].target, None);
    }
}
