//! Structural description of the page that controllers query at startup.
//!
//! Every section is optional; a missing section disables only the controller
//! that needs it.

use serde::{Deserialize, Serialize};

use crate::domain::Rect;

fn default_true() -> bool {
    true
}

fn default_submit_label() -> String {
    "Submit".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMarkup {
    pub title: String,
    pub path: String,
    pub viewport: ViewportSize,
    /// Whether the host can observe element/viewport intersection.
    #[serde(default = "default_true")]
    pub intersection_observer: bool,
    /// Height of the sticky navbar, if one is present.
    pub navbar_height: Option<f64>,
    pub carousel: Option<CarouselMarkup>,
    pub nav: Option<NavMarkup>,
    pub admissions_form: Option<FormMarkup>,
    pub contact_form: Option<ContactFormMarkup>,
    pub tab_groups: Vec<TabGroupMarkup>,
    pub accordions: Vec<AccordionMarkup>,
    pub cards: Vec<CardMarkup>,
    pub images: Vec<ImageMarkup>,
    pub sections: Vec<SectionMarkup>,
    pub links: Vec<LinkMarkup>,
}

impl Default for PageMarkup {
    fn default() -> Self {
        Self {
            title: String::new(),
            path: "/".to_string(),
            viewport: ViewportSize::default(),
            intersection_observer: true,
            navbar_height: None,
            carousel: None,
            nav: None,
            admissions_form: None,
            contact_form: None,
            tab_groups: Vec::new(),
            accordions: Vec::new(),
            cards: Vec::new(),
            images: Vec::new(),
            sections: Vec::new(),
            links: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselMarkup {
    pub slides: usize,
    pub indicators: usize,
    pub prev_button: bool,
    pub next_button: bool,
    /// Hover region used to pause autoplay.
    pub container: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavMarkup {
    pub hamburger: bool,
    pub menu: bool,
    pub items: Vec<NavItemMarkup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavItemMarkup {
    pub label: String,
    pub href: String,
    /// Present for dropdown items.
    pub submenu: Option<Vec<LinkMarkup>>,
}

impl NavItemMarkup {
    pub fn is_dropdown(&self) -> bool {
        self.submenu.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkMarkup {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMarkup {
    pub name: String,
    pub required: bool,
    /// Initial value from markup; form reset restores it.
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormMarkup {
    pub fields: Vec<FieldMarkup>,
    pub submit_button: bool,
    pub submit_label: String,
}

impl Default for FormMarkup {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            submit_button: true,
            submit_label: default_submit_label(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFormMarkup {
    #[serde(flatten)]
    pub form: FormMarkup,
    /// Inline status target below the form.
    pub message_target: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabGroupMarkup {
    pub tabs: Vec<TabMarkup>,
    pub panels: Vec<PanelMarkup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabMarkup {
    /// Value of the trigger's tab attribute; the matching panel id is `<tab>-content`.
    pub tab: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelMarkup {
    pub id: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionMarkup {
    pub open: bool,
    /// Natural height of the collapsible content, if the panel has any.
    pub content_height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardMarkup {
    pub class: String,
    pub rect: Rect,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageMarkup {
    pub src: Option<String>,
    pub data_src: Option<String>,
    pub lazy: bool,
    pub rect: Rect,
}

/// In-page anchor target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionMarkup {
    pub id: String,
    pub top: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_page_from_toml() {
        let raw = r##"
            title = "Home"
            navbar_height = 72.0

            [carousel]
            slides = 3
            indicators = 3

            [nav]
            hamburger = true
            menu = true

            [[nav.items]]
            label = "About"
            href = "#about"

            [[nav.items]]
            label = "Academics"
            href = "#"
            submenu = [{ label = "Curriculum", href = "/curriculum" }]

            [contact_form]
            message_target = true
            fields = [{ name = "name", required = true }]
        "##;

        let page: PageMarkup = toml::from_str(raw).expect("parse markup");
        assert_eq!(page.title, "Home");
        assert!(page.intersection_observer);
        assert_eq!(page.carousel.as_ref().map(|c| c.slides), Some(3));
        let nav = page.nav.expect("nav");
        assert!(!nav.items[0].is_dropdown());
        assert!(nav.items[1].is_dropdown());
        let contact = page.contact_form.expect("contact");
        assert!(contact.message_target);
        assert!(contact.form.submit_button);
        assert_eq!(contact.form.submit_label, "Submit");
        assert!(page.admissions_form.is_none());
    }
}
