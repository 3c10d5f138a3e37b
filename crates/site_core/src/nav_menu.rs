//! Mobile navigation: hamburger toggle, outside-click close, and exclusive
//! dropdowns on narrow viewports.

use serde::Serialize;
use shared::{
    domain::NavItemId,
    error::SiteError,
    events::{ClickTarget, Key},
    markup::NavMarkup,
};
use tracing::debug;

/// The three markers driven by the single open flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuFlags {
    pub hamburger_active: bool,
    pub panel_active: bool,
    pub scroll_locked: bool,
}

#[derive(Debug, Clone)]
struct NavItem {
    href: String,
    dropdown: Option<Dropdown>,
}

#[derive(Debug, Clone)]
struct Dropdown {
    open: bool,
    submenu: Vec<String>,
}

#[derive(Debug)]
pub struct NavMenu {
    open: bool,
    items: Vec<NavItem>,
    breakpoint: f64,
    /// Fixed at init from the viewport width; resizing never rewires it.
    dropdown_toggles: bool,
}

/// What a link click inside the menu asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Default navigation suppressed.
    Prevented,
    Follow(String),
    /// Click on an element the menu does not know about.
    Ignored,
}

impl NavMenu {
    pub fn init(
        markup: Option<&NavMarkup>,
        initial_width: f64,
        breakpoint: f64,
    ) -> Result<Self, SiteError> {
        let markup = markup.ok_or(SiteError::unavailable("navigation menu"))?;
        if !markup.hamburger || !markup.menu {
            return Err(SiteError::unavailable("navigation menu"));
        }

        let dropdown_toggles = initial_width <= breakpoint;
        debug!(dropdown_toggles, initial_width, "navigation menu wired");

        let items = markup
            .items
            .iter()
            .map(|item| NavItem {
                href: item.href.clone(),
                dropdown: item.submenu.as_ref().map(|links| Dropdown {
                    open: false,
                    submenu: links.iter().map(|link| link.href.clone()).collect(),
                }),
            })
            .collect();

        Ok(Self {
            open: false,
            items,
            breakpoint,
            dropdown_toggles,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn flags(&self) -> MenuFlags {
        MenuFlags {
            hamburger_active: self.open,
            panel_active: self.open,
            scroll_locked: self.open,
        }
    }

    pub fn dropdown_toggles_enabled(&self) -> bool {
        self.dropdown_toggles
    }

    pub fn is_dropdown_open(&self, item: NavItemId) -> bool {
        self.items
            .get(item.index())
            .and_then(|item| item.dropdown.as_ref())
            .is_some_and(|dropdown| dropdown.open)
    }

    pub fn open_dropdowns(&self) -> Vec<NavItemId> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.dropdown.as_ref().is_some_and(|d| d.open))
            .map(|(index, _)| NavItemId(index))
            .collect()
    }

    pub fn submenu_href(&self, item: NavItemId, link: usize) -> Option<&str> {
        self.items
            .get(item.index())?
            .dropdown
            .as_ref()?
            .submenu
            .get(link)
            .map(String::as_str)
    }

    pub fn on_hamburger_click(&mut self) {
        self.open = !self.open;
        debug!(open = self.open, "navigation menu toggled");
    }

    /// Document-level click handler; the hamburger stops propagation before
    /// reaching it.
    pub fn on_document_click(&mut self, target: &ClickTarget) {
        if !target.is_within_nav() && *target != ClickTarget::Hamburger {
            self.close("outside click");
        }
    }

    pub fn on_nav_link_click(&mut self, item: NavItemId) -> LinkAction {
        let Some(entry) = self.items.get(item.index()) else {
            return LinkAction::Ignored;
        };
        let href = entry.href.clone();

        if entry.dropdown.is_none() {
            self.close("menu link");
            return LinkAction::Follow(href);
        }

        if !self.dropdown_toggles {
            return LinkAction::Follow(href);
        }

        for (index, other) in self.items.iter_mut().enumerate() {
            if let Some(dropdown) = other.dropdown.as_mut() {
                if index == item.index() {
                    dropdown.open = !dropdown.open;
                    debug!(item = index, open = dropdown.open, "dropdown toggled");
                } else {
                    dropdown.open = false;
                }
            }
        }
        LinkAction::Prevented
    }

    pub fn on_submenu_link_click(&mut self, item: NavItemId, link: usize) -> LinkAction {
        let Some(href) = self.submenu_href(item, link).map(str::to_owned) else {
            return LinkAction::Ignored;
        };
        if self.dropdown_toggles {
            self.close("submenu link");
        }
        LinkAction::Follow(href)
    }

    pub fn on_resize(&mut self, width: f64) {
        if width > self.breakpoint {
            self.close("viewport widened");
        }
    }

    pub fn on_key_down(&mut self, key: &Key) {
        if *key == Key::Escape && self.open {
            self.close("escape");
        }
    }

    fn close(&mut self, reason: &'static str) {
        if self.open {
            debug!(reason, "navigation menu closed");
        }
        self.open = false;
    }
}

#[cfg(test)]
#[path = "tests/nav_menu_tests.rs"]
mod tests;
