use serde::{Deserialize, Serialize};

use crate::{
    domain::{AccordionId, FormKind, NavItemId, TabGroupId},
    error::ErrorReport,
};

/// Element a click landed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickTarget {
    Hamburger,
    CarouselPrev,
    CarouselNext,
    Indicator { index: usize },
    /// Top-level link of a navigation item (dropdown parent or plain link).
    NavLink { item: NavItemId },
    SubmenuLink { item: NavItemId, link: usize },
    /// Any other point inside the open navigation panel.
    NavPanel,
    TabButton { group: TabGroupId, index: usize },
    AccordionHeader { accordion: AccordionId },
    /// Link outside the navigation menu.
    Link { href: String },
    Elsewhere,
}

impl ClickTarget {
    pub fn is_within_nav(&self) -> bool {
        matches!(
            self,
            Self::NavLink { .. } | Self::SubmenuLink { .. } | Self::NavPanel
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    #[serde(alias = "Escape")]
    Escape,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    Click { target: ClickTarget },
    KeyDown { key: Key },
    PointerEnterCarousel,
    PointerLeaveCarousel,
    Input {
        form: FormKind,
        field: String,
        value: String,
    },
    Blur { form: FormKind, field: String },
    Submit { form: FormKind },
    Resize { width: f64, height: f64 },
    Scroll { y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub top: f64,
    pub smooth: bool,
}

/// Result of dispatching one event: what the host should do by default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub default_prevented: bool,
    pub scroll_to: Option<ScrollRequest>,
    pub navigate_to: Option<String>,
    /// Validation failure shown to the visitor, if the event triggered one.
    pub error: Option<ErrorReport>,
}

impl DispatchOutcome {
    pub fn prevented() -> Self {
        Self {
            default_prevented: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_events_from_json_lines() {
        let click: PageEvent = serde_json::from_str(
            r#"{"type":"click","target":{"kind":"nav_link","item":2}}"#,
        )
        .expect("click");
        assert_eq!(
            click,
            PageEvent::Click {
                target: ClickTarget::NavLink { item: NavItemId(2) }
            }
        );

        let escape: PageEvent =
            serde_json::from_str(r#"{"type":"key_down","key":"escape"}"#).expect("escape");
        assert_eq!(escape, PageEvent::KeyDown { key: Key::Escape });
        let browser_name: PageEvent =
            serde_json::from_str(r#"{"type":"key_down","key":"Escape"}"#).expect("Escape");
        assert_eq!(browser_name, PageEvent::KeyDown { key: Key::Escape });

        let other: PageEvent =
            serde_json::from_str(r#"{"type":"key_down","key":"Enter"}"#).expect("other key");
        assert_eq!(
            other,
            PageEvent::KeyDown {
                key: Key::Other("Enter".to_string())
            }
        );
    }

    #[test]
    fn only_menu_targets_count_as_inside_nav() {
        assert!(ClickTarget::NavPanel.is_within_nav());
        assert!(ClickTarget::SubmenuLink {
            item: NavItemId(0),
            link: 1
        }
        .is_within_nav());
        assert!(!ClickTarget::Hamburger.is_within_nav());
        assert!(!ClickTarget::CarouselNext.is_within_nav());
    }
}
