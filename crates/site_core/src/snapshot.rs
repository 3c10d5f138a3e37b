//! Serializable view of everything a visitor could see on the page.

use std::collections::HashMap;

use serde::Serialize;
use shared::domain::{AccordionId, CardId, NavItemId};

use crate::{
    accordion::AccordionPanel,
    forms::{contact::FieldStatus, contact::FormMessage, FormState, Notification},
    lazy_images::LazyImage,
    links::LinkAttributes,
    nav_menu::MenuFlags,
    tabs::TabGroup,
    viewport::{is_in_viewport, Viewport},
    SiteRuntime,
};

#[derive(Debug, Clone, Serialize)]
pub struct CarouselView {
    pub current: usize,
    pub slide_count: usize,
    pub autoplay_running: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavView {
    #[serde(flatten)]
    pub flags: MenuFlags,
    pub open_dropdowns: Vec<NavItemId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactView {
    pub form: FormState,
    pub statuses: HashMap<String, FieldStatus>,
    pub message: FormMessage,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub now_ms: u128,
    pub viewport: Viewport,
    pub carousel: Option<CarouselView>,
    pub nav: Option<NavView>,
    pub admissions: Option<FormState>,
    pub contact: Option<ContactView>,
    pub notifications: Vec<Notification>,
    pub tabs: Vec<TabGroup>,
    pub accordions: Vec<AccordionPanel>,
    pub open_accordions: Vec<AccordionId>,
    pub revealed_cards: Vec<CardId>,
    /// Cards lying entirely inside the current viewport.
    pub visible_cards: Vec<CardId>,
    pub images: Vec<LazyImage>,
    pub links: Vec<LinkAttributes>,
}

impl PageSnapshot {
    pub fn capture(runtime: &SiteRuntime) -> Self {
        let viewport = *runtime.viewport();
        let reveal = runtime.reveal();

        Self {
            now_ms: runtime.now().as_millis(),
            viewport,
            carousel: runtime.carousel().map(|carousel| CarouselView {
                current: carousel.current(),
                slide_count: carousel.slide_count(),
                autoplay_running: carousel
                    .autoplay_timer()
                    .is_some_and(|handle| runtime.scheduler().is_live(handle)),
            }),
            nav: runtime.nav().map(|nav| NavView {
                flags: nav.flags(),
                open_dropdowns: nav.open_dropdowns(),
            }),
            admissions: runtime.admissions().map(|form| form.state().clone()),
            contact: runtime.contact().map(|form| ContactView {
                form: form.state().clone(),
                statuses: form.field_statuses().clone(),
                message: form.message().clone(),
            }),
            notifications: runtime.notifications().items().to_vec(),
            tabs: runtime.tabs().groups().to_vec(),
            accordions: runtime.accordions().panels().to_vec(),
            open_accordions: runtime.accordions().open_panels(),
            revealed_cards: reveal
                .cards()
                .filter(|(_, card)| card.is_revealed())
                .map(|(id, _)| id)
                .collect(),
            visible_cards: reveal
                .cards()
                .filter(|(_, card)| is_in_viewport(&card.rect, &viewport))
                .map(|(id, _)| id)
                .collect(),
            images: runtime.lazy_images().images().to_vec(),
            links: runtime.links().to_vec(),
        }
    }
}
