use std::time::Duration;

use serde_json::Value;
use shared::{
    domain::FormKind,
    error::{ErrorReport, SiteError},
    events::{ClickTarget, DispatchOutcome, PageEvent},
    markup::{NavMarkup, PageMarkup},
};
use tracing::{debug, info, warn};

pub mod accordion;
pub mod analytics;
pub mod carousel;
pub mod config;
pub mod drafts;
pub mod forms;
pub mod lazy_images;
pub mod links;
pub mod nav_menu;
pub mod reveal;
pub mod scheduler;
pub mod snapshot;
pub mod submission;
pub mod tabs;
pub mod viewport;

use accordion::Accordions;
use analytics::{AnalyticsCommand, AnalyticsHook};
use carousel::Carousel;
use config::Settings;
use drafts::{LocalStorage, MemoryStorage};
use forms::{AdmissionsForm, ContactForm, FormState, NotificationCenter};
use lazy_images::LazyImages;
use links::{AnchorScroller, LinkAttributes};
use nav_menu::{LinkAction, NavMenu};
use reveal::ScrollReveal;
use scheduler::{Scheduler, TimerTask};
use submission::{RecordingSink, Submission, SubmissionSink};
use tabs::TabSystem;
use viewport::{IntersectionOptions, Viewport};

pub use snapshot::PageSnapshot;

/// External collaborators of the page.
pub struct Services {
    pub storage: Box<dyn LocalStorage>,
    pub sink: Box<dyn SubmissionSink>,
    pub analytics: Option<Box<dyn AnalyticsHook>>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            storage: Box::new(MemoryStorage::default()),
            sink: Box::new(RecordingSink::default()),
            analytics: None,
        }
    }
}

/// Every controller on one page plus the clock that drives their timers.
pub struct SiteRuntime {
    settings: Settings,
    scheduler: Scheduler,
    viewport: Viewport,
    intersection_observer: bool,
    page_title: String,
    page_path: String,
    nav_markup: Option<NavMarkup>,
    carousel: Option<Carousel>,
    nav: Option<NavMenu>,
    admissions: Option<AdmissionsForm>,
    contact: Option<ContactForm>,
    tabs: TabSystem,
    accordions: Accordions,
    reveal: ScrollReveal,
    lazy_images: LazyImages,
    anchors: AnchorScroller,
    links: Vec<LinkAttributes>,
    notifications: NotificationCenter,
    storage: Box<dyn LocalStorage>,
    sink: Box<dyn SubmissionSink>,
    analytics: Option<Box<dyn AnalyticsHook>>,
}

fn available<T>(component: Result<T, SiteError>) -> Option<T> {
    match component {
        Ok(component) => Some(component),
        Err(err) => {
            debug!(%err, "component skipped");
            None
        }
    }
}

impl SiteRuntime {
    /// Wires every controller once; a missing component disables only itself.
    pub fn start(markup: &PageMarkup, settings: Settings, services: Services) -> Self {
        let mut scheduler = Scheduler::new();
        let viewport = Viewport::new(markup.viewport.width, markup.viewport.height);

        let carousel = available(Carousel::init(
            markup.carousel.as_ref(),
            settings.autoplay_interval(),
            &mut scheduler,
        ));
        let nav = available(NavMenu::init(
            markup.nav.as_ref(),
            viewport.width,
            settings.mobile_breakpoint_px,
        ));
        let admissions = available(AdmissionsForm::init(
            markup.admissions_form.as_ref(),
            settings.submit_delay(),
        ));
        let contact = available(ContactForm::init(
            markup.contact_form.as_ref(),
            settings.submit_delay(),
            settings.contact_message_clear(),
        ));
        let reveal = ScrollReveal::init(
            &markup.cards,
            IntersectionOptions {
                threshold: settings.reveal_threshold,
                bottom_margin: settings.reveal_bottom_margin_px,
            },
            markup.intersection_observer,
        );
        let lazy_images = LazyImages::init(&markup.images, markup.intersection_observer);
        let notifications = NotificationCenter::new(
            settings.notification_dismiss(),
            settings.notification_slide_out(),
        );

        let mut runtime = Self {
            scheduler,
            viewport,
            intersection_observer: markup.intersection_observer,
            page_title: markup.title.clone(),
            page_path: markup.path.clone(),
            nav_markup: markup.nav.clone(),
            carousel,
            nav,
            admissions,
            contact,
            tabs: TabSystem::init(&markup.tab_groups),
            accordions: Accordions::init(&markup.accordions),
            reveal,
            lazy_images,
            anchors: AnchorScroller::init(
                &markup.sections,
                markup.navbar_height,
                settings.anchor_offset_px,
            ),
            links: links::harden_links(&markup.links, &settings.site_hostname),
            notifications,
            storage: services.storage,
            sink: services.sink,
            analytics: services.analytics,
            settings,
        };

        // Intersection watches report their initial state on registration.
        runtime.observe_viewport();

        info!(title = %runtime.page_title, "Welcome to Benevolent Islamic Secondary School");
        info!("Excellence in Education | 2025-2026");
        runtime
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn nav(&self) -> Option<&NavMenu> {
        self.nav.as_ref()
    }

    pub fn admissions(&self) -> Option<&AdmissionsForm> {
        self.admissions.as_ref()
    }

    pub fn contact(&self) -> Option<&ContactForm> {
        self.contact.as_ref()
    }

    pub fn tabs(&self) -> &TabSystem {
        &self.tabs
    }

    pub fn accordions(&self) -> &Accordions {
        &self.accordions
    }

    pub fn reveal(&self) -> &ScrollReveal {
        &self.reveal
    }

    pub fn lazy_images(&self) -> &LazyImages {
        &self.lazy_images
    }

    pub fn links(&self) -> &[LinkAttributes] {
        &self.links
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot::capture(self)
    }

    pub fn dispatch(&mut self, event: PageEvent) -> DispatchOutcome {
        debug!(?event, "dispatching page event");
        match event {
            PageEvent::Click { target } => self.on_click(target),
            PageEvent::KeyDown { key } => {
                if let Some(nav) = self.nav.as_mut() {
                    nav.on_key_down(&key);
                }
                DispatchOutcome::default()
            }
            PageEvent::PointerEnterCarousel => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.on_pointer_enter(&mut self.scheduler);
                }
                DispatchOutcome::default()
            }
            PageEvent::PointerLeaveCarousel => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.on_pointer_leave(&mut self.scheduler);
                }
                DispatchOutcome::default()
            }
            PageEvent::Input { form, field, value } => {
                match form {
                    FormKind::Admissions => {
                        if let Some(admissions) = self.admissions.as_mut() {
                            admissions.on_input(&field, &value);
                        }
                    }
                    FormKind::Contact => {
                        if let Some(contact) = self.contact.as_mut() {
                            contact.on_input(&field, &value);
                        }
                    }
                }
                DispatchOutcome::default()
            }
            PageEvent::Blur { form, field } => {
                if let (FormKind::Contact, Some(contact)) = (form, self.contact.as_mut()) {
                    contact.on_blur(&field);
                }
                DispatchOutcome::default()
            }
            PageEvent::Submit { form } => self.on_submit(form),
            PageEvent::Resize { width, height } => {
                self.viewport.width = width;
                self.viewport.height = height;
                if let Some(nav) = self.nav.as_mut() {
                    nav.on_resize(width);
                }
                self.observe_viewport();
                DispatchOutcome::default()
            }
            PageEvent::Scroll { y } => {
                self.viewport.scroll_y = y;
                self.observe_viewport();
                DispatchOutcome::default()
            }
        }
    }

    /// Runs the clock forward, firing each due timer in order.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now() + elapsed;
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            self.fire(task);
        }
        self.scheduler.settle(until);
    }

    pub fn save_draft(&mut self, form: FormKind) -> Result<(), SiteError> {
        let key = self.settings.draft_storage_key.clone();
        let state = match form {
            FormKind::Admissions => self.admissions.as_ref().map(AdmissionsForm::state),
            FormKind::Contact => self.contact.as_ref().map(ContactForm::state),
        }
        .ok_or_else(|| SiteError::unavailable(form_component(form)))?;
        drafts::save_draft(self.storage.as_mut(), &key, state).map_err(storage_error)
    }

    pub fn restore_draft(&mut self, form: FormKind) -> Result<usize, SiteError> {
        let key = self.settings.draft_storage_key.clone();
        let state: &mut FormState = match form {
            FormKind::Admissions => self.admissions.as_mut().map(AdmissionsForm::state_mut),
            FormKind::Contact => self.contact.as_mut().map(ContactForm::state_mut),
        }
        .ok_or_else(|| SiteError::unavailable(form_component(form)))?;
        drafts::restore_draft(self.storage.as_ref(), &key, state).map_err(storage_error)
    }

    /// Reports the current page; a no-op without an analytics hook.
    pub fn track_page_view(&self) {
        if let Some(analytics) = &self.analytics {
            analytics.send(AnalyticsCommand::Config {
                measurement_id: self.settings.analytics_measurement_id.clone(),
                page_path: self.page_path.clone(),
                page_title: self.page_title.clone(),
            });
        }
    }

    pub fn track_event(&self, name: impl Into<String>, payload: Value) {
        if let Some(analytics) = &self.analytics {
            analytics.send(AnalyticsCommand::Event {
                name: name.into(),
                payload,
            });
        }
    }

    fn on_click(&mut self, target: ClickTarget) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        match &target {
            ClickTarget::Hamburger => {
                if let Some(nav) = self.nav.as_mut() {
                    nav.on_hamburger_click();
                    // Propagation stops here so the outside-click handler never sees it.
                    return outcome;
                }
            }
            ClickTarget::CarouselPrev => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.on_prev_click(&mut self.scheduler);
                }
            }
            ClickTarget::CarouselNext => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.on_next_click(&mut self.scheduler);
                }
            }
            ClickTarget::Indicator { index } => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.on_indicator_click(*index, &mut self.scheduler);
                }
            }
            ClickTarget::NavLink { item } => {
                let action = self.nav.as_mut().map(|nav| nav.on_nav_link_click(*item));
                let href = self.nav_href(item.index(), None);
                self.follow_link(href, action, &mut outcome);
            }
            ClickTarget::SubmenuLink { item, link } => {
                let action = self
                    .nav
                    .as_mut()
                    .map(|nav| nav.on_submenu_link_click(*item, *link));
                let href = self.nav_href(item.index(), Some(*link));
                self.follow_link(href, action, &mut outcome);
            }
            ClickTarget::TabButton { group, index } => self.tabs.on_tab_click(*group, *index),
            ClickTarget::AccordionHeader { accordion } => {
                self.accordions.on_header_click(*accordion)
            }
            ClickTarget::Link { href } => {
                self.follow_link(Some(href.clone()), None, &mut outcome);
            }
            ClickTarget::NavPanel | ClickTarget::Elsewhere => {}
        }

        if let Some(nav) = self.nav.as_mut() {
            nav.on_document_click(&target);
        }
        outcome
    }

    /// Applies the menu's decision, then the in-page anchor handler, then
    /// falls back to plain navigation.
    fn follow_link(
        &self,
        href: Option<String>,
        action: Option<LinkAction>,
        outcome: &mut DispatchOutcome,
    ) {
        let Some(href) = href else {
            return;
        };
        if action == Some(LinkAction::Prevented) {
            outcome.default_prevented = true;
        }
        if let Some(scroll) = self.anchors.resolve(&href) {
            outcome.default_prevented = true;
            outcome.scroll_to = Some(scroll);
        }
        if !outcome.default_prevented {
            outcome.navigate_to = Some(href);
        }
    }

    fn nav_href(&self, item: usize, link: Option<usize>) -> Option<String> {
        let entry = self.nav_markup.as_ref()?.items.get(item)?;
        match link {
            None => Some(entry.href.clone()),
            Some(link) => entry
                .submenu
                .as_ref()?
                .get(link)
                .map(|link| link.href.clone()),
        }
    }

    fn on_submit(&mut self, form: FormKind) -> DispatchOutcome {
        let result = match form {
            FormKind::Admissions => match self.admissions.as_mut() {
                Some(admissions) => {
                    admissions.on_submit(&mut self.scheduler, &mut self.notifications)
                }
                None => return DispatchOutcome::default(),
            },
            FormKind::Contact => match self.contact.as_mut() {
                Some(contact) => contact.on_submit(&mut self.scheduler),
                None => return DispatchOutcome::default(),
            },
        };

        let mut outcome = DispatchOutcome::prevented();
        if let Err(err) = result {
            info!(form = form.label(), %err, "submission blocked");
            outcome.error = Some(ErrorReport::from(&err));
        }
        outcome
    }

    fn fire(&mut self, task: TimerTask) {
        match task {
            TimerTask::CarouselAdvance => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.on_autoplay_tick(&mut self.scheduler);
                }
            }
            TimerTask::SubmissionComplete(FormKind::Admissions) => {
                let submission = self.admissions.as_mut().and_then(|admissions| {
                    admissions.on_submission_complete(&mut self.scheduler, &mut self.notifications)
                });
                self.deliver(submission);
            }
            TimerTask::SubmissionComplete(FormKind::Contact) => {
                let submission = self
                    .contact
                    .as_mut()
                    .and_then(|contact| contact.on_submission_complete(&mut self.scheduler));
                self.deliver(submission);
            }
            TimerTask::NotificationSlideOut(id) => {
                self.notifications.on_slide_out(id, &mut self.scheduler);
            }
            TimerTask::NotificationRemove(id) => self.notifications.on_remove(id),
            TimerTask::ContactMessageClear => {
                if let Some(contact) = self.contact.as_mut() {
                    contact.on_message_clear();
                }
            }
        }
    }

    fn deliver(&mut self, submission: Option<Submission>) {
        let Some(submission) = submission else {
            return;
        };
        let form = submission.form.label();
        if let Err(error) = self.sink.send(submission) {
            warn!(form, %error, "submission sink rejected payload");
        }
    }

    fn observe_viewport(&mut self) {
        if !self.intersection_observer {
            return;
        }
        self.reveal.on_viewport_change(&self.viewport);
        self.lazy_images.on_viewport_change(&self.viewport);
    }
}

fn form_component(form: FormKind) -> &'static str {
    match form {
        FormKind::Admissions => "admissions form",
        FormKind::Contact => "contact form",
    }
}

fn storage_error(err: anyhow::Error) -> SiteError {
    SiteError::Storage {
        message: format!("{err:#}"),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
