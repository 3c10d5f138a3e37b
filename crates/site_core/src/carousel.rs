//! Hero carousel: one active slide, timed autoplay, hover pause.

use std::time::Duration;

use shared::{error::SiteError, markup::CarouselMarkup};
use tracing::{debug, warn};

use crate::scheduler::{Scheduler, TimerHandle, TimerTask};

#[derive(Debug)]
pub struct Carousel {
    slide_count: usize,
    indicator_count: usize,
    current: usize,
    has_prev: bool,
    has_next: bool,
    has_container: bool,
    interval: Duration,
    autoplay: Option<TimerHandle>,
}

impl Carousel {
    /// Shows the first slide and starts autoplay.
    pub fn init(
        markup: Option<&CarouselMarkup>,
        interval: Duration,
        scheduler: &mut Scheduler,
    ) -> Result<Self, SiteError> {
        let markup = markup.ok_or(SiteError::unavailable("carousel"))?;
        if markup.slides == 0 {
            return Err(SiteError::unavailable("carousel"));
        }
        if markup.indicators != markup.slides {
            warn!(
                slides = markup.slides,
                indicators = markup.indicators,
                "carousel indicator count does not match slide count"
            );
        }

        let mut carousel = Self {
            slide_count: markup.slides,
            indicator_count: markup.indicators,
            current: 0,
            has_prev: markup.prev_button,
            has_next: markup.next_button,
            has_container: markup.container,
            interval,
            autoplay: None,
        };
        carousel.show(0);
        carousel.start_autoplay(scheduler);
        Ok(carousel)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn is_slide_active(&self, index: usize) -> bool {
        index == self.current
    }

    pub fn is_indicator_active(&self, index: usize) -> bool {
        index < self.indicator_count && index == self.current
    }

    pub fn autoplay_timer(&self) -> Option<TimerHandle> {
        self.autoplay
    }

    pub fn next(&mut self, scheduler: &mut Scheduler) {
        self.show((self.current + 1) % self.slide_count);
        self.start_autoplay(scheduler);
    }

    pub fn prev(&mut self, scheduler: &mut Scheduler) {
        self.show((self.current + self.slide_count - 1) % self.slide_count);
        self.start_autoplay(scheduler);
    }

    pub fn go_to(&mut self, index: usize, scheduler: &mut Scheduler) {
        if index >= self.slide_count {
            warn!(index, slides = self.slide_count, "ignoring indicator past last slide");
            return;
        }
        self.show(index);
        self.start_autoplay(scheduler);
    }

    pub fn on_prev_click(&mut self, scheduler: &mut Scheduler) {
        if self.has_prev {
            self.prev(scheduler);
        }
    }

    pub fn on_next_click(&mut self, scheduler: &mut Scheduler) {
        if self.has_next {
            self.next(scheduler);
        }
    }

    pub fn on_indicator_click(&mut self, index: usize, scheduler: &mut Scheduler) {
        if index < self.indicator_count {
            self.go_to(index, scheduler);
        }
    }

    pub fn on_autoplay_tick(&mut self, scheduler: &mut Scheduler) {
        self.next(scheduler);
    }

    pub fn on_pointer_enter(&mut self, scheduler: &mut Scheduler) {
        if self.has_container {
            scheduler.clear_slot(&mut self.autoplay);
            debug!("carousel autoplay paused");
        }
    }

    pub fn on_pointer_leave(&mut self, scheduler: &mut Scheduler) {
        if self.has_container {
            self.start_autoplay(scheduler);
            debug!("carousel autoplay resumed");
        }
    }

    fn show(&mut self, index: usize) {
        self.current = index;
        debug!(slide = index, "carousel slide shown");
    }

    /// Manual navigation and hover-leave both land here, so every path gets a
    /// full fresh interval and never two live autoplay timers.
    fn start_autoplay(&mut self, scheduler: &mut Scheduler) {
        scheduler.restart_interval(&mut self.autoplay, self.interval, TimerTask::CarouselAdvance);
    }
}

#[cfg(test)]
#[path = "tests/carousel_tests.rs"]
mod tests;
