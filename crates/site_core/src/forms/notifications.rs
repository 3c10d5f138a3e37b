//! Transient top-level banners: visible, then sliding out, then removed.

use std::time::Duration;

use serde::Serialize;
use shared::domain::{NotificationId, NotificationKind};
use tracing::debug;

use crate::scheduler::{Scheduler, TimerHandle, TimerTask};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPhase {
    Visible,
    SlidingOut,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub phase: NotificationPhase,
    #[serde(skip)]
    timer: Option<TimerHandle>,
}

#[derive(Debug)]
pub struct NotificationCenter {
    dismiss_after: Duration,
    slide_out: Duration,
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(dismiss_after: Duration, slide_out: Duration) -> Self {
        Self {
            dismiss_after,
            slide_out,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn show(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        scheduler: &mut Scheduler,
    ) -> NotificationId {
        let id = NotificationId::new();
        let timer = scheduler.set_timeout(self.dismiss_after, TimerTask::NotificationSlideOut(id));
        let message = message.into();
        debug!(?kind, %message, "notification shown");
        self.items.push(Notification {
            id,
            kind,
            message,
            phase: NotificationPhase::Visible,
            timer: Some(timer),
        });
        id
    }

    pub fn on_slide_out(&mut self, id: NotificationId, scheduler: &mut Scheduler) {
        let slide_out = self.slide_out;
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.phase = NotificationPhase::SlidingOut;
            scheduler.restart_timeout(&mut item.timer, slide_out, TimerTask::NotificationRemove(id));
        }
    }

    pub fn on_remove(&mut self, id: NotificationId) {
        self.items.retain(|item| item.id != id);
    }
}
