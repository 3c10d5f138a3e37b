use std::time::Duration;

use shared::{
    domain::{FormKind, NotificationKind},
    error::SiteError,
    markup::FormMarkup,
};
use tracing::{debug, info};

use super::{
    notifications::NotificationCenter, validation::validate_admissions, FormState, SubmitOutcome,
};
use crate::{
    scheduler::{Scheduler, TimerHandle, TimerTask},
    submission::Submission,
};

pub const ADMISSIONS_SUCCESS: &str = "Thank you! We will contact you shortly.";

#[derive(Debug)]
pub struct AdmissionsForm {
    state: FormState,
    submit_delay: Duration,
    pending: Option<(TimerHandle, Submission)>,
}

impl AdmissionsForm {
    pub fn init(markup: Option<&FormMarkup>, submit_delay: Duration) -> Result<Self, SiteError> {
        let markup = markup.ok_or(SiteError::unavailable("admissions form"))?;
        Ok(Self {
            state: FormState::from_markup(markup),
            submit_delay,
            pending: None,
        })
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    pub fn on_input(&mut self, field: &str, value: &str) {
        if !self.state.set_value(field, value) {
            debug!(field, "input for unknown admissions field");
        }
    }

    /// Validates the whole submission; on failure an error banner is raised and
    /// nothing else changes.
    pub fn on_submit(
        &mut self,
        scheduler: &mut Scheduler,
        notifications: &mut NotificationCenter,
    ) -> Result<SubmitOutcome, SiteError> {
        if self.pending.is_some() {
            return Ok(SubmitOutcome::InFlight);
        }

        if let Err(err) = validate_admissions(self.state.entries()) {
            notifications.show(NotificationKind::Error, err.user_message(), scheduler);
            return Err(err);
        }

        let submission = Submission::new(FormKind::Admissions, self.state.to_map());
        self.state.begin_submit();
        let timer = scheduler.set_timeout(
            self.submit_delay,
            TimerTask::SubmissionComplete(FormKind::Admissions),
        );
        self.pending = Some((timer, submission));
        info!("admissions submission started");
        Ok(SubmitOutcome::Started)
    }

    /// Finishes the simulated round trip and returns the submitted payload.
    pub fn on_submission_complete(
        &mut self,
        scheduler: &mut Scheduler,
        notifications: &mut NotificationCenter,
    ) -> Option<Submission> {
        let (_, submission) = self.pending.take()?;
        notifications.show(NotificationKind::Success, ADMISSIONS_SUCCESS, scheduler);
        self.state.reset();
        self.state.end_submit();
        info!("admissions submission completed");
        Some(submission)
    }
}
