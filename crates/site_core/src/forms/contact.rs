//! Contact form with per-field live validation and an inline status message.

use std::{collections::HashMap, time::Duration};

use serde::Serialize;
use shared::{domain::FormKind, error::SiteError, markup::ContactFormMarkup};
use tracing::{debug, info};

use super::{validation::validate_contact_field, FormState, SubmitOutcome};
use crate::{
    scheduler::{Scheduler, TimerHandle, TimerTask},
    submission::Submission,
};

pub const CORRECT_ERRORS: &str = "Please correct the errors above";
pub const CONTACT_SUCCESS: &str =
    "✓ Thank you! Your message has been sent successfully. We will respond within 24 hours.";
const PAYLOAD_FIELDS: [&str; 5] = ["name", "email", "phone", "subject", "message"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldStatus {
    pub error: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMessageKind {
    Error,
    Success,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormMessage {
    pub kind: Option<FormMessageKind>,
    pub text: String,
}

#[derive(Debug)]
pub struct ContactForm {
    state: FormState,
    statuses: HashMap<String, FieldStatus>,
    message: FormMessage,
    has_message_target: bool,
    submit_delay: Duration,
    clear_after: Duration,
    pending: Option<(TimerHandle, Submission)>,
    clear_timer: Option<TimerHandle>,
}

impl ContactForm {
    pub fn init(
        markup: Option<&ContactFormMarkup>,
        submit_delay: Duration,
        clear_after: Duration,
    ) -> Result<Self, SiteError> {
        let markup = markup.ok_or(SiteError::unavailable("contact form"))?;
        let state = FormState::from_markup(&markup.form);
        let statuses = state
            .fields()
            .iter()
            .map(|field| (field.name.clone(), FieldStatus::default()))
            .collect();
        Ok(Self {
            state,
            statuses,
            message: FormMessage::default(),
            has_message_target: markup.message_target,
            submit_delay,
            clear_after,
            pending: None,
            clear_timer: None,
        })
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    pub fn field_status(&self, field: &str) -> Option<&FieldStatus> {
        self.statuses.get(field)
    }

    pub fn field_statuses(&self) -> &HashMap<String, FieldStatus> {
        &self.statuses
    }

    pub fn message(&self) -> &FormMessage {
        &self.message
    }

    pub fn on_blur(&mut self, field: &str) -> bool {
        self.validate_field(field)
    }

    /// Updates the value and re-validates only while the field shows an error.
    pub fn on_input(&mut self, field: &str, value: &str) {
        if !self.state.set_value(field, value) {
            debug!(field, "input for unknown contact field");
            return;
        }
        if self.statuses.get(field).is_some_and(|status| status.error) {
            self.validate_field(field);
        }
    }

    pub fn validate_field(&mut self, field: &str) -> bool {
        let Some(value) = self.state.value(field) else {
            return true;
        };
        let result = validate_contact_field(field, value);
        let status = self.statuses.entry(field.to_string()).or_default();
        match result {
            Ok(()) => {
                *status = FieldStatus::default();
                true
            }
            Err(err) => {
                status.error = true;
                status.message = err.user_message().to_string();
                false
            }
        }
    }

    /// Every required field is validated (all errors are shown at once).
    pub fn validate_required(&mut self) -> bool {
        let required: Vec<String> = self
            .state
            .fields()
            .iter()
            .filter(|field| field.required)
            .map(|field| field.name.clone())
            .collect();
        required
            .iter()
            .fold(true, |valid, field| self.validate_field(field) && valid)
    }

    pub fn on_submit(&mut self, scheduler: &mut Scheduler) -> Result<SubmitOutcome, SiteError> {
        if self.pending.is_some() {
            return Ok(SubmitOutcome::InFlight);
        }

        if !self.validate_required() {
            self.set_message(FormMessageKind::Error, CORRECT_ERRORS, scheduler);
            return Err(SiteError::validation(CORRECT_ERRORS));
        }

        let fields = PAYLOAD_FIELDS
            .iter()
            .filter_map(|name| {
                self.state
                    .value(name)
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let submission = Submission::new(FormKind::Contact, fields);

        self.state.begin_submit();
        let timer =
            scheduler.set_timeout(self.submit_delay, TimerTask::SubmissionComplete(FormKind::Contact));
        self.pending = Some((timer, submission));
        info!("contact submission started");
        Ok(SubmitOutcome::Started)
    }

    pub fn on_submission_complete(&mut self, scheduler: &mut Scheduler) -> Option<Submission> {
        let (_, submission) = self.pending.take()?;
        self.set_message(FormMessageKind::Success, CONTACT_SUCCESS, scheduler);
        self.state.reset();
        for status in self.statuses.values_mut() {
            *status = FieldStatus::default();
        }
        self.state.end_submit();
        scheduler.restart_timeout(
            &mut self.clear_timer,
            self.clear_after,
            TimerTask::ContactMessageClear,
        );
        info!("contact submission completed");
        Some(submission)
    }

    pub fn on_message_clear(&mut self) {
        self.clear_timer = None;
        self.message = FormMessage::default();
    }

    /// A new message supersedes any pending auto-clear.
    fn set_message(&mut self, kind: FormMessageKind, text: &str, scheduler: &mut Scheduler) {
        scheduler.clear_slot(&mut self.clear_timer);
        if !self.has_message_target {
            return;
        }
        self.message = FormMessage {
            kind: Some(kind),
            text: text.to_string(),
        };
    }
}

#[cfg(test)]
#[path = "../tests/contact_tests.rs"]
mod tests;
