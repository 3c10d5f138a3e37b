//! Admissions and contact forms: field state, validation, and simulated submission.

pub mod admissions;
pub mod contact;
pub mod notifications;
pub mod validation;

use std::collections::BTreeMap;

use serde::Serialize;
use shared::markup::FormMarkup;

pub use admissions::AdmissionsForm;
pub use contact::ContactForm;
pub use notifications::{Notification, NotificationCenter, NotificationPhase};

pub const IN_FLIGHT_LABEL: &str = "Sending...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub required: bool,
    pub value: String,
    default_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
}

/// Outcome of a submit that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started,
    /// A submission is already in flight; the disabled control swallowed this one.
    InFlight,
}

/// Values and submit control shared by both forms.
#[derive(Debug, Clone, Serialize)]
pub struct FormState {
    fields: Vec<Field>,
    submit: Option<SubmitButton>,
    #[serde(skip)]
    original_label: String,
}

impl FormState {
    pub fn from_markup(markup: &FormMarkup) -> Self {
        Self {
            fields: markup
                .fields
                .iter()
                .map(|field| Field {
                    name: field.name.clone(),
                    required: field.required,
                    value: field.value.clone(),
                    default_value: field.value.clone(),
                })
                .collect(),
            submit: markup.submit_button.then(|| SubmitButton {
                label: markup.submit_label.clone(),
                disabled: false,
            }),
            original_label: markup.submit_label.clone(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|field| field.value.as_str())
    }

    /// Returns false when the form has no such field.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn submit_button(&self) -> Option<&SubmitButton> {
        self.submit.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.as_ref().is_some_and(|button| button.disabled)
    }

    /// Name/value pairs in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + Clone {
        self.fields
            .iter()
            .map(|field| (field.name.as_str(), field.value.as_str()))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    /// Restores every field to its markup value.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.default_value.clone();
        }
    }

    fn begin_submit(&mut self) {
        if let Some(button) = self.submit.as_mut() {
            button.disabled = true;
            button.label = IN_FLIGHT_LABEL.to_string();
        }
    }

    fn end_submit(&mut self) {
        if let Some(button) = self.submit.as_mut() {
            button.disabled = false;
            button.label = self.original_label.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::markup::FieldMarkup;

    use super::*;

    fn markup() -> FormMarkup {
        FormMarkup {
            fields: vec![
                FieldMarkup {
                    name: "name".into(),
                    required: true,
                    value: String::new(),
                },
                FieldMarkup {
                    name: "class".into(),
                    required: false,
                    value: "JSS1".into(),
                },
            ],
            submit_button: true,
            submit_label: "Apply Now".into(),
        }
    }

    #[test]
    fn reset_restores_markup_values() {
        let mut form = FormState::from_markup(&markup());
        assert!(form.set_value("name", "Amina"));
        assert!(form.set_value("class", "SSS2"));
        assert!(!form.set_value("nickname", "Ami"));

        form.reset();
        assert_eq!(form.value("name"), Some(""));
        assert_eq!(form.value("class"), Some("JSS1"));
    }

    #[test]
    fn submit_cycle_relabels_and_restores_the_button() {
        let mut form = FormState::from_markup(&markup());
        form.begin_submit();
        assert!(form.is_submitting());
        assert_eq!(form.submit_button().map(|b| b.label.as_str()), Some(IN_FLIGHT_LABEL));

        form.end_submit();
        assert_eq!(
            form.submit_button(),
            Some(&SubmitButton {
                label: "Apply Now".into(),
                disabled: false,
            })
        );
    }
}
