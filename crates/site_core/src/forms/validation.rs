use std::sync::LazyLock;

use regex::Regex;
use shared::error::SiteError;

/// `local@domain.tld` with no whitespace and a single `@`.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

pub const ADMISSIONS_ERROR: &str = "Please fill in all required fields correctly.";
pub const NAME_ERROR: &str = "Please enter a valid name";
pub const EMAIL_ERROR: &str = "Please enter a valid email address";
pub const SUBJECT_ERROR: &str = "Subject must be at least 3 characters";
pub const MESSAGE_ERROR: &str = "Message must be at least 10 characters";

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

fn min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Per-field rule for the contact form, keyed by field id. Fields without a
/// rule always pass.
pub fn validate_contact_field(field: &str, value: &str) -> Result<(), SiteError> {
    let ok = match field {
        "name" => min_chars(value, 2),
        "email" => is_valid_email(value.trim()),
        "subject" => min_chars(value, 3),
        "message" => min_chars(value, 10),
        _ => true,
    };
    if ok {
        return Ok(());
    }
    let message = match field {
        "name" => NAME_ERROR,
        "email" => EMAIL_ERROR,
        "subject" => SUBJECT_ERROR,
        _ => MESSAGE_ERROR,
    };
    Err(SiteError::validation(message))
}

/// Whole-submission check for the admissions form: the `email` entry must
/// match the address pattern and no entry may be blank.
pub fn validate_admissions<'a>(
    entries: impl IntoIterator<Item = (&'a str, &'a str)> + Clone,
) -> Result<(), SiteError> {
    let email = entries
        .clone()
        .into_iter()
        .find(|(name, _)| *name == "email")
        .map(|(_, value)| value);
    if !email.is_some_and(is_valid_email) {
        return Err(SiteError::validation(ADMISSIONS_ERROR));
    }
    if entries.into_iter().any(|(_, value)| value.trim().is_empty()) {
        return Err(SiteError::validation(ADMISSIONS_ERROR));
    }
    Ok(())
}
