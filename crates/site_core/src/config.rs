use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub autoplay_interval_ms: u64,
    pub submit_delay_ms: u64,
    pub notification_dismiss_ms: u64,
    pub notification_slide_out_ms: u64,
    pub contact_message_clear_ms: u64,
    pub mobile_breakpoint_px: f64,
    pub reveal_threshold: f64,
    pub reveal_bottom_margin_px: f64,
    pub anchor_offset_px: f64,
    pub draft_storage_key: String,
    pub site_hostname: String,
    pub analytics_measurement_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 5000,
            submit_delay_ms: 1500,
            notification_dismiss_ms: 4000,
            notification_slide_out_ms: 300,
            contact_message_clear_ms: 5000,
            mobile_breakpoint_px: 767.0,
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 50.0,
            anchor_offset_px: 20.0,
            draft_storage_key: "formData".into(),
            site_hostname: "localhost".into(),
            analytics_measurement_id: "GA_MEASUREMENT_ID".into(),
        }
    }
}

impl Settings {
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn notification_dismiss(&self) -> Duration {
        Duration::from_millis(self.notification_dismiss_ms)
    }

    pub fn notification_slide_out(&self) -> Duration {
        Duration::from_millis(self.notification_slide_out_ms)
    }

    pub fn contact_message_clear(&self) -> Duration {
        Duration::from_millis(self.contact_message_clear_ms)
    }

    /// Rejects values the page clock cannot run with. Timeouts may be zero;
    /// a zero autoplay period would re-arm forever at the same instant.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.autoplay_interval_ms > 0,
            "autoplay_interval_ms must be greater than zero"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.reveal_threshold),
            "reveal_threshold must be between 0 and 1, got {}",
            self.reveal_threshold
        );
        Ok(())
    }
}

/// Reads settings from `path` (defaults when the file is absent), then applies
/// `SITE__*` environment overrides.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<Settings>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
        .validate()
        .with_context(|| format!("invalid settings from '{}'", path.display()))?;
    Ok(settings)
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    fn parsed<T: std::str::FromStr>(
        lookup: &impl Fn(&str) -> Option<String>,
        name: &str,
    ) -> Option<T> {
        let raw = lookup(name)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(variable = name, value = %raw, "ignoring unparsable override");
                None
            }
        }
    }

    if let Some(v) = parsed(&lookup, "SITE__AUTOPLAY_INTERVAL_MS") {
        settings.autoplay_interval_ms = v;
    }
    if let Some(v) = parsed(&lookup, "SITE__SUBMIT_DELAY_MS") {
        settings.submit_delay_ms = v;
    }
    if let Some(v) = parsed(&lookup, "SITE__NOTIFICATION_DISMISS_MS") {
        settings.notification_dismiss_ms = v;
    }
    if let Some(v) = parsed(&lookup, "SITE__NOTIFICATION_SLIDE_OUT_MS") {
        settings.notification_slide_out_ms = v;
    }
    if let Some(v) = parsed(&lookup, "SITE__CONTACT_MESSAGE_CLEAR_MS") {
        settings.contact_message_clear_ms = v;
    }
    if let Some(v) = parsed(&lookup, "SITE__MOBILE_BREAKPOINT_PX") {
        settings.mobile_breakpoint_px = v;
    }
    if let Some(v) = parsed(&lookup, "SITE__REVEAL_THRESHOLD") {
        settings.reveal_threshold = v;
    }
    if let Some(v) = parsed(&lookup, "SITE__REVEAL_BOTTOM_MARGIN_PX") {
        settings.reveal_bottom_margin_px = v;
    }
    if let Some(v) = parsed(&lookup, "SITE__ANCHOR_OFFSET_PX") {
        settings.anchor_offset_px = v;
    }
    if let Some(v) = lookup("SITE__DRAFT_STORAGE_KEY") {
        settings.draft_storage_key = v;
    }
    if let Some(v) = lookup("SITE__HOSTNAME") {
        settings.site_hostname = v;
    }
    if let Some(v) = lookup("SITE__ANALYTICS_MEASUREMENT_ID") {
        settings.analytics_measurement_id = v;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load_settings(&dir.path().join("site.toml")).expect("load");
        assert_eq!(settings.autoplay_interval(), Duration::from_millis(5000));
        assert_eq!(settings.draft_storage_key, "formData");
    }

    #[test]
    fn file_values_override_defaults_and_keep_the_rest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("site.toml");
        fs::write(&path, "submit_delay_ms = 250\nsite_hostname = \"school.example\"\n")
            .expect("write");

        let settings = load_settings(&path).expect("load");
        assert_eq!(settings.submit_delay_ms, 250);
        assert_eq!(settings.site_hostname, "school.example");
        assert_eq!(settings.notification_dismiss_ms, 4000);
    }

    #[test]
    fn env_overrides_apply_and_bad_numbers_are_ignored() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SITE__AUTOPLAY_INTERVAL_MS", "3000"),
            ("SITE__MOBILE_BREAKPOINT_PX", "wide"),
            ("SITE__DRAFT_STORAGE_KEY", "admissionsDraft"),
            ("SITE__NOTIFICATION_SLIDE_OUT_MS", "150"),
            ("SITE__REVEAL_THRESHOLD", "0.25"),
            ("SITE__REVEAL_BOTTOM_MARGIN_PX", "80"),
            ("SITE__ANCHOR_OFFSET_PX", "0"),
        ]);
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(settings.autoplay_interval_ms, 3000);
        assert_eq!(settings.mobile_breakpoint_px, 767.0);
        assert_eq!(settings.draft_storage_key, "admissionsDraft");
        assert_eq!(settings.notification_slide_out_ms, 150);
        assert_eq!(settings.reveal_threshold, 0.25);
        assert_eq!(settings.reveal_bottom_margin_px, 80.0);
        assert_eq!(settings.anchor_offset_px, 0.0);
    }

    #[test]
    fn zero_autoplay_period_from_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("site.toml");
        fs::write(&path, "autoplay_interval_ms = 0\n").expect("write");

        let err = load_settings(&path).expect_err("zero period");
        assert!(format!("{err:#}").contains("autoplay_interval_ms"));
    }

    #[test]
    fn zero_autoplay_period_from_env_fails_validation() {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |name| {
            (name == "SITE__AUTOPLAY_INTERVAL_MS").then(|| "0".to_string())
        });

        assert_eq!(settings.autoplay_interval_ms, 0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn zero_timeouts_and_out_of_range_threshold() {
        let settings = Settings {
            submit_delay_ms: 0,
            contact_message_clear_ms: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());

        let settings = Settings {
            reveal_threshold: 1.5,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
