use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;

/// Commands sent to an installed analytics hook, shaped like gtag calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AnalyticsCommand {
    Config {
        measurement_id: String,
        page_path: String,
        page_title: String,
    },
    Event {
        name: String,
        payload: Value,
    },
}

pub trait AnalyticsHook {
    fn send(&self, command: AnalyticsCommand);
}

/// Emits each command as a structured log line.
#[derive(Debug, Default)]
pub struct TracingAnalytics;

impl AnalyticsHook for TracingAnalytics {
    fn send(&self, command: AnalyticsCommand) {
        match serde_json::to_string(&command) {
            Ok(json) => tracing::info!(target: "analytics", %json, "analytics command"),
            Err(err) => tracing::warn!(target: "analytics", %err, "unserializable analytics command"),
        }
    }
}

/// Shares every command with the caller; used to observe what the page reports.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnalytics {
    commands: Arc<Mutex<Vec<AnalyticsCommand>>>,
}

impl RecordingAnalytics {
    pub fn commands(&self) -> Vec<AnalyticsCommand> {
        self.commands
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default()
    }
}

impl AnalyticsHook for RecordingAnalytics {
    fn send(&self, command: AnalyticsCommand) {
        if let Ok(mut commands) = self.commands.lock() {
            commands.push(command);
        }
    }
}
