//! JSON-lines driver for a running page.

use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{
    domain::FormKind,
    error::ErrorReport,
    events::{DispatchOutcome, PageEvent},
};
use site_core::{PageSnapshot, SiteRuntime};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    Event { event: PageEvent },
    Advance { ms: u64 },
    SaveDraft { form: FormKind },
    RestoreDraft { form: FormKind },
    TrackEvent {
        name: String,
        #[serde(default)]
        payload: Value,
    },
    Snapshot,
}

#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepReport {
    Dispatched { outcome: DispatchOutcome },
    Advanced { now_ms: u128 },
    DraftSaved,
    DraftRestored { fields: usize },
    Tracked,
    Snapshot { snapshot: Box<PageSnapshot> },
    Failed { error: ErrorReport },
}

pub fn apply(runtime: &mut SiteRuntime, step: ScriptStep) -> StepReport {
    match step {
        ScriptStep::Event { event } => StepReport::Dispatched {
            outcome: runtime.dispatch(event),
        },
        ScriptStep::Advance { ms } => {
            runtime.advance(Duration::from_millis(ms));
            StepReport::Advanced {
                now_ms: runtime.now().as_millis(),
            }
        }
        ScriptStep::SaveDraft { form } => match runtime.save_draft(form) {
            Ok(()) => StepReport::DraftSaved,
            Err(err) => StepReport::Failed {
                error: ErrorReport::from(&err),
            },
        },
        ScriptStep::RestoreDraft { form } => match runtime.restore_draft(form) {
            Ok(fields) => StepReport::DraftRestored { fields },
            Err(err) => StepReport::Failed {
                error: ErrorReport::from(&err),
            },
        },
        ScriptStep::TrackEvent { name, payload } => {
            runtime.track_event(name, payload);
            StepReport::Tracked
        }
        ScriptStep::Snapshot => StepReport::Snapshot {
            snapshot: Box::new(runtime.snapshot()),
        },
    }
}

/// Parses one script line; blank lines and `//` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ScriptStep>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") {
        return Ok(None);
    }
    serde_json::from_str(line)
        .map(Some)
        .with_context(|| format!("invalid script step: {line}"))
}

/// Runs every step in order, writing one report line per step.
pub fn run_script(runtime: &mut SiteRuntime, script: &str, out: &mut impl Write) -> Result<usize> {
    let mut steps = 0;
    for (number, line) in script.lines().enumerate() {
        let Some(step) = parse_line(line).with_context(|| format!("line {}", number + 1))? else {
            continue;
        };
        let report = apply(runtime, step);
        serde_json::to_writer(&mut *out, &report)?;
        writeln!(out)?;
        steps += 1;
    }
    Ok(steps)
}
