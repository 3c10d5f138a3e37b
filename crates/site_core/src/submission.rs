//! Hand-off point for completed submissions.
//!
//! The page always reports success after the fixed delay; a sink only
//! receives the payload.

use std::collections::BTreeMap;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::domain::FormKind;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub form: FormKind,
    pub fields: BTreeMap<String, String>,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(form: FormKind, fields: BTreeMap<String, String>) -> Self {
        Self {
            form,
            fields,
            submitted_at: Utc::now(),
        }
    }
}

pub trait SubmissionSink {
    fn send(&mut self, submission: Submission) -> anyhow::Result<()>;
}

/// Keeps every payload in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<Submission>,
}

impl SubmissionSink for RecordingSink {
    fn send(&mut self, submission: Submission) -> anyhow::Result<()> {
        self.sent.push(submission);
        Ok(())
    }
}

/// Forwards payloads to an async consumer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<Submission>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<Submission>) -> Self {
        Self { tx }
    }
}

impl SubmissionSink for ChannelSink {
    fn send(&mut self, submission: Submission) -> anyhow::Result<()> {
        self.tx
            .send(submission)
            .map_err(|_| anyhow!("submission consumer has shut down"))
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    #[tokio::test]
    async fn channel_sink_delivers_to_consumer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut sink = ChannelSink::new(tx);
        let fields = BTreeMap::from([("email".to_string(), "a@b.co".to_string())]);

        sink.send(Submission::new(FormKind::Admissions, fields.clone()))
            .expect("send");

        let received = rx.recv().await.expect("submission");
        assert_eq!(received.form, FormKind::Admissions);
        assert_eq!(received.fields, fields);
    }

    #[tokio::test]
    async fn channel_sink_reports_closed_consumer() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut sink = ChannelSink::new(tx);
        assert!(sink
            .send(Submission::new(FormKind::Contact, BTreeMap::new()))
            .is_err());
    }
}
