use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use site_core::submission::Submission;
use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
    sync::mpsc::UnboundedReceiver,
    task::JoinHandle,
};
use tracing::{info, warn};

/// Destination for submissions that finished their round trip on the page.
#[async_trait]
pub trait SubmissionOutbox: Send {
    async fn deliver(&mut self, submission: &Submission) -> Result<()>;
}

/// Logs each submission without persisting it.
pub struct LogOutbox;

#[async_trait]
impl SubmissionOutbox for LogOutbox {
    async fn deliver(&mut self, submission: &Submission) -> Result<()> {
        info!(
            form = submission.form.label(),
            fields = submission.fields.len(),
            "submission received"
        );
        Ok(())
    }
}

/// Appends one JSON object per submission.
pub struct JsonLinesOutbox {
    path: PathBuf,
    file: File,
}

impl JsonLinesOutbox {
    pub async fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("failed to open outbox '{}'", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }
}

#[async_trait]
impl SubmissionOutbox for JsonLinesOutbox {
    async fn deliver(&mut self, submission: &Submission) -> Result<()> {
        let mut line = serde_json::to_vec(submission)?;
        line.push(b'\n');
        self.file
            .write_all(&line)
            .await
            .with_context(|| format!("failed to append to '{}'", self.path.display()))?;
        self.file.flush().await?;
        Ok(())
    }
}

/// Drains the channel until every sender is dropped; resolves to the number
/// of submissions delivered.
pub fn spawn_outbox(
    mut outbox: Box<dyn SubmissionOutbox>,
    mut rx: UnboundedReceiver<Submission>,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut delivered = 0;
        while let Some(submission) = rx.recv().await {
            match outbox.deliver(&submission).await {
                Ok(()) => delivered += 1,
                Err(error) => warn!(%error, "failed to deliver submission"),
            }
        }
        delivered
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use shared::domain::FormKind;
    use tokio::sync::mpsc;

    use super::*;

    #[tokio::test]
    async fn json_lines_outbox_appends_each_submission() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("outbox.jsonl");
        let outbox = JsonLinesOutbox::open(&path).await.expect("open outbox");

        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_outbox(Box::new(outbox), rx);
        for name in ["Amina", "Yusuf"] {
            let fields = BTreeMap::from([("name".to_string(), name.to_string())]);
            tx.send(Submission::new(FormKind::Contact, fields))
                .expect("send");
        }
        drop(tx);

        assert_eq!(handle.await.expect("outbox task"), 2);
        let written = tokio::fs::read_to_string(&path).await.expect("read outbox");
        let lines: Vec<Submission> = written
            .lines()
            .map(|line| serde_json::from_str(line).expect("submission line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].fields["name"], "Yusuf");
    }
}
