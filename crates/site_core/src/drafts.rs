//! Local-storage stand-in and form draft save/restore.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::PathBuf,
};

use anyhow::Context;
use tracing::debug;

use crate::forms::FormState;

pub trait LocalStorage {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: String) -> anyhow::Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }
}

/// Key/value pairs persisted as one JSON object on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> anyhow::Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("corrupt storage file '{}'", self.path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err)
                .with_context(|| format!("failed to read storage file '{}'", self.path.display())),
        }
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create storage directory '{}'", parent.display())
            })?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&items)?)
            .with_context(|| format!("failed to write storage file '{}'", self.path.display()))
    }
}

/// Serializes the form's current values under `key`.
pub fn save_draft(
    storage: &mut dyn LocalStorage,
    key: &str,
    form: &FormState,
) -> anyhow::Result<()> {
    let data = serde_json::to_string(&form.to_map())?;
    storage.set_item(key, data)?;
    debug!(key, "form draft saved");
    Ok(())
}

/// Fills fields that exist in the form from the saved draft; returns how many
/// were restored.
pub fn restore_draft(
    storage: &dyn LocalStorage,
    key: &str,
    form: &mut FormState,
) -> anyhow::Result<usize> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(0);
    };
    let data: BTreeMap<String, String> =
        serde_json::from_str(&raw).with_context(|| format!("malformed draft under '{key}'"))?;
    let restored = data
        .into_iter()
        .filter(|(name, value)| form.set_value(name, value.as_str()))
        .count();
    debug!(key, restored, "form draft restored");
    Ok(restored)
}
