//! File-backed cookie jar
//!
//! Persists cookies as a JSON file so one CLI invocation sees what the
//! previous one wrote, the way a browser keeps the basket cookies alive
//! between page loads.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::jar::{CookieJar, StoredCookie};

#[derive(Debug, Default, Serialize, Deserialize)]
struct JarFile {
    entries: HashMap<String, StoredCookie>,
}

/// Cookie jar stored as a JSON file on disk.
#[derive(Debug)]
pub struct FileJar {
    path: PathBuf,
    entries: HashMap<String, StoredCookie>,
}

impl FileJar {
    /// Load the jar at `path`, dropping expired entries. A missing or
    /// corrupt file yields an empty jar.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<JarFile>(&contents)
                .map(|file| file.entries)
                .unwrap_or_default(),
            Err(_) => HashMap::new(),
        };
        entries.retain(|_, cookie| !cookie.is_expired());
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) {
        if let Err(error) = self.try_save() {
            tracing::warn!(
                path = %self.path.display(),
                error = %error,
                "Cookie jar save failed"
            );
        }
    }

    fn try_save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = JarFile {
            entries: self.entries.clone(),
        };
        let contents = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl CookieJar for FileJar {
    fn get(&self, name: &str) -> Option<String> {
        self.entries
            .get(name)
            .filter(|cookie| !cookie.is_expired())
            .map(|cookie| cookie.value.clone())
    }

    fn set(&mut self, name: &str, value: &str, max_age_secs: u64) {
        self.entries
            .insert(name.to_string(), StoredCookie::new(value, max_age_secs));
        self.save();
    }

    fn remove(&mut self, name: &str) {
        if self.entries.remove(name).is_some() {
            self.save();
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.save();
    }
}
