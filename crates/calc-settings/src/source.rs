//! Settings sources.
//!
//! A [`SettingsSource`] fetches one complete snapshot per call. The file
//! source stands in for a remote backend; the static source serves tests and
//! embedders that push settings themselves.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::error::{Result, SettingsError};
use crate::snapshot::SettingsSnapshot;

/// Where snapshots come from.
pub trait SettingsSource: Send + Sync {
    /// Fetch the current snapshot.
    fn fetch(&self) -> impl Future<Output = Result<SettingsSnapshot>> + Send;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Serialization format of a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    /// `.json` files are JSON; everything else is TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }
}

/// Reads a snapshot from a TOML or JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: FileFormat,
}

impl FileSource {
    /// Source for `path`, format chosen by extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = FileFormat::from_path(&path);
        Self { path, format }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> FileFormat {
        self.format
    }
}

impl SettingsSource for FileSource {
    async fn fetch(&self) -> Result<SettingsSnapshot> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| SettingsError::io("read", &self.path, err))?;
        debug!(path = %self.path.display(), bytes = text.len(), "read settings file");
        match self.format {
            FileFormat::Toml => SettingsSnapshot::from_toml_str(&text, &self.path),
            FileFormat::Json => SettingsSnapshot::from_json_str(&text, &self.path),
        }
    }

    fn describe(&self) -> String {
        format!("{} file {}", self.format.label(), self.path.display())
    }
}

/// In-memory source; clones share the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshot: Arc<Mutex<SettingsSnapshot>>,
}

impl StaticSource {
    #[must_use]
    pub fn new(snapshot: SettingsSnapshot) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(snapshot)),
        }
    }

    /// Replace what subsequent fetches return.
    pub fn set(&self, snapshot: SettingsSnapshot) {
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }
}

impl SettingsSource for StaticSource {
    async fn fetch(&self) -> Result<SettingsSnapshot> {
        Ok(self
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn describe(&self) -> String {
        "in-memory settings".to_string()
    }
}
