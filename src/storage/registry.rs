use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::Result;

/// The flat `apps.txt` file: one application path per line, insertion order.
///
/// Every call goes back to disk; nothing is cached between calls. There is no
/// locking, so two running instances can overwrite each other's changes.
#[derive(Debug, Clone)]
pub struct AppRegistry {
    path: PathBuf,
}

impl AppRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All non-blank entries, trimmed. Creates an empty file if none exists.
    pub async fn read_all(&self) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Registry {:?} not found, creating it", self.path);
                self.create_empty().await?;
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Replaces the file contents with `entries`, one per line.
    pub async fn write_all(&self, entries: &[String]) -> Result<()> {
        self.ensure_parent().await?;

        let mut content = String::new();
        for entry in entries {
            content.push_str(entry);
            content.push('\n');
        }
        fs::write(&self.path, content).await?;
        debug!("Wrote {} entries to {:?}", entries.len(), self.path);
        Ok(())
    }

    /// Adds `entry` as the last line without touching the existing lines.
    pub async fn append(&self, entry: &str) -> Result<()> {
        self.ensure_parent().await?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", entry.trim()).as_bytes()).await?;
        file.flush().await?;
        debug!("Appended {} to {:?}", entry.trim(), self.path);
        Ok(())
    }

    /// Removes the first line equal to `entry`. Returns whether anything changed.
    pub async fn remove(&self, entry: &str) -> Result<bool> {
        let mut entries = self.read_all().await?;
        match entries.iter().position(|e| e == entry) {
            Some(index) => {
                entries.remove(index);
                self.write_all(&entries).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the entry displayed at `row`. If the file changed since it was
    /// displayed and `row` no longer holds `entry`, removes the first match.
    pub async fn remove_at(&self, row: usize, entry: &str) -> Result<bool> {
        let mut entries = self.read_all().await?;
        let index = if entries.get(row).map(String::as_str) == Some(entry) {
            Some(row)
        } else {
            entries.iter().position(|e| e == entry)
        };

        match index {
            Some(index) => {
                entries.remove(index);
                self.write_all(&entries).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create_empty(&self) -> Result<()> {
        self.ensure_parent().await?;
        fs::write(&self.path, "").await?;
        Ok(())
    }

    async fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }
}
