//! Persistence of raw pages and extracted neighborhood names.
//!
//! Files are written as UTF-8 with a byte-order mark so downstream tools
//! that expect the marker keep working.

use crate::craigslist::models::RawPage;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// UTF-8 byte-order mark.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Destination for raw pages and neighborhood names.
///
/// Implementations report failures through the log and never abort a run.
pub trait PersistenceSink {
    /// Writes one raw page, replacing any earlier copy with the same label.
    fn write_page(&self, page: &RawPage);

    /// Appends neighborhood names to the shared log with no delimiter between entries.
    fn append_neighborhoods(&self, neighborhoods: &[String]);
}

/// Filesystem sink rooted at a scrape directory and a shared log file.
pub struct FsSink {
    scrape_dir: PathBuf,
    locations_log: PathBuf,
}

impl FsSink {
    /// Creates a sink writing pages under `scrape_dir` and names to `locations_log`.
    pub fn new(scrape_dir: impl Into<PathBuf>, locations_log: impl Into<PathBuf>) -> Self {
        Self { scrape_dir: scrape_dir.into(), locations_log: locations_log.into() }
    }

    /// Returns the cache file path for a page label.
    pub fn page_path(&self, label: &str) -> PathBuf {
        self.scrape_dir.join(format!("{}.html", label.replace(['/', '\\'], "_")))
    }

    /// Empties the neighborhood log, leaving only the byte-order mark.
    pub fn reset_log(&self) {
        if let Err(e) = self.try_reset_log() {
            warn!("Failed to reset locations log {}: {:#}", self.locations_log.display(), e);
        }
    }

    fn try_reset_log(&self) -> Result<()> {
        ensure_parent(&self.locations_log)?;
        fs::write(&self.locations_log, BOM)
            .with_context(|| format!("Failed to write {}", self.locations_log.display()))
    }

    fn try_write_page(&self, page: &RawPage) -> Result<PathBuf> {
        fs::create_dir_all(&self.scrape_dir).with_context(|| {
            format!("Failed to create directory {}", self.scrape_dir.display())
        })?;

        let path = self.page_path(&page.label);
        let mut contents = Vec::with_capacity(BOM.len() + page.html.len());
        contents.extend_from_slice(BOM);
        contents.extend_from_slice(page.html.as_bytes());

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    fn try_append(&self, neighborhoods: &[String]) -> Result<()> {
        ensure_parent(&self.locations_log)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.locations_log)
            .with_context(|| format!("Failed to open {}", self.locations_log.display()))?;

        if file.metadata().map(|m| m.len() == 0).unwrap_or(false) {
            file.write_all(BOM)?;
        }

        for neighborhood in neighborhoods {
            file.write_all(neighborhood.as_bytes())?;
        }

        Ok(())
    }
}

impl PersistenceSink for FsSink {
    fn write_page(&self, page: &RawPage) {
        match self.try_write_page(page) {
            Ok(path) => debug!("Saved page '{}' to {}", page.label, path.display()),
            Err(e) => warn!("Failed to save page '{}': {:#}", page.label, e),
        }
    }

    fn append_neighborhoods(&self, neighborhoods: &[String]) {
        match self.try_append(neighborhoods) {
            Ok(()) => debug!(
                "Appended {} neighborhoods to {}",
                neighborhoods.len(),
                self.locations_log.display()
            ),
            Err(e) => warn!(
                "Failed to append to locations log {}: {:#}",
                self.locations_log.display(),
                e
            ),
        }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display())),
        _ => Ok(()),
    }
}
