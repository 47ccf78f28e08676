//! # Report Files
//!
//! Writes rendered end-of-shift reports into the report directory. An
//! existing report is never overwritten: when the name is taken the writer
//! tries `Report_..._2.csv`, `Report_..._3.csv` and so on.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};

/// Highest suffix tried before giving up.
const MAX_NAME_ATTEMPTS: usize = 100;

#[derive(Debug, Clone)]
pub struct ReportWriter {
    report_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(report_dir: impl Into<PathBuf>) -> Self {
        ReportWriter {
            report_dir: report_dir.into(),
        }
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    /// Writes `contents` under `file_name` or the first free suffixed name.
    /// Returns the path written.
    pub fn write(&self, file_name: &str, contents: &str) -> StoreResult<PathBuf> {
        fs::create_dir_all(&self.report_dir).map_err(|e| StoreError::io(&self.report_dir, e))?;

        let first = self.report_dir.join(file_name);
        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let path = if attempt == 1 {
                first.clone()
            } else {
                self.report_dir.join(suffixed(file_name, attempt))
            };

            let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    warn!(path = %path.display(), "Report name taken, trying next");
                    continue;
                }
                Err(e) => return Err(StoreError::io(&path, e)),
            };

            fill_or_discard(&path, file, |file| {
                file.write_all(contents.as_bytes())?;
                file.sync_all()
            })?;

            info!(path = %path.display(), bytes = contents.len(), "Report written");
            return Ok(path);
        }

        Err(StoreError::ReportExists { path: first })
    }
}

/// Runs `fill` on a freshly created report file. On failure the partial
/// file is removed so the name stays free.
fn fill_or_discard(
    path: &Path,
    mut file: File,
    fill: impl FnOnce(&mut File) -> io::Result<()>,
) -> StoreResult<()> {
    if let Err(e) = fill(&mut file) {
        drop(file);
        if let Err(remove_err) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %remove_err, "Could not remove partial report");
        }
        return Err(StoreError::io(path, e));
    }
    Ok(())
}

/// `Report_x.csv` → `Report_x_2.csv`
fn suffixed(file_name: &str, n: usize) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{n}.{ext}"),
        None => format!("{file_name}_{n}"),
    }
}
