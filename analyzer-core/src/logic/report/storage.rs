use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use uuid::Uuid;

use super::export;
use crate::logic::analysis::Analysis;

/// Temporary annotated-CSV files, one per analysis
#[derive(Debug, Clone)]
pub struct ExportStore {
    base_dir: PathBuf,
}

impl ExportStore {
    pub fn from_path(base_dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path_for(&self, id: Uuid) -> PathBuf {
        self.base_dir.join(format!("analysis-{}.csv", id))
    }

    /// Write the annotated CSV for `analysis`, returning its path
    pub fn save(&self, analysis: &Analysis) -> io::Result<PathBuf> {
        let path = self.path_for(analysis.id);
        let bytes = export::to_csv_bytes(analysis)?;
        fs::write(&path, bytes)?;
        log::debug!("Saved export {}", path.display());
        Ok(path)
    }

    /// Read a previously saved export; `NotFound` if it does not exist
    pub fn load(&self, id: Uuid) -> io::Result<Vec<u8>> {
        fs::read(self.path_for(id))
    }

    pub fn remove(&self, id: Uuid) -> io::Result<()> {
        fs::remove_file(self.path_for(id))
    }

    /// Delete exports last written at least `max_age` ago; returns how many
    ///
    /// Only `analysis-*.csv` files are touched. A file that vanishes while
    /// pruning (another request got there first) is not an error.
    pub fn prune_older_than(&self, max_age: Duration) -> io::Result<usize> {
        let now = SystemTime::now();
        let mut removed = 0;

        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !(name.starts_with("analysis-") && name.ends_with(".csv")) {
                continue;
            }

            let modified = entry.metadata()?.modified()?;
            let age = now.duration_since(modified).unwrap_or_default();
            if age < max_age {
                continue;
            }

            match fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }

        if removed > 0 {
            log::info!("Pruned {} expired export(s) from {}", removed, self.base_dir.display());
        }
        Ok(removed)
    }
}
