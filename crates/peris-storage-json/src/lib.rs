//! peris-storage-json
//!
//! Filesystem-backed JSON persistence for cashflow quarters. One pretty
//! printed `YYYY.NQ.json` file per quarter, written atomically.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use peris_core::{storage::QuarterStore, CoreError};
use peris_domain::{CashflowEntry, Quarter};

const QUARTER_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each quarter's entry list as a JSON array under a single data
/// directory.
#[derive(Debug, Clone)]
pub struct JsonQuarterStore {
    data_dir: PathBuf,
}

impl JsonQuarterStore {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn quarter_path(&self, quarter: Quarter) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", quarter, QUARTER_EXTENSION))
    }
}

impl QuarterStore for JsonQuarterStore {
    fn load_quarter(&self, quarter: Quarter) -> Result<Vec<CashflowEntry>, CoreError> {
        let path = self.quarter_path(quarter);
        if !path.exists() {
            return Err(CoreError::QuarterNotFound(quarter.to_string()));
        }
        let data = fs::read_to_string(&path)?;
        let entries: Vec<CashflowEntry> =
            serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
        tracing::debug!(%quarter, count = entries.len(), "loaded quarter");
        Ok(entries)
    }

    fn save_quarter(&self, quarter: Quarter, entries: &[CashflowEntry]) -> Result<(), CoreError> {
        let path = self.quarter_path(quarter);
        let json = serde_json::to_string_pretty(entries)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(%quarter, count = entries.len(), "saved quarter");
        Ok(())
    }

    fn list_quarters(&self) -> Result<Vec<Quarter>, CoreError> {
        let mut quarters = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(QUARTER_EXTENSION) {
                continue;
            }
            let stem = match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) => stem,
                None => continue,
            };
            // Unrelated JSON files in the data directory are skipped.
            if let Ok(quarter) = stem.parse::<Quarter>() {
                quarters.push(quarter);
            }
        }
        quarters.sort();
        Ok(quarters)
    }

    fn delete_quarter(&self, quarter: Quarter) -> Result<(), CoreError> {
        let path = self.quarter_path(quarter);
        if !path.exists() {
            return Err(CoreError::QuarterNotFound(quarter.to_string()));
        }
        fs::remove_file(&path)?;
        tracing::debug!(%quarter, "deleted quarter");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    path.with_extension(format!("{}.{}", QUARTER_EXTENSION, TMP_SUFFIX))
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
