use crate::store::RECORD_EXTENSION;
use crate::{ActId, Result, StoreError};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Finds every act that has a fixup record under a store root.
pub struct RecordScanner {
    root: PathBuf,
}

impl RecordScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Lazily yields act identifiers.
    ///
    /// Each directory is read in full and sorted before its entries are
    /// yielded, so records rewritten while the walk is in progress are
    /// reported exactly once.
    pub fn scan(&self) -> impl Iterator<Item = Result<ActId>> {
        let walk = if self.root.exists() {
            Some(
                WalkDir::new(&self.root)
                    .min_depth(1)
                    .sort_by_file_name()
                    .into_iter(),
            )
        } else {
            log::debug!("Fixup root {} does not exist", self.root.display());
            None
        };

        walk.into_iter()
            .flatten()
            .filter_map(|result| match result {
                Ok(entry) => Self::act_for_entry(&entry).transpose(),
                Err(err) => Some(Err(walk_error(err))),
            })
    }

    fn act_for_entry(entry: &DirEntry) -> Result<Option<ActId>> {
        if !entry.file_type().is_file() {
            return Ok(None);
        }
        let Some(name) = entry.file_name().to_str() else {
            log::warn!("Skipping non UTF-8 record name {}", entry.path().display());
            return Ok(None);
        };
        let Some(stem) = name
            .strip_suffix(RECORD_EXTENSION)
            .and_then(|rest| rest.strip_suffix('.'))
        else {
            return Ok(None);
        };
        if stem.is_empty() {
            return Ok(None);
        }
        ActId::new(stem).map(Some)
    }
}

fn walk_error(err: walkdir::Error) -> StoreError {
    let path = err.path().map(|p| p.display().to_string());
    match err.into_io_error() {
        Some(io) => StoreError::IoError(io),
        None => StoreError::Other(format!(
            "walk failed at {}",
            path.unwrap_or_else(|| "<unknown>".to_string())
        )),
    }
}
