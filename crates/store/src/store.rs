use crate::{ActId, FixupEntry, Result, StoreError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const RECORD_EXTENSION: &str = "yml";
pub const DEFAULT_FIXUPS_DIR: &str = "./data/fixups";

const TMP_EXTENSION: &str = "yml.tmp";

/// Fixup records laid out as `<root>/<group>/<act>.yml`.
#[derive(Debug, Clone)]
pub struct FixupStore {
    root: PathBuf,
}

impl FixupStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn record_path(&self, act: &ActId) -> PathBuf {
        self.root
            .join(act.group())
            .join(format!("{act}.{RECORD_EXTENSION}"))
    }

    pub fn exists(&self, act: &ActId) -> bool {
        self.record_path(act).is_file()
    }

    pub fn load(&self, act: &ActId) -> Result<Vec<FixupEntry>> {
        let path = self.record_path(act);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::MissingRecord {
                    act: act.to_string(),
                    path,
                });
            }
            Err(err) => return Err(err.into()),
        };

        let malformed = |source| StoreError::MalformedRecord {
            path: path.clone(),
            source,
        };
        let value: serde_yaml::Value = serde_yaml::from_slice(&bytes).map_err(malformed)?;
        // An empty file parses as null.
        if value.is_null() {
            return Ok(Vec::new());
        }
        serde_yaml::from_value(value).map_err(malformed)
    }

    /// Replaces the record with `entries`, or deletes it when `entries` is empty.
    pub fn save(&self, act: &ActId, entries: &[FixupEntry]) -> Result<()> {
        let path = self.record_path(act);
        if entries.is_empty() {
            return self.remove(&path);
        }

        let text = serde_yaml::to_string(entries)?;
        write_atomically(&path, text.as_bytes()).map_err(|source| StoreError::WriteFailed {
            path: path.clone(),
            source,
        })?;
        log::debug!("Wrote {} fixups to {}", entries.len(), path.display());
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => {
                log::debug!("Removed {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::WriteFailed {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension(TMP_EXTENSION);
    let result = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
