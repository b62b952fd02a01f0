use crate::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the group prefix and the rest of an act identifier.
pub const GROUP_SEPARATOR: char = '.';

/// Identifier of an act, e.g. `2012. évi C. törvény`.
///
/// The identifier doubles as the record's file name, so it may not contain
/// path separators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActId(String);

impl ActId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let invalid = id.is_empty()
            || id == "."
            || id == ".."
            || id.contains(['/', '\\', '\0']);
        if invalid {
            return Err(StoreError::InvalidActId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text before the first [`GROUP_SEPARATOR`], or the whole identifier.
    pub fn group(&self) -> &str {
        self.0
            .split_once(GROUP_SEPARATOR)
            .map_or(self.0.as_str(), |(group, _)| group)
    }
}

impl fmt::Display for ActId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ActId {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ActId> for String {
    fn from(id: ActId) -> Self {
        id.0
    }
}

impl std::str::FromStr for ActId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
