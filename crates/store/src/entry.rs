use serde::{Deserialize, Serialize};

/// One fixup entry. The content belongs to the verifier; the store only
/// moves it around, so it is kept as an untyped YAML value and written back
/// exactly as it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixupEntry(serde_yaml::Value);

impl FixupEntry {
    pub fn new(value: serde_yaml::Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &serde_yaml::Value {
        &self.0
    }

    /// Single-line rendering for log messages.
    pub fn summary(&self) -> String {
        serde_yaml::to_string(&self.0)
            .map(|text| text.trim_end().replace('\n', "; "))
            .unwrap_or_else(|_| format!("{:?}", self.0))
    }
}
