use serde::{Deserialize, Serialize};

/// Outcome of pruning a single act
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActReport {
    pub act: String,

    /// Entries in the record before pruning
    pub original_entries: usize,

    /// Entries left in the record
    pub kept_entries: usize,

    /// Verifier invocations, baseline included
    pub verifier_runs: usize,

    /// The record was removed because no entry was needed
    pub record_deleted: bool,

    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl ActReport {
    pub fn removed_entries(&self) -> usize {
        self.original_entries.saturating_sub(self.kept_entries)
    }
}

/// Totals over a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub acts: Vec<ActReport>,
    pub original_entries: usize,
    pub kept_entries: usize,
    pub records_deleted: usize,
    pub verifier_runs: usize,
    pub time_ms: u64,
}

impl BatchReport {
    pub fn new() -> Self {
        Self {
            acts: Vec::new(),
            original_entries: 0,
            kept_entries: 0,
            records_deleted: 0,
            verifier_runs: 0,
            time_ms: 0,
        }
    }

    pub fn add_act(&mut self, report: ActReport) {
        self.original_entries += report.original_entries;
        self.kept_entries += report.kept_entries;
        self.verifier_runs += report.verifier_runs;
        if report.record_deleted {
            self.records_deleted += 1;
        }
        self.acts.push(report);
    }

    pub fn removed_entries(&self) -> usize {
        self.original_entries.saturating_sub(self.kept_entries)
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::new()
    }
}
