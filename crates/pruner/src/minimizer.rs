use crate::stats::ActReport;
use crate::{PruneError, Result, Verifier, VerifierOutcome};
use fixup_store::{ActId, FixupEntry, FixupStore};
use std::time::Instant;

/// Greedy one-entry-at-a-time reduction of an act's fixup record.
///
/// The verifier reads the record from the store, so every trial is persisted
/// before it is verified. The record is left holding the last accepted list
/// when the search ends, and also when it is aborted by an error.
pub struct Minimizer<V> {
    store: FixupStore,
    verifier: V,
}

impl<V: Verifier> Minimizer<V> {
    pub fn new(store: FixupStore, verifier: V) -> Self {
        Self { store, verifier }
    }

    /// Prunes the record of `act` and returns what was kept.
    ///
    /// The record is loaded before the baseline run so that an act without
    /// a record fails with `MissingRecord` instead of as a verifier failure.
    /// Nothing is written between the two, so the baseline still sees the
    /// original record.
    pub fn minimize(&mut self, act: &ActId) -> Result<ActReport> {
        let started = Instant::now();
        log::info!("Pruning {act}");

        let original = self.store.load(act)?;
        let original_entries = original.len();

        let baseline = self.verifier.run(act)?;
        if !baseline.success {
            return Err(PruneError::BaselineFailed {
                act: act.to_string(),
                status: baseline.status_description(),
            });
        }
        let mut search = Search {
            accepted: original,
            verifier_runs: 1,
        };

        if let Err(err) = self.search(act, &baseline, &mut search) {
            self.restore(act, &search.accepted);
            return Err(err);
        }

        self.store.save(act, &search.accepted)?;
        let report = ActReport {
            act: act.to_string(),
            original_entries,
            kept_entries: search.accepted.len(),
            verifier_runs: search.verifier_runs,
            record_deleted: search.accepted.is_empty(),
            time_ms: started.elapsed().as_millis() as u64,
        };
        if report.record_deleted {
            log::info!("All fixups of {act} were unnecessary, record removed");
        } else {
            log::info!(
                "Kept {}/{} fixups for {act}",
                report.kept_entries,
                report.original_entries
            );
        }
        Ok(report)
    }

    fn search(
        &mut self,
        act: &ActId,
        baseline: &VerifierOutcome,
        search: &mut Search,
    ) -> Result<()> {
        let mut cursor = 0;
        while cursor < search.accepted.len() {
            let trial = without(&search.accepted, cursor);
            self.store.save(act, &trial)?;

            let outcome = self.verifier.run(act)?;
            search.verifier_runs += 1;

            if outcome.reproduces(baseline) {
                log::info!(
                    "Pruned {} from {}",
                    search.accepted[cursor].summary(),
                    self.store.record_path(act).display()
                );
                // The entry that shifted into `cursor` is the next candidate.
                search.accepted = trial;
            } else {
                log::debug!(
                    "Fixup {cursor} of {act} is needed ({})",
                    outcome.status_description()
                );
                cursor += 1;
            }
        }
        Ok(())
    }

    fn restore(&self, act: &ActId, accepted: &[FixupEntry]) {
        if let Err(err) = self.store.save(act, accepted) {
            log::warn!("Failed to restore last verified fixups of {act}: {err}");
        }
    }
}

struct Search {
    accepted: Vec<FixupEntry>,
    verifier_runs: usize,
}

fn without(entries: &[FixupEntry], index: usize) -> Vec<FixupEntry> {
    let mut trial = Vec::with_capacity(entries.len().saturating_sub(1));
    trial.extend_from_slice(&entries[..index]);
    trial.extend_from_slice(&entries[index + 1..]);
    trial
}
