use crate::{BatchReport, Minimizer, Result, Verifier};
use fixup_store::{ActId, RecordScanner};
use std::time::Instant;

/// Supplies the acts a batch run should prune.
pub trait ActSource {
    fn acts(&self) -> Box<dyn Iterator<Item = fixup_store::Result<ActId>> + '_>;
}

impl ActSource for RecordScanner {
    fn acts(&self) -> Box<dyn Iterator<Item = fixup_store::Result<ActId>> + '_> {
        Box::new(self.scan())
    }
}

impl ActSource for Vec<ActId> {
    fn acts(&self) -> Box<dyn Iterator<Item = fixup_store::Result<ActId>> + '_> {
        Box::new(self.iter().cloned().map(Ok))
    }
}

/// Prunes acts one after the other, stopping at the first error.
pub struct BatchDriver<V> {
    minimizer: Minimizer<V>,
}

impl<V: Verifier> BatchDriver<V> {
    pub fn new(minimizer: Minimizer<V>) -> Self {
        Self { minimizer }
    }

    pub fn run(&mut self, source: &dyn ActSource) -> Result<BatchReport> {
        let started = Instant::now();
        let mut batch = BatchReport::new();

        for act in source.acts() {
            let act = act?;
            match self.minimizer.minimize(&act) {
                Ok(report) => batch.add_act(report),
                Err(err) => {
                    log::error!("Pruning {act} failed, stopping: {err}");
                    return Err(err);
                }
            }
        }

        batch.time_ms = started.elapsed().as_millis() as u64;
        log::info!(
            "Pruned {} acts: removed {} of {} fixups, deleted {} records",
            batch.acts.len(),
            batch.removed_entries(),
            batch.original_entries,
            batch.records_deleted
        );
        Ok(batch)
    }
}
