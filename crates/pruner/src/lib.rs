//! # Fixup Pruner
//!
//! Removes fixup entries that make no difference to a verifier's output.
//!
//! ## Pipeline
//!
//! ```text
//! ActSource (discovered records or an explicit list)
//!     │
//!     └──> Minimizer, per act
//!            ├─> baseline = verifier(act)
//!            ├─> for each position: persist trial, verifier(act), accept or keep
//!            └─> persist accepted list (or delete the record)
//! ```
//!
//! A trial is accepted only when the verifier exits successfully and prints
//! exactly the baseline's bytes. Any store or launch error aborts the batch.
//!
//! ## Example
//!
//! ```no_run
//! use fixup_pruner::{BatchDriver, CommandVerifier, Minimizer};
//! use fixup_store::{FixupStore, RecordScanner};
//!
//! fn main() -> fixup_pruner::Result<()> {
//!     let store = FixupStore::new("./data/fixups");
//!     let scanner = RecordScanner::new(store.root());
//!     let minimizer = Minimizer::new(store, CommandVerifier::default());
//!     let report = BatchDriver::new(minimizer).run(&scanner)?;
//!
//!     println!("Removed {} fixups", report.removed_entries());
//!     Ok(())
//! }
//! ```

mod driver;
mod error;
mod minimizer;
mod stats;
mod verifier;

pub use driver::{ActSource, BatchDriver};
pub use error::{PruneError, Result};
pub use minimizer::Minimizer;
pub use stats::{ActReport, BatchReport};
pub use verifier::{
    CommandVerifier, StderrMode, Verifier, VerifierOutcome, DEFAULT_VERIFIER_ARGS,
    DEFAULT_VERIFIER_PROGRAM,
};
