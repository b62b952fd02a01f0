//! # Fixup Store
//!
//! Persistent fixup records, one YAML file per act.
//!
//! ## Layout
//!
//! ```text
//! data/fixups/
//!     │
//!     ├──> 2012/
//!     │      └─> 2012. évi C. törvény.yml
//!     │
//!     └──> 2020/
//!            ├─> 2020.1.yml
//!            └─> 2020.2.yml
//! ```
//!
//! The group directory is the part of the act identifier before the first `.`.
//! Entries are opaque to this crate: they are loaded and written back without
//! interpreting their fields, and their order is preserved.
//!
//! ## Example
//!
//! ```no_run
//! use fixup_store::{ActId, FixupStore, RecordScanner};
//!
//! fn main() -> fixup_store::Result<()> {
//!     let store = FixupStore::new("./data/fixups");
//!     for act in RecordScanner::new(store.root()).scan() {
//!         let act: ActId = act?;
//!         let entries = store.load(&act)?;
//!         println!("{act}: {} fixups", entries.len());
//!     }
//!     Ok(())
//! }
//! ```

mod act;
mod entry;
mod error;
mod scanner;
mod store;

pub use act::{ActId, GROUP_SEPARATOR};
pub use entry::FixupEntry;
pub use error::{Result, StoreError};
pub use scanner::RecordScanner;
pub use store::{FixupStore, DEFAULT_FIXUPS_DIR, RECORD_EXTENSION};
