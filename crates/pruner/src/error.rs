use fixup_store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PruneError>;

#[derive(Error, Debug)]
pub enum PruneError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Failed to launch verifier '{program}': {source}")]
    VerifierLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Baseline verifier run for '{act}' did not succeed ({status})")]
    BaselineFailed { act: String, status: String },

    #[error("{0}")]
    Other(String),
}
