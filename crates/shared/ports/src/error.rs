use thiserror::Error;

/// Failures of the token store.
///
/// `Unavailable` and `Io` are transient (worth retrying); `Conflict` means
/// the batch itself is bad and a retry would fail the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store I/O failure: {0}")]
    Io(String),

    #[error("batch conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Io(_))
    }
}

/// Failures of a single price lookup against the external oracle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("oracle network failure: {0}")]
    Network(String),

    #[error("oracle request timed out after {0}ms")]
    Timeout(u64),

    #[error("oracle returned invalid data: {0}")]
    InvalidData(String),

    #[error("token {0} is not listed by the oracle")]
    NotListed(String),
}

/// Failures delivering an event batch to the bus.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("event transport failure: {0}")]
    Transport(String),

    #[error("event bus is closed")]
    Closed,
}

impl PublishError {
    pub fn is_transient(&self) -> bool {
        matches!(self, PublishError::Transport(_))
    }
}
