use thiserror::Error;

/// Failures at the storage collaborator boundary.
///
/// The engine propagates these unchanged; retry policy belongs to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("no jobs found for company {0}")]
    CompanyNotFound(String),

    #[error("no snapshot stored for {0}")]
    SnapshotNotFound(String),

    #[error("valuation {0} not found")]
    ValuationNotFound(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid scoring configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to read configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
