use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("file not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    #[error("no tools found in {} (has the card markup changed?)", .0.display())]
    EmptyExtraction(PathBuf),

    #[error("anchor not found: {0}")]
    AnchorNotFound(&'static str),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("unknown rule set: {0} (expected 'standard' or 'audit')")]
    UnknownRules(String),
}
