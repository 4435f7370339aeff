use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read competitors file {path}: {source}")]
    CompetitorsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse competitors file {path}: {reason}")]
    CompetitorsFileParse { path: String, reason: String },

    #[error("validation error: {0}")]
    Validation(String),
}
