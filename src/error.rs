use thiserror::Error;

/// Failures while mounting the app into the page.
#[derive(Error, Debug)]
pub enum BootError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("mount element #{id} not found")]
    MissingMount { id: String },
}

/// Problems with the inline config block. The app falls back to defaults.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be greater than zero")]
    InvalidInterval { field: &'static str },

    #[error("unknown log level '{level}'")]
    UnknownLogLevel { level: String },

    #[error("at least one increment key is required")]
    NoIncrementKeys,
}
