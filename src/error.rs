use thiserror::Error;

/// Unified error type for release-tagger operations
#[derive(Error, Debug)]
pub enum ReleaseTagError {
    #[error("Expected the following environment variable to be set: {0}")]
    Configuration(String),

    #[error("Repository operation failed: {0}")]
    Repository(String),

    #[error("Merge request lookup failed: {0}")]
    Resolver(String),

    #[error("Unrecognized repository URL: {0}")]
    UrlFormat(String),

    #[error("Publishing tag failed: {0}")]
    Publish(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Config file error: {0}")]
    ConfigFile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-tagger
pub type Result<T> = std::result::Result<T, ReleaseTagError>;

impl ReleaseTagError {
    /// Missing environment variable, named by key
    pub fn configuration(key: impl Into<String>) -> Self {
        ReleaseTagError::Configuration(key.into())
    }

    pub fn repository(msg: impl Into<String>) -> Self {
        ReleaseTagError::Repository(msg.into())
    }

    pub fn resolver(msg: impl Into<String>) -> Self {
        ReleaseTagError::Resolver(msg.into())
    }

    pub fn url_format(msg: impl Into<String>) -> Self {
        ReleaseTagError::UrlFormat(msg.into())
    }

    pub fn publish(msg: impl Into<String>) -> Self {
        ReleaseTagError::Publish(msg.into())
    }

    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseTagError::Version(msg.into())
    }

    pub fn config_file(msg: impl Into<String>) -> Self {
        ReleaseTagError::ConfigFile(msg.into())
    }
}

impl From<semver::Error> for ReleaseTagError {
    fn from(err: semver::Error) -> Self {
        ReleaseTagError::Version(err.to_string())
    }
}
