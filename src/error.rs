use thiserror::Error;

/// Main error type for the clip-sampler library
#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("Video source error: {0}")]
    Source(#[from] SourceError),

    #[error("Stream resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Clip extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Errors from the external video source (channel/playlist enumeration)
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("channel or playlist not found: {target}")]
    NotFound { target: String },

    #[error("failed to list videos: {reason}")]
    ListFailed { reason: String },

    #[error("{tool} is not installed or not in PATH")]
    ToolMissing { tool: &'static str },
}

/// Per-video errors from the external stream resolver
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("stream lookup failed for {video_id}: {reason}")]
    Failed { video_id: String, reason: String },

    #[error("no stream candidate satisfies the quality policy for {video_id}")]
    NoEligibleStream { video_id: String },
}

/// Errors from the external clip extraction step
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("ffmpeg exited with status {exit_code:?}: {detail}")]
    Failed {
        exit_code: Option<i32>,
        detail: String,
    },

    #[error("failed to launch ffmpeg: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("ffmpeg is not installed or not in PATH")]
    ToolMissing,

    #[error("extraction cancelled")]
    Cancelled,
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using SamplerError
pub type Result<T> = std::result::Result<T, SamplerError>;

impl SamplerError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check whether this error aborts the whole batch.
    ///
    /// Everything else is caught at the item boundary by the pipeline driver
    /// and turned into a skip.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Source(_) => true,
            Self::Config(_) => true,
            Self::Io(_) => true,
            Self::Extract(ExtractError::ToolMissing | ExtractError::Cancelled) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Source(SourceError::NotFound { target }) => {
                format!("Channel or playlist '{}' not found.", target)
            }
            Self::Source(SourceError::ToolMissing { tool }) => {
                format!(
                    "'{}' was not found on this system. Please install it and make sure it is in PATH.",
                    tool
                )
            }
            Self::Extract(ExtractError::ToolMissing) => {
                "'ffmpeg' was not found on this system. Please install it and make sure it is in PATH."
                    .to_string()
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_fatal() {
        let err = SamplerError::from(SourceError::NotFound {
            target: "nochannel".to_string(),
        });
        assert!(err.is_fatal());
        assert!(err.user_message().contains("nochannel"));
    }

    #[test]
    fn test_per_item_errors_are_not_fatal() {
        let resolve = SamplerError::from(ResolveError::Failed {
            video_id: "abc".to_string(),
            reason: "timeout".to_string(),
        });
        assert!(!resolve.is_fatal());

        let extract = SamplerError::from(ExtractError::Failed {
            exit_code: Some(1),
            detail: String::new(),
        });
        assert!(!extract.is_fatal());
    }

    #[test]
    fn test_cancellation_stops_the_batch() {
        assert!(SamplerError::from(ExtractError::Cancelled).is_fatal());
    }
}
