use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnfollowError {
    #[error("Failed to extract archive {path}: {source}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: ArchiveFailure,
    },

    #[error("Failed to read username list {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not open {url} in a browser: {message}")]
    Browser { url: String, message: String },

    #[error("'{username}' is not a valid username")]
    InvalidUsername { username: String },

    #[error("No entry at position {index} (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Underlying cause of an [`UnfollowError::Extraction`].
#[derive(Error, Debug)]
pub enum ArchiveFailure {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for UnfollowError {
    fn user_message(&self) -> String {
        match self {
            UnfollowError::Extraction { path, source } => {
                format!("Could not extract {}: {}", path.display(), source)
            }
            UnfollowError::Parse { path, source } => {
                format!("Could not read {}: {}", path.display(), source)
            }
            UnfollowError::Configuration { message } => {
                format!("Configuration error: {}", message)
            }
            UnfollowError::Browser { url, message } => {
                format!("Could not open {}: {}", url, message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            UnfollowError::Extraction { source: ArchiveFailure::Zip(_), .. } => Some(
                "Make sure the file is the ZIP you downloaded from Instagram (Settings > Your activity > Download your information) and that it is not corrupted.".to_string()
            ),
            UnfollowError::Extraction { source: ArchiveFailure::Io(_), .. } => Some(
                "Check that the archive path exists and that the extraction directory is writable.".to_string()
            ),
            UnfollowError::Parse { .. } => Some(
                "The archive does not have the expected layout. Request the export in HTML format, or point [archive] following_path/followers_path in your config at the right files.".to_string()
            ),
            UnfollowError::Configuration { .. } => Some(
                "Run with --help to see valid option combinations, or regenerate your config with --generate-config.".to_string()
            ),
            UnfollowError::Io(_) => Some(
                "Ensure you have write permission for the results directory.".to_string()
            ),
            _ => None,
        }
    }
}

impl UnfollowError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        UnfollowError::Configuration {
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            UnfollowError::Configuration { .. } => 2,
            UnfollowError::Extraction { .. } => 3,
            UnfollowError::Parse { .. } => 4,
            UnfollowError::Browser { .. } => 5,
            _ => 1,
        }
    }
}

impl From<toml::de::Error> for UnfollowError {
    fn from(error: toml::de::Error) -> Self {
        UnfollowError::Configuration {
            message: error.to_string(),
        }
    }
}

impl From<url::ParseError> for UnfollowError {
    fn from(error: url::ParseError) -> Self {
        UnfollowError::Configuration {
            message: format!("Invalid profile URL: {}", error),
        }
    }
}

pub type Result<T> = std::result::Result<T, UnfollowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = UnfollowError::configuration("bad combination");
        assert!(error.user_message().contains("Configuration error"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let error = UnfollowError::Parse {
            path: PathBuf::from("tmp/following.html"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.user_message().contains("tmp/following.html"));
    }

    #[test]
    fn test_zip_error_suggestion() {
        let error = UnfollowError::Extraction {
            path: PathBuf::from("export.zip"),
            source: ArchiveFailure::Zip(zip::result::ZipError::FileNotFound),
        };
        assert!(error.suggestion().unwrap().contains("ZIP"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(UnfollowError::configuration("x").exit_code(), 2);
        assert_eq!(
            UnfollowError::Parse {
                path: PathBuf::new(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }
            .exit_code(),
            4
        );
        assert_eq!(
            UnfollowError::Io(std::io::Error::from(std::io::ErrorKind::Other)).exit_code(),
            1
        );
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("not = = toml").unwrap_err();
        let error = UnfollowError::from(toml_error);
        assert!(matches!(error, UnfollowError::Configuration { .. }));
    }
}
