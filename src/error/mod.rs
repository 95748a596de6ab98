mod codes;

pub use codes::ExitCode;

use crate::config::ConfigError;
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the run before or outside of per-file processing.
///
/// Per-file problems (unclassifiable names, collisions, failed renames) are
/// part of the run report, not errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Target directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::GeneralError
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a series folder or a folder containing series.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check folder permissions.",
                    path.display()
                )
            }

            AppError::ConfigError { message } => {
                format!(
                    "Invalid configuration: {}\n\n\
                     Check EP2JELLYFIN_EXTRA_MEDIA_EXTS and EP2JELLYFIN_EXTRA_SUBTITLE_EXTS \
                     in your environment or .env file.",
                    message
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::ConfigError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = AppError::DirectoryNotFound {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::GeneralError);

        let err = AppError::Other("boom".to_string());
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }

    #[test]
    fn test_detailed_message_includes_path() {
        let err = AppError::NotADirectory {
            path: PathBuf::from("/media/file.mkv"),
        };

        let msg = err.detailed_message();
        assert!(msg.contains("/media/file.mkv"));
        assert!(msg.contains("not a directory"));
    }

    #[test]
    fn test_scanner_error_conversion() {
        let scanner_err = ScannerError::PathNotFound(PathBuf::from("/missing"));
        let app_err: AppError = scanner_err.into();
        assert!(matches!(app_err, AppError::DirectoryNotFound { .. }));
        assert!(app_err.detailed_message().contains("does not exist"));
    }

    #[test]
    fn test_config_error_conversion() {
        let app_err: AppError = ConfigError::OverlappingExtension(".srt".to_string()).into();
        let msg = app_err.detailed_message();
        assert!(msg.contains(".srt"));
        assert!(msg.contains("EP2JELLYFIN_EXTRA_MEDIA_EXTS"));
    }
}
