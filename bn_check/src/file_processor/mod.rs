//! Opening test vector files for scanning

use crate::config::compile_time::scanner::READ_BUFFER_CAPACITY;
use crate::diagnostics::{codes, Code};
use log::debug;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("I/O error opening {path}: {message}")]
    Io { path: String, message: String },
}

impl FileProcessorError {
    fn from_io(path: &Path, error: &io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io {
                path,
                message: error.to_string(),
            },
        }
    }

    pub fn error_code(&self) -> Code {
        codes::file::OPEN_FAILURE
    }

    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path } | Self::PermissionDenied { path } | Self::Io { path, .. } => {
                path
            }
        }
    }

    /// Short cause without the path, for diagnostics that name the path themselves
    pub fn reason(&self) -> &str {
        match self {
            Self::NotFound { .. } => "no such file",
            Self::PermissionDenied { .. } => "permission denied",
            Self::Io { message, .. } => message,
        }
    }
}

/// Open `path` for scanning with the configured read buffer
pub fn open_test_file(path: impl AsRef<Path>) -> Result<BufReader<File>, FileProcessorError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FileProcessorError::from_io(path, &e))?;

    // Directories open fine on unix but fail on the first read
    let metadata = file
        .metadata()
        .map_err(|e| FileProcessorError::from_io(path, &e))?;
    if metadata.is_dir() {
        return Err(FileProcessorError::Io {
            path: path.display().to_string(),
            message: "is a directory".to_string(),
        });
    }

    debug!("Opened {} ({} bytes)", path.display(), metadata.len());
    Ok(BufReader::with_capacity(READ_BUFFER_CAPACITY, file))
}
