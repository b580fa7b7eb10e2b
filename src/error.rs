use std::path::PathBuf;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the application
///
/// Extraction itself never fails; these cover the surfaces around it
/// (snapshot loading, rendering, serialization).
#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    SnapshotError { file: PathBuf, message: String },
    UnsupportedSnapshot(PathBuf),
    RenderError(String),
    SerializationError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::SnapshotError { file, message } => {
                write!(f, "Invalid registry snapshot {}: {}", file.display(), message)
            }
            Error::UnsupportedSnapshot(file) => write!(
                f,
                "Unsupported snapshot format {} (expected .json, .yaml or .yml)",
                file.display()
            ),
            Error::RenderError(msg) => write!(f, "Render error: {}", msg),
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializationError(format!("YAML error: {}", err))
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::RenderError(err.to_string())
    }
}
