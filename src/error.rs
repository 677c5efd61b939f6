use std::fmt;
use std::path::PathBuf;

/// Failures while turning a generated file into bytes on disk.
///
/// Generation itself does not fail; only rendering and writing can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The output template failed to render
    Render {
        /// Output filename being rendered
        filename: String,
        message: String,
    },
    /// The rendered output could not be written
    Write {
        /// Destination path
        path: PathBuf,
        message: String,
    },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Render { filename, message } => {
                write!(f, "failed to render {filename}: {message}")
            }
            GenerateError::Write { path, message } => {
                write!(f, "failed to write {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for GenerateError {}
