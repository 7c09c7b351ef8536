//! Error types.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::recolor::XmlError;
use crate::render::RenderError;

/// Exit status for a missing or non-SVG input (`EX_NOINPUT`).
pub const EXIT_INPUT_NOT_FOUND: i32 = 66;

/// Exit status for an SVG that could not be parsed or rendered (`EX_DATAERR`).
pub const EXIT_MALFORMED_INPUT: i32 = 65;

/// Exit status for a failed read, write or directory creation (`EX_IOERR`).
pub const EXIT_FILESYSTEM: i32 = 74;

/// The broad class of a [`ConvertError`].
///
/// Each class maps to its own process exit status, so that scripts can tell
/// a user mistake apart from a broken file or a broken filesystem.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No eligible SVG input: wrong extension or no SVGs in the directory.
    InputNotFound,

    /// The output directory could not be created, or a file could not be
    /// read, written or moved.
    Filesystem,

    /// The input passed the extension check but is not a usable SVG.
    MalformedInput,
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::InputNotFound => EXIT_INPUT_NOT_FOUND,
            ErrorKind::Filesystem => EXIT_FILESYSTEM,
            ErrorKind::MalformedInput => EXIT_MALFORMED_INPUT,
        }
    }
}

/// Everything that can go wrong while converting.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File is not an SVG: {}", .0.display())]
    NotAnSvg(PathBuf),

    #[error("Directory does not contain SVGs: {}", .0.display())]
    NoSvgs(PathBuf),

    #[error("{action} {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error parsing SVG {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: XmlError,
    },

    #[error("Error rendering SVG {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::NotAnSvg(_) | ConvertError::NoSvgs(_) => ErrorKind::InputNotFound,
            ConvertError::Filesystem { .. } => ErrorKind::Filesystem,
            ConvertError::Xml { .. } | ConvertError::Render { .. } => ErrorKind::MalformedInput,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

/// Attaches a path and a short description of the failed action to
/// `io::Error`s.
pub trait IoResultExt<T> {
    fn with_path(self, action: &'static str, path: &Path) -> Result<T, ConvertError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn with_path(self, action: &'static str, path: &Path) -> Result<T, ConvertError> {
        self.map_err(|source| ConvertError::Filesystem {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_its_own_exit_code() {
        let codes = [
            ErrorKind::InputNotFound.exit_code(),
            ErrorKind::Filesystem.exit_code(),
            ErrorKind::MalformedInput.exit_code(),
        ];

        assert!(codes.iter().all(|&c| c != 0 && c != 1 && c != 2));
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }

    #[test]
    fn io_errors_carry_the_path() {
        let err = Err::<(), _>(io::Error::new(io::ErrorKind::NotFound, "gone"))
            .with_path("Error reading file", Path::new("/tmp/a.svg"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Filesystem);
        assert_eq!(err.to_string(), "Error reading file /tmp/a.svg: gone");
    }

    #[test]
    fn missing_inputs_are_input_not_found() {
        assert_eq!(
            ConvertError::NotAnSvg(PathBuf::from("a.png")).kind(),
            ErrorKind::InputNotFound
        );
        assert_eq!(
            ConvertError::NoSvgs(PathBuf::from("/tmp")).exit_code(),
            EXIT_INPUT_NOT_FOUND
        );
    }
}
