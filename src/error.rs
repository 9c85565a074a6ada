//! Error types for the dicom-residue crate.

use std::path::PathBuf;

/// Errors that can occur while loading, comparing, and subtracting images.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source file could not be read or decoded as a DICOM image.
    #[error("failed to decode DICOM file {}: {source}", path.display())]
    Decode {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The input directory does not contain exactly two DICOM files.
    #[error("expected exactly two images, found {found}")]
    IncorrectImageCount {
        /// Number of qualifying files found.
        found: usize,
    },

    /// Both images share the same ImagePositionPatient triple.
    #[error("the two images occupy the same spatial position; nothing to compare")]
    IdenticalPosition,

    /// The two pixel grids cannot be subtracted element-wise.
    #[error("pixel grid shape mismatch: {first:?} vs {second:?}")]
    GridShapeMismatch {
        /// Shape of the first grid as (rows, columns).
        first: (usize, usize),
        /// Shape of the second grid as (rows, columns).
        second: (usize, usize),
    },

    /// A pixel grid or smoothing parameter is unusable as filter input.
    #[error("invalid input grid: {0}")]
    InvalidInput(String),

    /// An I/O error occurred while scanning the directory or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error occurred while encoding an output raster.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Wrap a decoder failure for `path` into [`Error::Decode`].
    pub(crate) fn decode(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Decode {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let count = Error::IncorrectImageCount { found: 3 };
        assert_eq!(count.to_string(), "expected exactly two images, found 3");

        let position = Error::IdenticalPosition;
        assert!(position.to_string().contains("same spatial position"));

        let shape = Error::GridShapeMismatch {
            first: (512, 512),
            second: (256, 256),
        };
        let msg = shape.to_string();
        assert!(msg.contains("(512, 512)"));
        assert!(msg.contains("(256, 256)"));

        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io_err.to_string().contains("gone"));
    }

    #[test]
    fn decode_error_names_the_file() {
        let err = Error::decode("scans/a.dcm", "not a DICOM stream");
        let msg = err.to_string();
        assert!(msg.contains("a.dcm"));
        assert!(msg.contains("not a DICOM stream"));
    }
}
