//! Pixel-wise residues between two DICOM acquisitions of the same anatomy.
//!
//! Given a directory holding exactly two `.dcm` files, this crate subtracts
//! the second image from the first — once on the raw pixel grids and once on
//! Gaussian-smoothed copies — and writes both residues as 8-bit grayscale
//! JPEGs under a `residues/` subdirectory. The residues highlight what
//! changed between the two acquisitions; images that occupy the same spatial
//! position are rejected as having nothing to compare.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! let outcome = dicom_residue::run(Path::new("scans")).expect("subtraction failed");
//! println!("wrote {}", outcome.unfiltered_path.display());
//! ```
//!
//! # Records and derivations
//!
//! Individual images load as immutable [`ImageRecord`] values; smoothed and
//! rotated variants are derived values over a record, not subclasses of it.
//!
//! ```no_run
//! use dicom_residue::{rotate, smooth, ImageRecord, DEFAULT_SMOOTHING_RADIUS};
//!
//! let record = ImageRecord::load("scans/a.dcm").unwrap();
//! let upside_down = rotate(record.clone(), 180);
//! let smoothed = smooth(record, DEFAULT_SMOOTHING_RADIUS).unwrap();
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod filter;
pub mod geometry;
mod pipeline;
pub mod record;
pub mod rotate;

pub use error::{Error, Result};
pub use filter::{smooth, FilteredImageRecord, DEFAULT_SMOOTHING_RADIUS};
pub use geometry::same_position;
pub use pipeline::{
    is_dicom_file, run, SubtractionOutcome, DICOM_EXTENSION, FILTERED_RESIDUE_FILE, RESIDUES_DIR,
    UNFILTERED_RESIDUE_FILE,
};
pub use record::ImageRecord;
pub use rotate::{rotate, RotatedImageRecord, DEFAULT_ROTATION_DEGREES};
