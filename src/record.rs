//! Decoded DICOM image records.

use std::path::{Path, PathBuf};

use dicom::dictionary_std::tags;
use dicom::object::{open_file, DefaultDicomObject};
use dicom::pixeldata::PixelDecoder;
use log::debug;
use ndarray::Array2;

use crate::error::{Error, Result};

/// A single decoded DICOM image: raw pixel grid plus spatial position.
///
/// The grid holds the native unsigned samples (rows x columns); the position
/// is the ImagePositionPatient triple, the image origin in the patient
/// reference frame. Records are immutable once constructed; derived views are
/// produced by [`crate::smooth`] and [`crate::rotate`].
#[derive(Debug, Clone)]
pub struct ImageRecord {
    source_path: PathBuf,
    pixel_grid: Array2<u16>,
    position: [f64; 3],
}

impl ImageRecord {
    /// Load and decode a single DICOM file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the file is unreadable, is not valid
    /// DICOM, its pixel data cannot be decoded into a rows x columns grid, or
    /// it lacks a three-component ImagePositionPatient.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let obj = open_file(path).map_err(|e| Error::decode(path, e))?;

        let decoded = obj
            .decode_pixel_data()
            .map_err(|e| Error::decode(path, e))?;
        let rows = decoded.rows() as usize;
        let columns = decoded.columns() as usize;
        let samples = decoded
            .to_vec::<u16>()
            .map_err(|e| Error::decode(path, e))?;

        // A sample count that is not rows x columns (e.g. multi-frame files)
        // surfaces here as a shape error.
        let pixel_grid = Array2::from_shape_vec((rows, columns), samples)
            .map_err(|e| Error::decode(path, e))?;

        let position = read_position(&obj).ok_or_else(|| {
            Error::decode(path, "missing or malformed ImagePositionPatient")
        })?;

        debug!(
            "loaded {} ({rows}x{columns}, position {position:?})",
            path.display()
        );

        Ok(Self {
            source_path: path.to_path_buf(),
            pixel_grid,
            position,
        })
    }

    /// Path the record was loaded from.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The raw pixel grid, rows x columns.
    #[must_use]
    pub fn pixel_grid(&self) -> &Array2<u16> {
        &self.pixel_grid
    }

    /// The ImagePositionPatient triple.
    #[must_use]
    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    /// Grid shape as (rows, columns).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.pixel_grid.dim()
    }

    /// Assemble a record from already-decoded parts.
    #[cfg(test)]
    pub(crate) fn from_parts(
        source_path: PathBuf,
        pixel_grid: Array2<u16>,
        position: [f64; 3],
    ) -> Self {
        Self {
            source_path,
            pixel_grid,
            position,
        }
    }
}

/// Read the ImagePositionPatient triple, if present and well-formed.
fn read_position(obj: &DefaultDicomObject) -> Option<[f64; 3]> {
    let values = obj
        .element(tags::IMAGE_POSITION_PATIENT)
        .ok()?
        .to_multi_float64()
        .ok()?;
    if values.len() == 3 {
        Some([values[0], values[1], values[2]])
    } else {
        None
    }
}
