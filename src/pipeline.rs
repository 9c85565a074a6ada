//! Directory-to-residues subtraction pipeline.
//!
//! The pipeline is a straight-line sequence: scan the directory, load two
//! records, check their geometry, subtract the raw and smoothed grids,
//! normalize, and write both residues. The first failing step short-circuits;
//! nothing is written until both residues are fully computed.

use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{GrayImage, Luma};
use log::{debug, info};
use ndarray::Array2;

use crate::error::{Error, Result};
use crate::filter::{smooth, DEFAULT_SMOOTHING_RADIUS};
use crate::geometry::same_position;
use crate::record::ImageRecord;

/// File extension selecting qualifying input files.
pub const DICOM_EXTENSION: &str = "dcm";

/// Name of the output subdirectory created under the input directory.
pub const RESIDUES_DIR: &str = "residues";

/// Output file name for the unsmoothed residue.
pub const UNFILTERED_RESIDUE_FILE: &str = "unfiltered_residue.jpg";

/// Output file name for the smoothed residue.
pub const FILTERED_RESIDUE_FILE: &str = "filtered_residue.jpg";

/// JPEG quality for the output rasters.
const JPEG_QUALITY: u8 = 100;

/// Fixed 16-bit to 8-bit rescale factor.
const RESCALE: f64 = 255.0 / 65535.0;

/// Paths and dimensions of a completed subtraction run.
#[derive(Debug)]
pub struct SubtractionOutcome {
    /// Path of the written unsmoothed residue.
    pub unfiltered_path: PathBuf,
    /// Path of the written smoothed residue.
    pub filtered_path: PathBuf,
    /// Output pixel dimensions as (rows, columns).
    pub dimensions: (usize, usize),
}

/// Run the full subtraction pipeline over `directory`.
///
/// Scans `directory` for exactly two `.dcm` files (sorted by file name, so
/// the pairing of first and second image is stable across platforms), checks
/// that they occupy distinct spatial positions and share a grid shape, then
/// subtracts the second image from the first — once on the raw grids and once
/// on Gaussian-smoothed copies. Both residues are rescaled to 8 bits and
/// written as grayscale JPEGs under `directory/residues/`.
///
/// # Errors
///
/// - [`Error::IncorrectImageCount`] if the directory does not hold exactly
///   two qualifying files.
/// - [`Error::Decode`] if either file cannot be decoded.
/// - [`Error::IdenticalPosition`] if both images share a position triple.
/// - [`Error::GridShapeMismatch`] if the pixel grids differ in shape.
/// - [`Error::Io`] / [`Error::Image`] on directory or output failures.
pub fn run(directory: &Path) -> Result<SubtractionOutcome> {
    let inputs = scan_directory(directory)?;
    let [first, second] = match <[PathBuf; 2]>::try_from(inputs) {
        Ok(pair) => pair,
        Err(found) => {
            return Err(Error::IncorrectImageCount {
                found: found.len(),
            })
        }
    };
    info!(
        "subtracting {} - {}",
        first.display(),
        second.display()
    );

    let record1 = ImageRecord::load(&first)?;
    let record2 = ImageRecord::load(&second)?;

    if same_position(&record1, &record2) {
        return Err(Error::IdenticalPosition);
    }
    if record1.shape() != record2.shape() {
        return Err(Error::GridShapeMismatch {
            first: record1.shape(),
            second: record2.shape(),
        });
    }
    let dimensions = record1.shape();

    // Signed wide intermediate: raw residues may be negative, and 16-bit
    // unsigned arithmetic would wrap before normalization gets to clamp.
    let unfiltered: Array2<i32> =
        record1.pixel_grid().mapv(i32::from) - record2.pixel_grid().mapv(i32::from);

    let filtered1 = smooth(record1, DEFAULT_SMOOTHING_RADIUS)?;
    let filtered2 = smooth(record2, DEFAULT_SMOOTHING_RADIUS)?;
    let filtered = filtered1.filtered_grid() - filtered2.filtered_grid();

    let residues_dir = directory.join(RESIDUES_DIR);
    if !residues_dir.exists() {
        fs::create_dir_all(&residues_dir)?;
    }

    let unfiltered_path = residues_dir.join(UNFILTERED_RESIDUE_FILE);
    let filtered_path = residues_dir.join(FILTERED_RESIDUE_FILE);
    write_grayscale_jpeg(&normalize_to_gray(&unfiltered.mapv(f64::from)), &unfiltered_path)?;
    write_grayscale_jpeg(&normalize_to_gray(&filtered), &filtered_path)?;
    info!("wrote residues under {}", residues_dir.display());

    Ok(SubtractionOutcome {
        unfiltered_path,
        filtered_path,
        dimensions,
    })
}

/// List the qualifying DICOM files in `directory`, sorted by file name.
fn scan_directory(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs: Vec<PathBuf> = fs::read_dir(directory)?
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| is_dicom_file(p))
        .collect();

    // Directory listing order is platform-dependent; sort so the pairing of
    // first and second image is stable.
    inputs.sort();
    debug!("found {} candidate file(s)", inputs.len());
    Ok(inputs)
}

/// Check whether a path carries the DICOM file extension.
#[must_use]
pub fn is_dicom_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DICOM_EXTENSION))
}

/// Map one raw residue sample to its 8-bit output value.
///
/// Fixed linear rescale, not a min/max stretch: negative samples clamp to
/// black, so the sign of the raw subtraction is not visible in the output.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn normalize_sample(value: f64) -> u8 {
    (value * RESCALE).round().clamp(0.0, 255.0) as u8
}

/// Normalize a residue grid into an 8-bit grayscale raster.
#[allow(clippy::cast_possible_truncation)]
fn normalize_to_gray(residue: &Array2<f64>) -> GrayImage {
    let (rows, columns) = residue.dim();
    GrayImage::from_fn(columns as u32, rows as u32, |x, y| {
        Luma([normalize_sample(residue[(y as usize, x as usize)])])
    })
}

/// Encode a grayscale raster as JPEG at fixed quality.
fn write_grayscale_jpeg(raster: &GrayImage, path: &Path) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut encoder = JpegEncoder::new_with_quality(file, JPEG_QUALITY);
    encoder.encode_image(raster)?;
    Ok(())
}
