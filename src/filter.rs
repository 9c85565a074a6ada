//! Gaussian smoothing of image records.
//!
//! Separable smoothing: a normalized 1-D Gaussian kernel is convolved along
//! each axis in turn, with half-sample symmetric reflection at the borders
//! (`d c b a | a b c d | d c b a`). The kernel is truncated at four standard
//! deviations.

use log::debug;
use ndarray::{Array2, Axis};

use crate::error::{Error, Result};
use crate::record::ImageRecord;

/// Default smoothing radius (Gaussian standard deviation) in pixels.
pub const DEFAULT_SMOOTHING_RADIUS: f64 = 3.0;

/// Kernel truncation, in standard deviations.
const TRUNCATE: f64 = 4.0;

/// An [`ImageRecord`] paired with a Gaussian-smoothed copy of its pixel grid.
///
/// The smoothed grid is derived once at construction and never recomputed.
#[derive(Debug, Clone)]
pub struct FilteredImageRecord {
    record: ImageRecord,
    smoothing_radius: f64,
    filtered_grid: Array2<f64>,
}

impl FilteredImageRecord {
    /// The underlying unsmoothed record.
    #[must_use]
    pub fn record(&self) -> &ImageRecord {
        &self.record
    }

    /// The standard deviation the grid was smoothed with.
    #[must_use]
    pub fn smoothing_radius(&self) -> f64 {
        self.smoothing_radius
    }

    /// The smoothed pixel grid, same shape as the source grid.
    #[must_use]
    pub fn filtered_grid(&self) -> &Array2<f64> {
        &self.filtered_grid
    }
}

/// Derive a smoothed record from `record`.
///
/// Smoothing is deterministic: the same record and radius always produce the
/// same grid.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the pixel grid is empty or `radius` is
/// not a positive finite number.
pub fn smooth(record: ImageRecord, radius: f64) -> Result<FilteredImageRecord> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "smoothing radius must be a positive finite number, got {radius}"
        )));
    }
    if record.pixel_grid().is_empty() {
        return Err(Error::InvalidInput("empty pixel grid".into()));
    }

    debug!(
        "smoothing {} with sigma {radius}",
        record.source_path().display()
    );
    let grid = record.pixel_grid().mapv(f64::from);
    let filtered_grid = gaussian_smooth(&grid, radius);

    Ok(FilteredImageRecord {
        record,
        smoothing_radius: radius,
        filtered_grid,
    })
}

/// Smooth a grid with a separable Gaussian of standard deviation `sigma`.
pub(crate) fn gaussian_smooth(grid: &Array2<f64>, sigma: f64) -> Array2<f64> {
    let kernel = gaussian_kernel(sigma);
    let pass = convolve_axis(grid, &kernel, Axis(0));
    convolve_axis(&pass, &kernel, Axis(1))
}

/// Normalized Gaussian weights over `[-radius, radius]` with
/// `radius = int(4 * sigma + 0.5)`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    #[allow(clippy::cast_possible_truncation)]
    let radius = (TRUNCATE * sigma + 0.5) as i64;
    #[allow(clippy::cast_precision_loss)]
    let mut kernel: Vec<f64> = (-radius..=radius)
        .map(|offset| {
            let x = offset as f64 / sigma;
            (-0.5 * x * x).exp()
        })
        .collect();

    let sum: f64 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= sum;
    }
    kernel
}

/// Convolve every lane of `grid` along `axis` with `kernel`, reflecting at
/// the borders.
fn convolve_axis(grid: &Array2<f64>, kernel: &[f64], axis: Axis) -> Array2<f64> {
    #[allow(clippy::cast_possible_wrap)]
    let len = grid.len_of(axis) as isize;
    #[allow(clippy::cast_possible_wrap)]
    let radius = (kernel.len() / 2) as isize;

    let mut out = Array2::<f64>::zeros(grid.raw_dim());
    for (lane_in, mut lane_out) in grid.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        for i in 0..len {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                #[allow(clippy::cast_possible_wrap)]
                let j = i - radius + k as isize;
                acc += weight * lane_in[reflect(j, len)];
            }
            #[allow(clippy::cast_sign_loss)]
            {
                lane_out[i as usize] = acc;
            }
        }
    }
    out
}

/// Map an out-of-range index into `[0, len)` by half-sample reflection.
fn reflect(index: isize, len: isize) -> usize {
    let period = 2 * len;
    let mut i = index.rem_euclid(period);
    if i >= len {
        i = period - 1 - i;
    }
    #[allow(clippy::cast_sign_loss)]
    {
        i as usize
    }
}
