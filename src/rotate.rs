//! Quarter-turn rotation of image records.

use ndarray::{Array2, Axis};

use crate::record::ImageRecord;

/// Default rotation angle in degrees.
pub const DEFAULT_ROTATION_DEGREES: i32 = 180;

/// An [`ImageRecord`] paired with a rotated copy of its pixel grid.
///
/// For 90 and 270 degree rotations the rotated grid swaps the source
/// dimensions; callers must not assume shape preservation.
#[derive(Debug, Clone)]
pub struct RotatedImageRecord {
    record: ImageRecord,
    angle_degrees: i32,
    rotated_grid: Array2<u16>,
}

impl RotatedImageRecord {
    /// The underlying unrotated record.
    #[must_use]
    pub fn record(&self) -> &ImageRecord {
        &self.record
    }

    /// The rotation angle in degrees.
    #[must_use]
    pub fn angle_degrees(&self) -> i32 {
        self.angle_degrees
    }

    /// The rotated pixel grid.
    #[must_use]
    pub fn rotated_grid(&self) -> &Array2<u16> {
        &self.rotated_grid
    }
}

/// Derive a rotated record from `record`.
///
/// The angle is counterclockwise and reduced modulo 360; negative angles
/// rotate clockwise.
///
/// # Panics
///
/// Panics if `angle_degrees` is not a multiple of 90. An off-grid angle is a
/// configuration mistake, not a runtime data problem, and aborts immediately.
#[must_use]
pub fn rotate(record: ImageRecord, angle_degrees: i32) -> RotatedImageRecord {
    assert!(
        angle_degrees % 90 == 0,
        "rotation angle must be a multiple of 90 degrees, got {angle_degrees}"
    );

    let quarter_turns = (angle_degrees / 90).rem_euclid(4);
    let rotated_grid = rot90(record.pixel_grid(), quarter_turns);

    RotatedImageRecord {
        record,
        angle_degrees,
        rotated_grid,
    }
}

/// Rotate `grid` counterclockwise by `quarter_turns` quarter turns (0..=3).
fn rot90(grid: &Array2<u16>, quarter_turns: i32) -> Array2<u16> {
    match quarter_turns {
        0 => grid.to_owned(),
        1 => {
            let mut out = grid.t().to_owned();
            out.invert_axis(Axis(0));
            out
        }
        2 => {
            let mut out = grid.to_owned();
            out.invert_axis(Axis(0));
            out.invert_axis(Axis(1));
            out
        }
        3 => {
            let mut out = grid.t().to_owned();
            out.invert_axis(Axis(1));
            out
        }
        _ => unreachable!("quarter turns are reduced modulo 4"),
    }
}
