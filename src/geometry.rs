//! Spatial position comparison between image records.

use crate::record::ImageRecord;

/// Check whether two records occupy the same spatial position.
///
/// True iff the ImagePositionPatient triples are element-wise equal. The
/// comparison is exact: acquisitions at different table offsets differ by
/// whole millimetres, so no tolerance is applied.
#[must_use]
pub fn same_position(a: &ImageRecord, b: &ImageRecord) -> bool {
    a.position() == b.position()
}
