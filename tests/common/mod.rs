//! Synthetic DICOM fixtures for the integration tests.

use std::path::Path;

use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::dictionary_std::tags;
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};

/// Secondary Capture Image Storage.
const SOP_CLASS_UID: &str = "1.2.840.10008.5.1.4.1.1.7";

/// Explicit VR Little Endian.
const TRANSFER_SYNTAX: &str = "1.2.840.10008.1.2.1";

/// Write a minimal single-frame 16-bit MONOCHROME2 DICOM file.
///
/// `pixels` is row-major and must hold exactly `rows * columns` samples;
/// `instance` keeps SOP Instance UIDs unique within a test directory.
pub fn write_dicom(
    path: &Path,
    rows: u16,
    columns: u16,
    pixels: &[u16],
    position: [f64; 3],
    instance: u32,
) {
    assert_eq!(pixels.len(), usize::from(rows) * usize::from(columns));

    let sop_instance_uid = format!("1.2.826.0.1.3680043.2.1125.{instance}");
    let position_strings: Vec<String> = position.iter().map(ToString::to_string).collect();

    let mut obj = InMemDicomObject::new_empty();
    obj.put(DataElement::new(
        tags::SOP_CLASS_UID,
        VR::UI,
        PrimitiveValue::from(SOP_CLASS_UID),
    ));
    obj.put(DataElement::new(
        tags::SOP_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from(sop_instance_uid.as_str()),
    ));
    obj.put(DataElement::new(
        tags::MODALITY,
        VR::CS,
        PrimitiveValue::from("OT"),
    ));
    obj.put(DataElement::new(
        tags::IMAGE_POSITION_PATIENT,
        VR::DS,
        PrimitiveValue::Strs(position_strings.into()),
    ));
    obj.put(DataElement::new(
        tags::PHOTOMETRIC_INTERPRETATION,
        VR::CS,
        PrimitiveValue::from("MONOCHROME2"),
    ));
    obj.put(DataElement::new(
        tags::SAMPLES_PER_PIXEL,
        VR::US,
        PrimitiveValue::from(1_u16),
    ));
    obj.put(DataElement::new(
        tags::ROWS,
        VR::US,
        PrimitiveValue::from(rows),
    ));
    obj.put(DataElement::new(
        tags::COLUMNS,
        VR::US,
        PrimitiveValue::from(columns),
    ));
    obj.put(DataElement::new(
        tags::BITS_ALLOCATED,
        VR::US,
        PrimitiveValue::from(16_u16),
    ));
    obj.put(DataElement::new(
        tags::BITS_STORED,
        VR::US,
        PrimitiveValue::from(16_u16),
    ));
    obj.put(DataElement::new(
        tags::HIGH_BIT,
        VR::US,
        PrimitiveValue::from(15_u16),
    ));
    obj.put(DataElement::new(
        tags::PIXEL_REPRESENTATION,
        VR::US,
        PrimitiveValue::from(0_u16),
    ));
    obj.put(DataElement::new(
        tags::PIXEL_DATA,
        VR::OW,
        PrimitiveValue::U16(pixels.to_vec().into()),
    ));

    let file_obj = obj
        .with_meta(
            FileMetaTableBuilder::new()
                .media_storage_sop_class_uid(SOP_CLASS_UID)
                .media_storage_sop_instance_uid(sop_instance_uid)
                .transfer_syntax(TRANSFER_SYNTAX),
        )
        .expect("failed to build file meta table");
    file_obj
        .write_to_file(path)
        .expect("failed to write DICOM fixture");
}

/// Write a fixture whose every sample is `value`.
pub fn write_flat_dicom(path: &Path, side: u16, value: u16, position: [f64; 3], instance: u32) {
    let pixels = vec![value; usize::from(side) * usize::from(side)];
    write_dicom(path, side, side, &pixels, position, instance);
}
