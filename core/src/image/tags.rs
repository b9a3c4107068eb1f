use dicom_core::Tag;
use dicom_object::InMemDicomObject;

pub use dicom_dictionary_std::tags::{
    COLUMNS, MODALITY, NUMBER_OF_FRAMES, PHOTOMETRIC_INTERPRETATION, ROWS,
};

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Helper to get integer value from DICOM tag
pub fn get_int_value(dcm: &InMemDicomObject, tag: Tag) -> Option<i32> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<i32>().ok())
}

/// Helper to get u16 value from DICOM tag
pub fn get_u16_value(dcm: &InMemDicomObject, tag: Tag) -> Option<u16> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<u16>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::{DataElement, PrimitiveValue, VR};

    #[test]
    fn test_tag_values() {
        assert_eq!(MODALITY, Tag(0x0008, 0x0060));
        assert_eq!(NUMBER_OF_FRAMES, Tag(0x0028, 0x0008));
        assert_eq!(ROWS, Tag(0x0028, 0x0010));
        assert_eq!(COLUMNS, Tag(0x0028, 0x0011));
    }

    #[test]
    fn test_get_values() {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("US ")));
        dcm.put(DataElement::new(ROWS, VR::US, PrimitiveValue::from(480_u16)));
        dcm.put(DataElement::new(NUMBER_OF_FRAMES, VR::IS, PrimitiveValue::from("12")));

        assert_eq!(get_string_value(&dcm, MODALITY), Some("US".to_string()));
        assert_eq!(get_u16_value(&dcm, ROWS), Some(480));
        assert_eq!(get_int_value(&dcm, NUMBER_OF_FRAMES), Some(12));
        assert_eq!(get_u16_value(&dcm, COLUMNS), None);
    }

    #[test]
    fn test_blank_string_is_none() {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("  ")));
        assert_eq!(get_string_value(&dcm, MODALITY), None);
    }
}
