//! Smallest JPEG kamadak-exif accepts: SOI, one APP1 Exif segment with a
//! FocalLength rational in the Exif IFD, then EOI

/// Little-endian JPEG whose Exif IFD holds one FocalLength rational
pub fn jpeg_with_focal_length(numerator: u32, denominator: u32) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());

    // IFD0 at 8: ExifIFDPointer -> 26
    push_ifd(&mut tiff, 0x8769, 4, 26);
    // Exif IFD at 26: FocalLength RATIONAL -> 44
    push_ifd(&mut tiff, 0x920A, 5, 44);

    tiff.extend_from_slice(&numerator.to_le_bytes());
    tiff.extend_from_slice(&denominator.to_le_bytes());

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// Single-entry IFD with no next IFD
fn push_ifd(tiff: &mut Vec<u8>, tag: u16, field_type: u16, value: u32) {
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&tag.to_le_bytes());
    tiff.extend_from_slice(&field_type.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&value.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());
}
