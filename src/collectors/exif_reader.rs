//! EXIF focal length extraction
//!
//! Reads the `FocalLength` tag (a rational in millimetres) from an image
//! container using kamadak-exif.

use exif::{In, Reader, Tag, Value};
use log::trace;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use crate::errors::{FocalError, Result};
use crate::models::FocalLengthReading;

/// Source of per-file focal length readings
///
/// `Ok(NoData)` means the file was readable but carried no focal length;
/// `Err` means the file itself could not be read or decoded. Scans treat
/// both as "no data" for the file.
pub trait FocalLengthSource: Send + Sync {
    fn read_focal_length(&self, path: &Path) -> Result<FocalLengthReading>;
}

/// [`FocalLengthSource`] backed by the EXIF block of the file
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifReader;

impl ExifReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads the focal length from any seekable image container
    pub fn read_from<R: BufRead + Seek>(reader: &mut R, path: &Path) -> Result<FocalLengthReading> {
        let exif = match Reader::new().read_from_container(reader) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => {
                trace!("{}: no EXIF block", path.display());
                return Ok(FocalLengthReading::NoData);
            }
            Err(source) => {
                return Err(FocalError::Exif {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let Some(field) = exif.get_field(Tag::FocalLength, In::PRIMARY) else {
            trace!("{}: no focal length tag", path.display());
            return Ok(FocalLengthReading::NoData);
        };

        let reading = match &field.value {
            Value::Rational(values) => values
                .first()
                .map_or(FocalLengthReading::NoData, |r| {
                    FocalLengthReading::from_rational(r.num, r.denom)
                }),
            other => {
                trace!("{}: unexpected focal length value {:?}", path.display(), other);
                FocalLengthReading::NoData
            }
        };

        trace!("{}: {}", path.display(), reading);
        Ok(reading)
    }
}

impl FocalLengthSource for ExifReader {
    fn read_focal_length(&self, path: &Path) -> Result<FocalLengthReading> {
        let file = File::open(path).map_err(|e| FocalError::io(path, e))?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, path)
    }
}

#[cfg(test)]
#[path = "../../tests/common/exif_jpeg.rs"]
pub(crate) mod fixtures;
