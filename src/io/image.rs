//! Image loading and reference preparation for palette quantization

use crate::io::configuration::QUANTIZATION_MAX_AREA;
use crate::io::error::{AtomosaicError, Result, invalid_source};
use crate::spatial::transform::Atom;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use std::borrow::Cow;
use std::path::Path;

fn open(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| AtomosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the target image as RGB
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The decoded image has no pixels
pub fn load_target<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let target = open(path.as_ref())?.to_rgb8();
    if target.width() == 0 || target.height() == 0 {
        return Err(invalid_source(&format!(
            "target '{}' has no pixels",
            path.as_ref().display()
        )));
    }
    Ok(target)
}

/// Load every atom image, converting each to RGBA
///
/// # Errors
///
/// Returns an error if no paths are given or any file cannot be decoded
pub fn load_atoms<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Atom>> {
    if paths.is_empty() {
        return Err(invalid_source(&"at least one atom image is required"));
    }

    paths
        .iter()
        .map(|path| {
            let decoded = open(path.as_ref())?;
            if !decoded.color().has_alpha() {
                log::debug!(
                    "atom '{}' has no alpha channel, treating as opaque",
                    path.as_ref().display()
                );
            }
            Ok(Atom::from_dynamic(&decoded))
        })
        .collect()
}

/// Reference image used for palette quantization
///
/// Images larger than 256x256 in area are shrunk by
/// `sqrt(65536 / (width * height))` with a Lanczos filter; smaller images
/// are borrowed unchanged.
pub fn quantization_reference(source: &RgbImage) -> Cow<'_, RgbImage> {
    let area = u64::from(source.width()) * u64::from(source.height());
    if area <= u64::from(QUANTIZATION_MAX_AREA) {
        return Cow::Borrowed(source);
    }

    let factor = (f64::from(QUANTIZATION_MAX_AREA) / area as f64).sqrt();
    let width = ((f64::from(source.width()) * factor) as u32).max(1);
    let height = ((f64::from(source.height()) * factor) as u32).max(1);
    log::info!(
        "Use rescaled image for color quantization: factor={factor:.3}, size={width}x{height}"
    );

    Cow::Owned(imageops::resize(source, width, height, FilterType::Lanczos3))
}
