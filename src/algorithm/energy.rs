//! Squared-error objective between the target and a candidate canvas

use crate::io::error::{Result, invalid_parameter};
use image::RgbImage;

/// Sum of squared channel differences between two images of equal size
///
/// Differences are taken on widened values, so opposite extremes contribute
/// `255^2` rather than wrapping.
///
/// # Errors
///
/// Returns an error if the two images have different dimensions
pub fn energy(target: &RgbImage, candidate: &RgbImage) -> Result<f64> {
    if target.dimensions() != candidate.dimensions() {
        let (tw, th) = target.dimensions();
        let (cw, ch) = candidate.dimensions();
        return Err(invalid_parameter(
            "candidate",
            &format!("{cw}x{ch}"),
            &format!("dimensions must match target {tw}x{th}"),
        ));
    }

    Ok(squared_error(target.as_raw(), candidate.as_raw()) as f64)
}

/// Squared error over two equally sized subpixel buffers
pub fn squared_error(a: &[u8], b: &[u8]) -> u64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = u64::from(x.abs_diff(y));
            d * d
        })
        .sum()
}
