//! Per-channel color statistics over RGB rasters

use image::{Rgb, RgbImage};
use ndarray::{Array1, Array2, Axis};

/// Flatten an RGB image into an `n x 3` sample matrix, one row per pixel
pub fn pixel_samples(image: &RgbImage) -> Array2<f64> {
    let pixel_count = (image.width() as usize) * (image.height() as usize);
    let values: Vec<f64> = image.as_raw().iter().map(|&v| f64::from(v)).collect();

    // Raw buffer length is always pixel_count * 3 for Rgb<u8>
    Array2::from_shape_vec((pixel_count, 3), values)
        .unwrap_or_else(|_| Array2::zeros((0, 3)))
}

/// Mean of each column, zero for an empty sample set
pub fn channel_means(samples: &Array2<f64>) -> Array1<f64> {
    samples
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(samples.ncols()))
}

/// Population standard deviation of each column
pub fn channel_std_devs(samples: &Array2<f64>) -> Array1<f64> {
    if samples.nrows() == 0 {
        return Array1::zeros(samples.ncols());
    }
    samples.std_axis(Axis(0), 0.0)
}

/// Average color of an image with each channel truncated toward zero
pub fn mean_color(image: &RgbImage) -> Rgb<u8> {
    let mut sums = [0u64; 3];
    for pixel in image.pixels() {
        for (sum, &v) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += u64::from(v);
        }
    }

    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return Rgb([0, 0, 0]);
    }

    Rgb(sums.map(|sum| (sum / count) as u8))
}
