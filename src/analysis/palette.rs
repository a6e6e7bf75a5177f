//! Palette extraction by whitened k-means color quantization

use crate::analysis::statistics::pixel_samples;
use crate::io::configuration::KMEANS_DISTORTION_THRESHOLD;
use crate::io::error::{Result, invalid_source};
use crate::math::clustering::{kmeans, whiten};
use image::{Rgb, RgbImage};
use ndarray::Array2;
use num_traits::clamp;
use rand::Rng;

/// Fixed set of representative colors used to recolor atoms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb<u8>>,
}

impl Palette {
    /// Wrap an explicit list of colors
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty
    pub fn new(colors: Vec<Rgb<u8>>) -> Result<Self> {
        if colors.is_empty() {
            return Err(invalid_source(&"palette must contain at least one color"));
        }
        Ok(Self { colors })
    }

    /// Quantize the colors of an image down to `k` representatives
    ///
    /// Callers wanting the large-image speedup should pass the output of
    /// [`crate::io::image::quantization_reference`].
    ///
    /// # Errors
    ///
    /// Returns an error if `k` is zero or the image has no pixels
    pub fn from_image<R: Rng + ?Sized>(
        image: &RgbImage,
        k: usize,
        max_iterations: usize,
        rng: &mut R,
    ) -> Result<Self> {
        quantize(&pixel_samples(image), k, max_iterations, rng)
    }

    /// Colors in cluster order
    pub fn colors(&self) -> &[Rgb<u8>] {
        &self.colors
    }

    /// Number of colors
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Pick one color uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb<u8> {
        let index = rng.random_range(0..self.colors.len().max(1));
        self.colors.get(index).copied().unwrap_or(Rgb([0, 0, 0]))
    }
}

/// Compute `k` dominant colors of an `n x 3` RGB sample matrix
///
/// Samples are whitened per channel, clustered, and the centroids scaled back
/// into color space. Rescaled centroids are rounded and clamped to `0..=255`.
///
/// # Errors
///
/// Returns an error if `k` is zero or `samples` is empty
pub fn quantize<R: Rng + ?Sized>(
    samples: &Array2<f64>,
    k: usize,
    max_iterations: usize,
    rng: &mut R,
) -> Result<Palette> {
    let (whitened, sigma) = whiten(samples);
    let clustering = kmeans(
        whitened.view(),
        k,
        max_iterations,
        KMEANS_DISTORTION_THRESHOLD,
        rng,
    )?;

    log::debug!(
        "palette clustering: k={k}, iterations={}, distortion={:.5}",
        clustering.iterations,
        clustering.distortion
    );

    let rescaled = clustering.centroids * &sigma;
    let colors = rescaled
        .outer_iter()
        .map(|row| {
            let mut rgb = [0u8; 3];
            for (channel, &value) in rgb.iter_mut().zip(row.iter()) {
                *channel = to_channel(value);
            }
            Rgb(rgb)
        })
        .collect();

    Palette::new(colors)
}

fn to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    clamp(value.round(), 0.0, 255.0) as u8
}
