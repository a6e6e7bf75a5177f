//! Raster operations applied to atoms: rotation, recoloring, scaling and compositing

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage, Rgba, Rgba32FImage, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use num_traits::clamp;

/// Fill used for pixels uncovered by rotation
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Immutable source image composited onto the canvas
///
/// Always stored as RGBA. Sources without transparency are fully opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    image: RgbaImage,
}

impl Atom {
    /// Wrap an RGBA raster
    pub const fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Convert a decoded image, keeping its alpha channel if it has one
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self::new(image.to_rgba8())
    }

    /// Build a fully opaque atom from an RGB raster
    pub fn opaque(image: &RgbImage) -> Self {
        Self::from_dynamic(&DynamicImage::ImageRgb8(image.clone()))
    }

    /// Underlying raster
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Rotate counter-clockwise by whole degrees about the center
///
/// The output keeps the input dimensions; corners swept outside the source
/// become transparent.
pub fn rotate(image: &RgbaImage, degrees: u32) -> RgbaImage {
    if degrees % 360 == 0 {
        return image.clone();
    }
    let theta = -(degrees as f32).to_radians();
    rotate_about_center(image, theta, Interpolation::Nearest, TRANSPARENT)
}

/// Map grayscale intensity onto the gradient from `low` to `high`
///
/// Black maps to `low`, white to `high`. The alpha channel of the input is
/// carried over unchanged.
pub fn colorize(image: &RgbaImage, low: Rgb<u8>, high: Rgb<u8>) -> RgbaImage {
    let gray = imageops::grayscale(image);
    let lut: Vec<[u8; 3]> = (0..=255u8)
        .map(|level| {
            let mut rgb = [0u8; 3];
            for ((out, &l), &h) in rgb.iter_mut().zip(low.0.iter()).zip(high.0.iter()) {
                *out = lerp_channel(l, h, level);
            }
            rgb
        })
        .collect();

    let mut out = RgbaImage::new(image.width(), image.height());
    for ((dst, src), intensity) in out.pixels_mut().zip(image.pixels()).zip(gray.pixels()) {
        let [r, g, b] = lut
            .get(usize::from(intensity.0[0]))
            .copied()
            .unwrap_or([0, 0, 0]);
        *dst = Rgba([r, g, b, src.0[3]]);
    }
    out
}

fn lerp_channel(low: u8, high: u8, level: u8) -> u8 {
    let t = u32::from(level);
    ((u32::from(low) * (255 - t) + u32::from(high) * t + 127) / 255) as u8
}

/// Resample to exactly `width` x `height` with a Lanczos filter
///
/// Filtering runs on premultiplied alpha, so the color of fully transparent
/// pixels never bleeds into visible edges.
pub fn scale(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }

    let mut premultiplied = Rgba32FImage::new(image.width(), image.height());
    for (dst, src) in premultiplied.pixels_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0.map(|v| f32::from(v) / 255.0);
        *dst = Rgba([r * a, g * a, b * a, a]);
    }

    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);
    let mut out = RgbaImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(resized.pixels()) {
        *dst = unpremultiply(*src);
    }
    out
}

fn unpremultiply(pixel: Rgba<f32>) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    let alpha = clamp(a, 0.0, 1.0);
    if alpha <= 0.0 {
        return TRANSPARENT;
    }
    let to_u8 = |v: f32| clamp((v * 255.0).round(), 0.0, 255.0) as u8;
    Rgba([
        to_u8(r / alpha),
        to_u8(g / alpha),
        to_u8(b / alpha),
        to_u8(alpha),
    ])
}

/// Alpha-blend `atom` onto `canvas` with its top-left corner at `(x, y)`
///
/// Pixels falling outside the canvas are skipped.
pub fn composite(canvas: &mut RgbImage, atom: &RgbaImage, x: u32, y: u32) {
    for (ax, ay, src) in atom.enumerate_pixels() {
        let (cx, cy) = (x.saturating_add(ax), y.saturating_add(ay));
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }
        let alpha = u32::from(src.0[3]);
        if alpha == 0 {
            continue;
        }
        let dst = canvas.get_pixel_mut(cx, cy);
        for (d, &s) in dst.0.iter_mut().zip(src.0.iter()) {
            *d = ((u32::from(s) * alpha + u32::from(*d) * (255 - alpha) + 127) / 255) as u8;
        }
    }
}
