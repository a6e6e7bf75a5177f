//! Size and offset rules for placing a scaled atom on the canvas

use rand::Rng;

/// Rectangle covered by a placed atom, in canvas pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width of the placed atom
    pub width: u32,
    /// Height of the placed atom
    pub height: u32,
}

impl Placement {
    /// Zero-sized rectangle at the origin
    pub const EMPTY: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Check if a canvas pixel lies inside the rectangle
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Check if the whole rectangle lies inside a canvas of the given size
    pub const fn fits_within(&self, canvas_width: u32, canvas_height: u32) -> bool {
        self.x + self.width <= canvas_width && self.y + self.height <= canvas_height
    }
}

/// Scaled length of one atom axis
///
/// Computes `max(floor, trunc(factor * min(canvas, atom)))`, then clamps the
/// result into `1..=canvas` so a large floor can never push the atom past
/// the canvas edge.
pub fn scaled_extent(factor: f64, canvas: u32, atom: u32, floor: u32) -> u32 {
    let scaled = (factor * f64::from(canvas.min(atom))) as u32;
    scaled.max(floor).min(canvas).max(1)
}

/// Uniform offset in `[0, canvas - extent)`
///
/// An atom spanning the full axis has no range to draw from and is pinned
/// to offset zero without consuming randomness.
pub fn random_offset<R: Rng + ?Sized>(rng: &mut R, canvas: u32, extent: u32) -> u32 {
    let span = canvas.saturating_sub(extent);
    if span == 0 {
        0
    } else {
        rng.random_range(0..span)
    }
}
