//! Candidate generation by compositing one transformed atom onto the best canvas

use crate::analysis::palette::Palette;
use crate::io::error::{Result, invalid_parameter, invalid_source};
use crate::spatial::placement::{Placement, random_offset, scaled_extent};
use crate::spatial::transform::{Atom, colorize, composite, rotate, scale};
use image::RgbImage;
use rand::Rng;

/// Produces neighbor canvases from a fixed atom pool and palette
///
/// Every draw comes from the generator handed to each call, in a fixed
/// order: atom, angle, low color, high color, scale factor, x, y.
#[derive(Debug, Clone)]
pub struct NeighborGenerator {
    atoms: Vec<Atom>,
    palette: Palette,
    min_size: u32,
}

impl NeighborGenerator {
    /// Create a generator over a non-empty atom pool
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is empty, an atom has no pixels, or
    /// `min_size` is zero
    pub fn new(atoms: Vec<Atom>, palette: Palette, min_size: u32) -> Result<Self> {
        if atoms.is_empty() {
            return Err(invalid_source(&"atom pool is empty"));
        }
        if let Some(index) = atoms.iter().position(|a| a.width() == 0 || a.height() == 0) {
            return Err(invalid_source(&format!("atom {index} has no pixels")));
        }
        if min_size == 0 {
            return Err(invalid_parameter(
                "min_size",
                &min_size,
                &"atoms must be at least one pixel wide",
            ));
        }

        Ok(Self {
            atoms,
            palette,
            min_size,
        })
    }

    /// Return a mutated copy of `canvas`
    pub fn neighbor<R: Rng + ?Sized>(&self, canvas: &RgbImage, rng: &mut R) -> RgbImage {
        self.neighbor_with_placement(canvas, rng).0
    }

    /// Return a mutated copy of `canvas` along with where the atom landed
    pub fn neighbor_with_placement<R: Rng + ?Sized>(
        &self,
        canvas: &RgbImage,
        rng: &mut R,
    ) -> (RgbImage, Placement) {
        let mut next = canvas.clone();

        let index = rng.random_range(0..self.atoms.len());
        let Some(atom) = self.atoms.get(index) else {
            return (next, Placement::EMPTY);
        };

        let rotated = rotate(atom.image(), rng.random_range(0..360));

        let low = self.palette.choose(rng);
        let high = self.palette.choose(rng);
        let recolored = colorize(&rotated, low, high);

        let factor: f64 = rng.random();
        let width = scaled_extent(factor, canvas.width(), recolored.width(), self.min_size);
        let height = scaled_extent(factor, canvas.height(), recolored.height(), self.min_size);
        let scaled = scale(&recolored, width, height);

        let x = random_offset(rng, canvas.width(), width);
        let y = random_offset(rng, canvas.height(), height);
        composite(&mut next, &scaled, x, y);

        (
            next,
            Placement {
                x,
                y,
                width,
                height,
            },
        )
    }

    /// Atom pool
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Recoloring palette
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Floor for placed atom width and height
    pub const fn min_size(&self) -> u32 {
        self.min_size
    }
}
