//! Search constants and runtime configuration defaults

use crate::algorithm::climber::Acceptance;
use crate::io::error::{Result, invalid_parameter};

// Palette quantization
/// Number of palette colors used for atom recoloring
pub const DEFAULT_COLORS: usize = 72;
/// Maximum Lloyd iterations during palette clustering
pub const DEFAULT_KMEANS_ITERATIONS: usize = 20;
/// Absolute drop in mean distortion at or below which clustering stops early
pub const KMEANS_DISTORTION_THRESHOLD: f64 = 1e-5;

// Bounds the sample count fed to clustering
/// Reference images above this pixel area are downscaled before quantization
pub const QUANTIZATION_MAX_AREA: u32 = 256 * 256;

/// Minimum width and height of a placed atom in pixels
pub const DEFAULT_MIN_ATOM_SIZE: u32 = 8;

// Default values for configurable parameters
/// Fixed seed for reproducible searches
pub const DEFAULT_SEED: u64 = 42;

// Progress bar display settings
/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Runtime parameters for one search run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Iteration budget; `None` runs until the process is stopped
    pub iterations: Option<usize>,
    /// Palette size for recoloring
    pub colors: usize,
    /// Lloyd iteration cap for palette clustering
    pub kmeans_iterations: usize,
    /// Floor for placed atom width and height
    pub min_atom_size: u32,
    /// Seed for the generator shared by quantization and mutation
    pub seed: u64,
    /// Policy deciding whether a candidate replaces the best canvas
    pub acceptance: Acceptance,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: None,
            colors: DEFAULT_COLORS,
            kmeans_iterations: DEFAULT_KMEANS_ITERATIONS,
            min_atom_size: DEFAULT_MIN_ATOM_SIZE,
            seed: DEFAULT_SEED,
            acceptance: Acceptance::default(),
        }
    }
}

impl SearchConfig {
    /// Check that every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the palette size, clustering cap or atom floor is zero
    pub fn validate(&self) -> Result<()> {
        if self.colors == 0 {
            return Err(invalid_parameter(
                "colors",
                &self.colors,
                &"palette needs at least one color",
            ));
        }
        if self.kmeans_iterations == 0 {
            return Err(invalid_parameter(
                "kmeans_iterations",
                &self.kmeans_iterations,
                &"clustering needs at least one iteration",
            ));
        }
        if self.min_atom_size == 0 {
            return Err(invalid_parameter(
                "min_atom_size",
                &self.min_atom_size,
                &"atoms must be at least one pixel wide",
            ));
        }
        Ok(())
    }

    /// Whether the iteration budget allows another step after `completed` steps
    pub fn allows(&self, completed: usize) -> bool {
        self.iterations.is_none_or(|budget| completed < budget)
    }
}
