//! Atom rasters and their placement on the canvas
//!
//! This module contains spatial-related functionality including:
//! - Rotation, recoloring, scaling and compositing of atoms
//! - Size and offset rules for placing atoms inside the canvas

/// Placement rectangles and offset sampling
pub mod placement;
/// Raster transforms applied to atoms
pub mod transform;

pub use transform::Atom;
