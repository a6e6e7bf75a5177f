//! Approximate a target image by greedy hill climbing over composited atoms
//!
//! Small source images ("atoms") are rotated, recolored from a quantized
//! palette, scaled and blended onto a working canvas. A mutation is kept only
//! when it does not increase the squared error against the target, and every
//! kept canvas is handed to a frame sink.

#![forbid(unsafe_code)]

/// Search core: energy, acceptance, neighbor generation and the search loop
pub mod algorithm;
/// Color statistics and palette quantization
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Numerical routines for clustering
pub mod math;
/// Atom rasters, raster transforms and placement rules
pub mod spatial;

pub use algorithm::search::{Frame, FrameSink, Search};
pub use io::error::{AtomosaicError, Result};
