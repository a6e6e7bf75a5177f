//! Analysis modules for color statistics and palette extraction

/// Palette quantization from a reference image
pub mod palette;
/// Per-channel statistics over pixel samples
pub mod statistics;
