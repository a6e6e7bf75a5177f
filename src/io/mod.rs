//! Input/output: command line, configuration, errors, image loading and frame output

/// Command-line parsing and the run driver
pub mod cli;
/// Constants and runtime search configuration
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Target and atom loading
pub mod image;
/// Progress display and diagnostics
pub mod progress;
/// Frame sinks for accepted canvases
pub mod stream;
