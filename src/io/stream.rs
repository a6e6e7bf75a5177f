//! Frame sinks: a concatenated PNG stream and an in-memory recorder

use crate::algorithm::search::{Frame, FrameSink};
use crate::io::error::{AtomosaicError, Result};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageError, RgbImage};
use std::io::Write;

/// Encode one canvas as a standalone PNG into `writer`
///
/// # Errors
///
/// Returns an error if encoding or writing fails
pub fn encode_png<W: Write>(canvas: &RgbImage, writer: W) -> std::result::Result<(), ImageError> {
    PngEncoder::new(writer).write_image(
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        ExtendedColorType::Rgb8,
    )
}

/// Writes every accepted frame as an independent PNG, back to back
///
/// Readers split the stream by decoding one PNG at a time; nothing but PNG
/// data ever reaches the writer.
pub struct PngStreamSink<W: Write> {
    writer: W,
    frames: usize,
}

impl<W: Write> PngStreamSink<W> {
    /// Wrap a writer such as locked stdout or a file
    pub const fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    /// Frames written so far
    pub const fn frames(&self) -> usize {
        self.frames
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for PngStreamSink<W> {
    fn emit(&mut self, frame: &Frame<'_>) -> Result<()> {
        encode_png(frame.canvas, &mut self.writer)
            .and_then(|()| self.writer.flush().map_err(ImageError::IoError))
            .map_err(|source| AtomosaicError::FrameEncode {
                iteration: frame.iteration,
                source,
            })?;
        self.frames += 1;
        Ok(())
    }
}

/// Owned copy of an accepted frame
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    /// Iteration that produced the canvas
    pub iteration: usize,
    /// Energy at acceptance
    pub energy: f64,
    /// The accepted canvas
    pub canvas: RgbImage,
}

/// Keeps every accepted frame in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    /// Frames in acceptance order
    pub frames: Vec<RecordedFrame>,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted energies in order
    pub fn energies(&self) -> Vec<f64> {
        self.frames.iter().map(|f| f.energy).collect()
    }
}

impl FrameSink for RecordingSink {
    fn emit(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.frames.push(RecordedFrame {
            iteration: frame.iteration,
            energy: frame.energy,
            canvas: frame.canvas.clone(),
        });
        Ok(())
    }
}
