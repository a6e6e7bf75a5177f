//! Search loop driving energy evaluation, acceptance and mutation

use crate::algorithm::climber::HillClimber;
use crate::algorithm::energy::energy;
use crate::algorithm::neighbor::NeighborGenerator;
use crate::analysis::palette::Palette;
use crate::analysis::statistics::mean_color;
use crate::io::configuration::SearchConfig;
use crate::io::error::{Result, computation_error, invalid_source};
use crate::io::image::quantization_reference;
use crate::spatial::transform::Atom;
use image::RgbImage;
use rand::{SeedableRng, rngs::StdRng};

/// Canvas accepted as a new best, handed to a [`FrameSink`]
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Iteration that produced the canvas, starting at zero
    pub iteration: usize,
    /// Energy of the canvas against the target
    pub energy: f64,
    /// The accepted canvas
    pub canvas: &'a RgbImage,
}

/// Destination for accepted frames
pub trait FrameSink {
    /// Consume one accepted frame
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be written; the search stops
    fn emit(&mut self, frame: &Frame<'_>) -> Result<()>;
}

/// Totals reported once a run ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Iterations performed
    pub iterations: usize,
    /// Frames accepted and emitted
    pub accepted: usize,
    /// Energy of the final best canvas
    pub best_energy: f64,
}

/// Solid canvas filled with the per-channel mean of the target
pub fn initial_canvas(target: &RgbImage) -> RgbImage {
    RgbImage::from_pixel(target.width(), target.height(), mean_color(target))
}

/// Greedy hill-climbing search toward a target image
///
/// Each iteration scores the working canvas, offers it to the climber, and
/// replaces it with a neighbor of the best canvas. A candidate is therefore
/// always one mutation away from the best; rejected branches are forgotten.
pub struct Search {
    target: RgbImage,
    generator: NeighborGenerator,
    climber: HillClimber<RgbImage>,
    rng: StdRng,
    config: SearchConfig,
    current: RgbImage,
    iteration: usize,
    accepted: usize,
}

impl Search {
    /// Build a search, quantizing the palette from the target
    ///
    /// The palette draws its initial centroids from the same seeded
    /// generator later used for mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration fails validation
    /// - The target has no pixels or the atom pool is empty
    /// - Palette quantization fails
    pub fn new(target: RgbImage, atoms: Vec<Atom>, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        check_target(&target)?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        log::info!("Computing palette...");
        let palette = Palette::from_image(
            &quantization_reference(&target),
            config.colors,
            config.kmeans_iterations,
            &mut rng,
        )?;

        Self::assemble(target, atoms, palette, config, rng)
    }

    /// Build a search around a precomputed palette
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration, target or atom pool is invalid
    pub fn with_palette(
        target: RgbImage,
        atoms: Vec<Atom>,
        palette: Palette,
        config: SearchConfig,
    ) -> Result<Self> {
        config.validate()?;
        check_target(&target)?;
        let rng = StdRng::seed_from_u64(config.seed);
        Self::assemble(target, atoms, palette, config, rng)
    }

    fn assemble(
        target: RgbImage,
        atoms: Vec<Atom>,
        palette: Palette,
        config: SearchConfig,
        rng: StdRng,
    ) -> Result<Self> {
        let generator = NeighborGenerator::new(atoms, palette, config.min_atom_size)?;
        let current = initial_canvas(&target);

        Ok(Self {
            target,
            generator,
            climber: HillClimber::new(config.acceptance),
            rng,
            config,
            current,
            iteration: 0,
            accepted: 0,
        })
    }

    /// Perform one iteration
    ///
    /// Returns the accepted frame when the evaluated canvas became the new
    /// best. The working canvas is replaced by a neighbor of the best either
    /// way.
    ///
    /// # Errors
    ///
    /// Returns an error if the working canvas no longer matches the target
    /// dimensions
    pub fn step(&mut self) -> Result<Option<Frame<'_>>> {
        let iteration = self.iteration;
        self.iteration += 1;

        let candidate_energy = energy(&self.target, &self.current)?;
        let candidate = std::mem::take(&mut self.current);
        let outcome = self.climber.step(candidate, candidate_energy);
        let improved = outcome.improved;
        if improved {
            self.accepted += 1;
        }

        let best = self
            .climber
            .best()
            .ok_or_else(|| computation_error("hill climbing", &"no canvas accepted yet"))?;
        self.current = self.generator.neighbor(best, &mut self.rng);

        Ok(improved.then_some(Frame {
            iteration,
            energy: self.climber.best_energy(),
            canvas: best,
        }))
    }

    /// Iterate until the budget is exhausted, emitting every accepted frame
    ///
    /// An unbounded budget only returns on a sink or computation error.
    ///
    /// # Errors
    ///
    /// Returns an error if an iteration fails or the sink rejects a frame
    pub fn run<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> Result<RunSummary> {
        while self.config.allows(self.iteration) {
            if let Some(frame) = self.step()? {
                sink.emit(&frame)?;
            }
        }
        Ok(self.summary())
    }

    /// Totals so far
    pub const fn summary(&self) -> RunSummary {
        RunSummary {
            iterations: self.iteration,
            accepted: self.accepted,
            best_energy: self.climber.best_energy(),
        }
    }

    /// Best canvas found so far
    pub fn best(&self) -> Option<&RgbImage> {
        self.climber.best()
    }

    /// Energy of the best canvas, infinite before the first iteration
    pub const fn best_energy(&self) -> f64 {
        self.climber.best_energy()
    }

    /// Candidate to be evaluated on the next iteration
    pub const fn current(&self) -> &RgbImage {
        &self.current
    }

    /// Target image
    pub const fn target(&self) -> &RgbImage {
        &self.target
    }

    /// Palette used for recoloring
    pub const fn palette(&self) -> &Palette {
        self.generator.palette()
    }

    /// Iterations performed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Configuration this search runs with
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }
}

fn check_target(target: &RgbImage) -> Result<()> {
    if target.width() == 0 || target.height() == 0 {
        return Err(invalid_source(&"target image has no pixels"));
    }
    Ok(())
}
