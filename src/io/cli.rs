//! Command-line interface streaming accepted frames as PNG

use crate::algorithm::climber::Acceptance;
use crate::algorithm::search::{FrameSink, RunSummary, Search};
use crate::io::configuration::{
    DEFAULT_COLORS, DEFAULT_KMEANS_ITERATIONS, DEFAULT_MIN_ATOM_SIZE, DEFAULT_SEED, SearchConfig,
};
use crate::io::error::{AtomosaicError, Result};
use crate::io::image::{load_atoms, load_target};
use crate::io::progress::ProgressReporter;
use crate::io::stream::PngStreamSink;
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "atomosaic")]
#[command(
    author,
    version,
    about = "Approximate source image from atoms, output a PNG stream"
)]
/// Command-line arguments for the approximation tool
pub struct Cli {
    /// Target image to approximate
    #[arg(short, long, value_name = "SOURCE")]
    pub source: PathBuf,

    /// Atom images composited onto the canvas
    #[arg(value_name = "ATOMS", required = true, num_args = 1..)]
    pub atoms: Vec<PathBuf>,

    /// Iteration count (unbounded when omitted)
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Palette color count
    #[arg(short, long, default_value_t = DEFAULT_COLORS)]
    pub colors: usize,

    /// Minimum width and height of a placed atom
    #[arg(short, long = "min", default_value_t = DEFAULT_MIN_ATOM_SIZE)]
    pub min_size: u32,

    /// Random seed for reproducible runs
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum k-means iterations for palette extraction
    #[arg(short, long, default_value_t = DEFAULT_KMEANS_ITERATIONS)]
    pub kmeans_iterations: usize,

    /// Only accept candidates that strictly lower the energy
    #[arg(long)]
    pub strict: bool,

    /// Write the PNG stream to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output and informational logging
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter for this invocation
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet { "warn" } else { "info" }
    }

    /// Search parameters selected by the flags
    pub const fn search_config(&self) -> SearchConfig {
        SearchConfig {
            iterations: self.iterations,
            colors: self.colors,
            kmeans_iterations: self.kmeans_iterations,
            min_atom_size: self.min_size,
            seed: self.seed,
            acceptance: if self.strict {
                Acceptance::StrictlyBetter
            } else {
                Acceptance::NotWorse
            },
        }
    }
}

/// Loads inputs, runs the search and streams frames to the chosen output
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the search to completion
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target or any atom cannot be loaded
    /// - The configuration is invalid
    /// - The output cannot be created or a frame cannot be written
    pub fn process(&self) -> Result<RunSummary> {
        let target = load_target(&self.cli.source)?;
        let atoms = load_atoms(&self.cli.atoms)?;
        let config = self.cli.search_config();

        let mut search = Search::new(target, atoms, config)?;
        let reporter = ProgressReporter::new(config.iterations, self.cli.should_show_progress());

        log::info!(
            "Starting search with I={} iterations",
            config
                .iterations
                .map_or_else(|| "inf".to_string(), |i| i.to_string())
        );

        match self.cli.output {
            Some(ref path) => {
                let writer = BufWriter::new(create_output(path)?);
                let mut sink = PngStreamSink::new(writer);
                drive(&mut search, &mut sink, &reporter)
            }
            None => {
                let stdout = std::io::stdout();
                let mut sink = PngStreamSink::new(stdout.lock());
                drive(&mut search, &mut sink, &reporter)
            }
        }
    }

    /// Parsed arguments
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }
}

/// Step the search until its budget runs out, reporting each accepted frame
///
/// # Errors
///
/// Returns an error if an iteration fails or the sink rejects a frame
pub fn drive<S: FrameSink + ?Sized>(
    search: &mut Search,
    sink: &mut S,
    reporter: &ProgressReporter,
) -> Result<RunSummary> {
    while search.config().allows(search.iteration()) {
        if let Some(frame) = search.step()? {
            reporter.record_accept(&frame);
            sink.emit(&frame)?;
        }
        reporter.update_iteration(search.iteration());
    }

    let summary = search.summary();
    reporter.finish(&summary);
    Ok(summary)
}

fn create_output(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AtomosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    File::create(path).map_err(|e| AtomosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "create output",
        source: e,
    })
}
