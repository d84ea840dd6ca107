//! Command-line interface for generating a tiled board from a rule file

use crate::algorithm::executor::{CollapseMode, EngineConfig, WaveFunctionCollapse};
use crate::io::catalog::{TileImage, load_catalog};
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_COLS, DEFAULT_LOG_FILTER, DEFAULT_ROWS, DEFAULT_SEED,
    GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX,
};
use crate::io::error::{CollapseError, Result, invalid_parameter};
use crate::io::image::{ImageRenderer, TileAtlas};
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::tiles::Tile;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Fill a grid with socket-matched tiles by greedy wave function collapse"
)]
/// Command-line arguments for the generation tool
// Independent switches: propagate, visualize, quiet
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// JSON rule file describing tile images and socket codes
    #[arg(value_name = "RULES")]
    pub rules: PathBuf,

    /// Number of grid rows
    #[arg(short = 'x', long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Number of grid columns
    #[arg(short = 'y', long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Propagate constraints to neighbours after every collapse instead of
    /// filtering the catalog when a cell is reached
    #[arg(short, long)]
    pub propagate: bool,

    /// Row where the wave starts (defaults to the centre row)
    #[arg(long)]
    pub start_row: Option<usize>,

    /// Column where the wave starts (defaults to the centre column)
    #[arg(long)]
    pub start_col: Option<usize>,

    /// Fresh runs to try, with consecutive seeds, when a run exhausts a cell
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: u32,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Output PNG path (defaults to <RULES stem>_result.png next to the rule file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Collapse strategy selected by the flags
    pub const fn mode(&self) -> CollapseMode {
        CollapseMode::from_fast_way(!self.propagate)
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine configuration for the given seed
    pub const fn engine_config(&self, seed: u64) -> EngineConfig {
        EngineConfig::new(self.rows, self.cols)
            .with_mode(self.mode())
            .with_seed(seed)
    }

    /// Start cell of the wave
    pub fn start(&self) -> (usize, usize) {
        let (centre_row, centre_col) = EngineConfig::new(self.rows, self.cols).centre();
        (
            self.start_row.unwrap_or(centre_row),
            self.start_col.unwrap_or(centre_col),
        )
    }

    /// Start cell of the wave, checked against the grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the grid dimensions are invalid or the
    /// start cell lies outside the grid
    pub fn checked_start(&self) -> Result<(usize, usize)> {
        let config = self.engine_config(self.seed);
        config.validate()?;

        let (row, col) = self.start();
        if row >= config.rows {
            return Err(invalid_parameter(
                "start_row",
                &row,
                &format!("must be below {}", config.rows),
            ));
        }
        if col >= config.cols {
            return Err(invalid_parameter(
                "start_col",
                &col,
                &format!("must be below {}", config.cols),
            ));
        }
        Ok((row, col))
    }

    /// Log filter used when `RUST_LOG` is unset
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => DEFAULT_LOG_FILTER,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Path of the rendered board
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| sibling_path(&self.rules, &format!("{OUTPUT_SUFFIX}.png")))
    }

    /// Path of the GIF visualization
    pub fn visualization_path(&self) -> PathBuf {
        let output = self.output_path();
        sibling_path(&output, "_visualization.gif")
    }
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}", stem.to_string_lossy());

    if let Some(parent) = path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Outcome of a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Seed of the run that completed
    pub seed: u64,
    /// Runs started, including the successful one
    pub attempts: u32,
    /// Cells collapsed
    pub cells: usize,
    /// Where the rendered board was written
    pub output: PathBuf,
}

type RunVisitor = (
    Option<ImageRenderer>,
    (Option<VisualizationCapture>, ProgressManager),
);

/// Orchestrates catalog loading, collapse runs and export
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the catalog, generate a board and export it
    ///
    /// # Errors
    ///
    /// Returns an error if the grid or start cell is invalid, if the catalog or
    /// its images cannot be loaded, if the board is too large to render, if
    /// every attempt exhausts a cell, or if export fails
    pub fn run(&self) -> Result<RunSummary> {
        let start = self.cli.checked_start()?;
        let catalog = load_catalog(&self.cli.rules)?;
        let atlas = TileAtlas::load(&catalog)?;
        let attempts = self.cli.attempts.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;
            let seed = self.cli.seed.wrapping_add(u64::from(attempt - 1));

            match self.run_once(catalog.clone(), atlas.clone(), seed, start) {
                Ok(engine) => return self.export(engine, seed, attempt),
                Err(error) if error.is_exhausted() && attempt < attempts => {
                    tracing::warn!(attempt, seed, %error, "run exhausted, starting a fresh run");
                }
                Err(error) => return Err(error),
            }
        }
    }

    fn run_once(
        &self,
        catalog: Vec<Tile<TileImage>>,
        atlas: TileAtlas,
        seed: u64,
        (x, y): (usize, usize),
    ) -> Result<WaveFunctionCollapse<TileImage, RunVisitor>> {
        let cells = self.cli.rows.saturating_mul(self.cli.cols);
        let renderer = ImageRenderer::new(atlas, self.cli.rows, self.cli.cols, catalog.len())?;
        let progress = if self.cli.should_show_progress() {
            ProgressManager::new(cells, &format!("seed {seed}"))
        } else {
            ProgressManager::hidden(cells)
        };

        let visitor: RunVisitor = if self.cli.visualize {
            (None, (Some(VisualizationCapture::new(renderer)), progress))
        } else {
            (Some(renderer), (None, progress))
        };

        let mut engine =
            WaveFunctionCollapse::new(self.cli.engine_config(seed), catalog, visitor)?;
        engine.draw_board();

        if let Err(error) = engine.start_wave(x, y) {
            engine.visitor().1.1.abandon(&error.to_string());
            return Err(error);
        }

        engine.visitor().1.1.finish("done");
        Ok(engine)
    }

    fn export(
        &self,
        engine: WaveFunctionCollapse<TileImage, RunVisitor>,
        seed: u64,
        attempts: u32,
    ) -> Result<RunSummary> {
        let cells = engine.grid().filled_count();
        let output = self.cli.output_path();

        match engine.into_visitor() {
            (Some(renderer), _) => renderer.save(&output)?,
            (None, (Some(capture), _)) => {
                capture.renderer().save(&output)?;
                capture.export_gif(&self.cli.visualization_path(), GIF_FRAME_DELAY_MS)?;
            }
            (None, (None, _)) => {
                return Err(CollapseError::InvalidParameter {
                    parameter: "output",
                    value: output.display().to_string(),
                    reason: "no renderer attached to the run".to_string(),
                });
            }
        }

        tracing::info!(seed, attempts, cells, output = %output.display(), "generation complete");
        Ok(RunSummary {
            seed,
            attempts,
            cells,
            output,
        })
    }
}
