//! Runtime configuration defaults and safety limits

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of grid rows
pub const DEFAULT_ROWS: usize = 10;

/// Default number of grid columns
pub const DEFAULT_COLS: usize = 10;

/// Default number of fresh runs before giving up on an exhausted grid
pub const DEFAULT_ATTEMPTS: u32 = 1;

/// Log filter used when `RUST_LOG` is unset and no verbosity flag is given
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Edge length of a cell whose tiles declare no size
pub const FALLBACK_CELL_SIZE: u32 = 16;
/// Largest board rendering, in pixels, that a run may allocate
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
