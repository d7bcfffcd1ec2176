//! Command-line configuration for the `image-dims` binary.
//!
//! Options can be given as flags or through environment variables with the
//! `IMAGE_DIMS_` prefix:
//!
//! - `IMAGE_DIMS_JOBS` - Number of files probed concurrently (default: available parallelism)
//! - `IMAGE_DIMS_OUTPUT` - Report format, `text` or `json` (default: text)
//!
//! # Example
//!
//! ```ignore
//! use image_dims::config::Config;
//!
//! let config = Config::parse();
//! config.validate()?;
//! ```

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// =============================================================================
// Default Values
// =============================================================================

/// Fallback worker count when the available parallelism cannot be queried.
pub const DEFAULT_JOBS: usize = 4;

/// Default worker count: one per available CPU.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(DEFAULT_JOBS)
}

// =============================================================================
// Output Format
// =============================================================================

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `path width height`, one line per file
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// Print the pixel dimensions of image files without decoding them.
///
/// Reads only the container header of each file. Directories are walked
/// recursively.
#[derive(Parser, Debug, Clone)]
#[command(name = "image-dims")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Image files or directories to inspect.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Maximum number of files probed at the same time.
    #[arg(short, long, default_value_t = default_jobs(), env = "IMAGE_DIMS_JOBS")]
    pub jobs: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "IMAGE_DIMS_OUTPUT")]
    pub output: OutputFormat,

    /// Follow symbolic links while walking directories.
    #[arg(long, default_value_t = false)]
    pub follow_links: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.paths.is_empty() {
            return Err("At least one path is required".to_string());
        }

        if self.jobs == 0 {
            return Err("jobs must be greater than 0. Set --jobs or IMAGE_DIMS_JOBS".to_string());
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
