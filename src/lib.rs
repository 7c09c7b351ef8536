//! Convert SVG files to PNG, optionally recoloring them first.
//!
//! The pipeline is: command-line [`cli::Args`] → resolved [`paths::Config`] →
//! the [`input::Sources`] to convert → [`convert::Converter`], which
//! recolors ([`recolor`]) and/or rasterizes ([`render`]) each file and places
//! the result in the output directory.

#![forbid(unsafe_code)]

pub mod cli;
pub mod convert;
pub mod error;
pub mod input;
pub mod log;
pub mod paths;
pub mod recolor;
pub mod render;
mod size;

use crate::convert::{Converter, Summary};
use crate::error::ConvertError;
use crate::input::Sources;
use crate::paths::{ensure_output_dir, Config};

/// Runs a whole conversion for an already resolved configuration.
///
/// Nothing is written unless at least one SVG was found.
pub fn run(config: &Config) -> Result<Summary, ConvertError> {
    println!("Working within: {}", config.working_dir.display());

    let sources = Sources::new(config)?;

    ensure_output_dir(config)?;
    println!("Outputting to: {}", config.output_dir.display());

    Converter::new(config).run(sources)
}
