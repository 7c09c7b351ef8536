//! Converting SVG files one at a time, and the batch driver around it.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, IoResultExt};
use crate::input::Sources;
use crate::paths::Config;
use crate::recolor::recolor_bytes;
use crate::render::Rasterizer;

pub const PNG_SUFFIX: &str = ".png";
pub const RECOLORED_SUFFIX: &str = "-Color-Converted.svg";

/// What a batch does when one of its files fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    Abort,

    /// Report the failure and go on with the next file.
    Continue,
}

/// A successfully converted file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub source_name: String,
    pub output_name: String,
    pub output_path: PathBuf,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} converted to {}", self.source_name, self.output_name)
    }
}

/// Outcome of a batch that was allowed to finish.
#[derive(Debug, Default)]
pub struct Summary {
    pub converted: usize,
    pub failures: Vec<(PathBuf, ConvertError)>,
}

impl Summary {
    pub fn first_failure(&self) -> Option<&ConvertError> {
        self.failures.first().map(|(_, e)| e)
    }
}

/// Name of the file produced for `source`: its stem plus `.png`, or plus
/// `-Color-Converted.svg` when only recoloring.
pub fn output_name(source: &Path, color_only: bool) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let suffix = if color_only {
        RECOLORED_SUFFIX
    } else {
        PNG_SUFFIX
    };

    format!("{stem}{suffix}")
}

pub struct Converter<'a> {
    config: &'a Config,
    rasterizer: Rasterizer,
}

impl<'a> Converter<'a> {
    pub fn new(config: &'a Config) -> Self {
        Converter {
            config,
            rasterizer: Rasterizer::new(config.width),
        }
    }

    pub fn convert_file(&self, source: &Path) -> Result<Conversion, ConvertError> {
        let output_name = output_name(source, self.config.color_only);
        let data = fs::read(source).with_path("Error reading file", source)?;

        let output = match self.config.fill_color {
            Some(ref fill) => {
                crate::convert_log!("recoloring {} with fill {}", source.display(), fill);

                let recolored = recolor_bytes(&data, fill).map_err(|e| ConvertError::Xml {
                    path: source.to_path_buf(),
                    source: e,
                })?;

                if self.config.color_only {
                    recolored.into_bytes()
                } else {
                    self.render(source, recolored.as_bytes())?
                }
            }

            None => self.render(source, &data)?,
        };

        let output_path = place_output(&self.config.output_dir, &output_name, &output)?;

        let source_name = source
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Conversion {
            source_name,
            output_name,
            output_path,
        })
    }

    /// Converts every source in order, printing one line per converted file.
    ///
    /// With [`FailurePolicy::Abort`] the first error is returned and the rest
    /// of the batch is skipped.
    pub fn run(&self, sources: Sources) -> Result<Summary, ConvertError> {
        let mut summary = Summary::default();

        for source in sources {
            match self.convert_file(&source) {
                Ok(conversion) => {
                    println!("{conversion}");
                    summary.converted += 1;
                }

                Err(e) => match self.config.policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Continue => {
                        eprintln!("Error: {e}");
                        summary.failures.push((source, e));
                    }
                },
            }
        }

        Ok(summary)
    }

    fn render(&self, source: &Path, svg: &[u8]) -> Result<Vec<u8>, ConvertError> {
        self.rasterizer
            .render_png(svg)
            .map_err(|e| ConvertError::Render {
                path: source.to_path_buf(),
                source: e,
            })
    }
}

/// Writes `data` next to its final name in `dir` and renames it into place,
/// so that a failed write never leaves a truncated output behind.
fn place_output(dir: &Path, name: &str, data: &[u8]) -> Result<PathBuf, ConvertError> {
    let staged = dir.join(format!(".{name}.part"));
    let dest = dir.join(name);

    fs::write(&staged, data).with_path("Error writing output", &staged)?;

    if let Err(e) = fs::rename(&staged, &dest) {
        let _ = fs::remove_file(&staged);
        return Err(e).with_path("Error saving output", &dest);
    }

    Ok(dest)
}
