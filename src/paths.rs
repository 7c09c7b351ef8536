//! Resolving the working and output directories.
//!
//! Nothing here changes the process's current directory: the caller reads it
//! once and passes it in, and every path in [`Config`] is absolute.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Args, InputSelection};
use crate::convert::FailurePolicy;
use crate::error::{ConvertError, IoResultExt};

/// Name of the output directory created inside the working directory when
/// none is given.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "/png/";

/// Fully resolved settings for a run.  Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub working_dir: PathBuf,
    pub output_dir: PathBuf,
    pub single_file: Option<PathBuf>,
    pub fill_color: Option<String>,
    pub color_only: bool,
    pub width: Option<u32>,
    pub policy: FailurePolicy,
}

impl Config {
    pub fn resolve(args: Args, current_dir: &Path) -> Config {
        let (working_dir, single_file) = match args.input {
            InputSelection::Dir(dir) | InputSelection::RelativeDir(dir) => {
                (current_dir.join(dir), None)
            }

            InputSelection::File(file) => {
                let file = current_dir.join(file);
                let dir = file
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| current_dir.to_path_buf());
                (dir, Some(file))
            }

            InputSelection::CurrentDir => (current_dir.to_path_buf(), None),
        };

        let output_dir = match (args.rdir_out, args.dir_out) {
            (Some(rdir_out), _) => concat_path(&working_dir, &rdir_out),
            (None, Some(dir_out)) => working_dir.join(dir_out),
            (None, None) => concat_path(&working_dir, DEFAULT_OUTPUT_SUFFIX),
        };

        crate::convert_log!(
            "resolved working directory {} and output directory {}",
            working_dir.display(),
            output_dir.display()
        );

        Config {
            working_dir,
            output_dir,
            single_file,
            fill_color: args.color,
            color_only: args.color_only,
            width: args.width,
            policy: args.policy,
        }
    }
}

/// Appends `suffix` to `base` as plain text, without inserting or collapsing
/// separators.
fn concat_path(base: &Path, suffix: &str) -> PathBuf {
    let mut s = OsString::from(base.as_os_str());
    s.push(suffix);
    PathBuf::from(s)
}

/// Creates the output directory and any missing parents.
pub fn ensure_output_dir(config: &Config) -> Result<(), ConvertError> {
    if !config.output_dir.is_dir() {
        crate::convert_log!("creating {}", config.output_dir.display());
    }

    fs::create_dir_all(&config.output_dir)
        .with_path("Error creating output directory", &config.output_dir)
}
