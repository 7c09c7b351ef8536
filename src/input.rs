//! Enumerating the SVG files to convert.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, IoResultExt};
use crate::paths::Config;

pub const SVG_SUFFIX: &str = ".svg";

/// Case-sensitive check on the file name only; the contents are not looked at.
pub fn has_svg_suffix(name: &OsStr) -> bool {
    name.to_string_lossy().ends_with(SVG_SUFFIX)
}

/// The SVG files to convert, in the order they will be converted.
pub enum Sources {
    Single(std::iter::Once<PathBuf>),
    Directory(std::vec::IntoIter<PathBuf>),
}

impl Sources {
    /// Checks that there is something to convert and lists it.
    ///
    /// In directory mode the listing is complete before this returns; call
    /// it again to list the directory afresh.
    pub fn new(config: &Config) -> Result<Sources, ConvertError> {
        match config.single_file {
            Some(ref file) => {
                let is_svg = file.file_name().map(has_svg_suffix).unwrap_or(false);
                if !is_svg {
                    return Err(ConvertError::NotAnSvg(file.clone()));
                }

                Ok(Sources::Single(std::iter::once(file.clone())))
            }

            None => {
                let paths = list_svgs(&config.working_dir)?;
                if paths.is_empty() {
                    return Err(ConvertError::NoSvgs(config.working_dir.clone()));
                }

                crate::convert_log!(
                    "found {} SVG file(s) in {}",
                    paths.len(),
                    config.working_dir.display()
                );

                Ok(Sources::Directory(paths.into_iter()))
            }
        }
    }
}

impl Iterator for Sources {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        match self {
            Sources::Single(iter) => iter.next(),
            Sources::Directory(iter) => iter.next(),
        }
    }
}

fn list_svgs(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir).with_path("Error reading directory", dir)? {
        let entry = entry.with_path("Error reading directory", dir)?;

        if !has_svg_suffix(&entry.file_name()) {
            continue;
        }

        let is_dir = entry
            .file_type()
            .map(|t| t.is_dir())
            .with_path("Error reading directory", dir)?;
        if is_dir {
            continue;
        }

        paths.push(entry.path());
    }

    paths.sort();
    Ok(paths)
}
