//! Command-line interface for svg-convert.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{crate_version, value_parser, ArgMatches};
use clap_complete::Shell;

use crate::convert::FailurePolicy;

/// Value of `--dir` that means "the current directory"; also what a bare
/// `--dir` stands for.
pub const CURRENT_DIR_SENTINEL: &str = "here";

// Single-dash spellings with more than one letter, which clap cannot parse
// as short flags.
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-co", "--coloronly"),
    ("-do", "--dirout"),
    ("-rdo", "--rdirout"),
    ("-rd", "--rdir"),
];

/// Where the SVGs come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSelection {
    CurrentDir,
    Dir(PathBuf),
    RelativeDir(PathBuf),
    File(PathBuf),
}

/// The user's request, before any path is resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Args {
    pub width: Option<u32>,
    pub color: Option<String>,
    pub color_only: bool,
    pub dir_out: Option<PathBuf>,
    pub rdir_out: Option<String>,
    pub input: InputSelection,
    pub policy: FailurePolicy,
}

/// What the command line asks the program to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    Convert(Args),
    Completion(Shell),
}

impl Invocation {
    /// Parses a full command line, including the program name.
    pub fn parse_from<I, T>(args: I) -> Result<Invocation, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let matches = build_cli().try_get_matches_from(normalize_legacy_flags(args))?;

        match matches.get_one::<Shell>("completion").copied() {
            Some(shell) => Ok(Invocation::Completion(shell)),
            None => Ok(Invocation::Convert(Args::from_matches(&matches))),
        }
    }
}

impl Args {
    fn from_matches(matches: &ArgMatches) -> Args {
        let input = if let Some(dir) = matches.get_one::<PathBuf>("dir") {
            if dir.as_path() == Path::new(CURRENT_DIR_SENTINEL) {
                InputSelection::CurrentDir
            } else {
                InputSelection::Dir(dir.clone())
            }
        } else if let Some(rdir) = matches.get_one::<PathBuf>("rdir") {
            InputSelection::RelativeDir(rdir.clone())
        } else if let Some(file) = matches.get_one::<PathBuf>("file") {
            InputSelection::File(file.clone())
        } else {
            InputSelection::CurrentDir
        };

        let policy = if matches.get_flag("keep_going") {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        };

        Args {
            width: matches.get_one::<u32>("width").copied(),
            color: matches.get_one::<String>("color").cloned(),
            color_only: matches.get_one::<bool>("coloronly").copied().unwrap_or(false),
            dir_out: matches.get_one::<PathBuf>("dirout").cloned(),
            rdir_out: matches.get_one::<String>("rdirout").cloned(),
            input,
            policy,
        }
    }
}

pub fn build_cli() -> clap::Command {
    clap::Command::new("svg-convert")
        .version(crate_version!())
        .about("Convert SVG files to PNG, optionally recoloring them first")
        .arg(
            clap::Arg::new("width")
                .short('w')
                .long("width")
                .num_args(1)
                .value_name("pixels")
                .value_parser(value_parser!(u32).range(1..))
                .help("Width of the PNG; the height keeps the aspect ratio [defaults to the width of the SVG]")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("color")
                .short('c')
                .long("color")
                .num_args(1)
                .value_name("paint")
                .value_parser(parse_color)
                .help("Fill value to set on the top-level elements")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("coloronly")
                .long("coloronly")
                .num_args(0..=1)
                .value_name("bool")
                .default_missing_value("true")
                .value_parser(clap::builder::BoolishValueParser::new())
                .requires("color")
                .help("Only recolor; write an SVG instead of a PNG (also -co)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("dirout")
                .long("dirout")
                .num_args(1)
                .value_name("dir")
                .value_parser(value_parser!(PathBuf))
                .help("Output directory, absolute path (also -do)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("rdirout")
                .long("rdirout")
                .num_args(1)
                .value_name("dir")
                .help("Output directory, appended to the working directory (also -rdo)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("file")
                .short('f')
                .long("file")
                .num_args(1)
                .value_name("svg")
                .value_parser(value_parser!(PathBuf))
                .help("SVG file to convert")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("dir")
                .short('d')
                .long("dir")
                .num_args(0..=1)
                .value_name("dir")
                .default_missing_value(CURRENT_DIR_SENTINEL)
                .value_parser(value_parser!(PathBuf))
                .help("Directory with SVGs [defaults to the current directory]")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("rdir")
                .long("rdir")
                .num_args(1)
                .value_name("dir")
                .value_parser(value_parser!(PathBuf))
                .help("Directory with SVGs, relative to the current directory (also -rd)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("keep_going")
                .short('k')
                .long("keep-going")
                .help("Keep converting the remaining files after one fails")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("completion")
                .long("completion")
                .num_args(1)
                .value_name("shell")
                .value_parser(value_parser!(Shell))
                .help("Output shell completion for the given shell")
                .action(clap::ArgAction::Set),
        )
        .group(
            clap::ArgGroup::new("input")
                .args(["file", "dir", "rdir"])
                .multiple(false),
        )
}

/// Rewrites `-co`, `-do`, `-rdo` and `-rd` (optionally as `-do=value`) into
/// their long forms. Everything after `--` is left untouched.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut terminated = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if terminated {
                return arg;
            }

            if arg == "--" {
                terminated = true;
                return arg;
            }

            arg.to_str()
                .and_then(rewrite_legacy_flag)
                .map(OsString::from)
                .unwrap_or(arg)
        })
        .collect()
}

fn rewrite_legacy_flag(arg: &str) -> Option<String> {
    let (flag, value) = match arg.split_once('=') {
        Some((flag, value)) => (flag, Some(value)),
        None => (arg, None),
    };

    let (_, long) = LEGACY_FLAGS.iter().find(|(short, _)| *short == flag)?;

    match value {
        Some(value) => Some(format!("{long}={value}")),
        None => Some(long.to_string()),
    }
}

fn parse_color(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        Err(String::from("the fill value must not be empty"))
    } else {
        Ok(s.to_string())
    }
}
