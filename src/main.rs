use std::io;
use std::process;

use svg_convert::cli::{build_cli, Invocation};
use svg_convert::error::EXIT_FILESYSTEM;
use svg_convert::paths::Config;

fn main() {
    let invocation = Invocation::parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit());

    let args = match invocation {
        Invocation::Completion(shell) => {
            eprintln!("Generating completion file for {shell}");
            clap_complete::generate(shell, &mut build_cli(), "svg-convert", &mut io::stdout());
            return;
        }

        Invocation::Convert(args) => args,
    };

    let current_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: cannot read the current directory: {e}");
            process::exit(EXIT_FILESYSTEM);
        }
    };

    let config = Config::resolve(args, &current_dir);

    match svg_convert::run(&config) {
        Ok(summary) => {
            if let Some(e) = summary.first_failure() {
                eprintln!(
                    "{} of {} file(s) could not be converted",
                    summary.failures.len(),
                    summary.failures.len() + summary.converted
                );
                process::exit(e.exit_code());
            }
        }

        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    }
}
