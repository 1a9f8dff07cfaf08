#![forbid(unsafe_code)]

//! algoviz explorer binary entry point.

use std::io::{self, Write};
use std::process;

use algoviz_explorer::cli::{self, Command, Opts};
use algoviz_explorer::logging::LogConfig;
use algoviz_explorer::run;

fn main() {
    let opts = match Opts::from_env() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{}", cli::HELP_TEXT);
            return;
        }
        Ok(Command::Version) => {
            println!("algoviz-explorer {}", cli::VERSION);
            return;
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Err(e) = LogConfig::from_env().init() {
        eprintln!("Failed to install log subscriber: {e}");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = run::run(&opts, &mut out).and_then(|()| out.flush().map_err(Into::into));
    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
}
