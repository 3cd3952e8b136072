//! bootfxd CLI Binary
//!
//! Prints exactly one status line on stdout and exits 0 (success), 1 (operational
//! error) or 2 (tampering detected).

use bootfxd::logging::init_logging;
use bootfxd::tooling::report::{EXIT_ERROR, EXIT_OK};
use bootfxd::tooling::{render, Cli, CliContext, OutputFormat, StatusLine};
use clap::error::ErrorKind;
use clap::Parser;
use std::process;

fn fail(status: StatusLine, format: OutputFormat) -> ! {
    println!("{}", render(&status, format));
    process::exit(EXIT_ERROR);
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                process::exit(EXIT_OK);
            }
            kind => {
                eprintln!("{}", e);
                let message = if kind == ErrorKind::UnknownArgument {
                    "unknown_arg"
                } else {
                    "invalid_args"
                };
                fail(StatusLine::error(message, None), OutputFormat::Json);
            }
        },
    };
    let format = cli.format;

    let command = match cli.resolved_command() {
        Some(command) => command,
        None => fail(StatusLine::error("invalid_args", None), format),
    };

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => fail(StatusLine::error(e.status_code(), Some(e.to_string())), format),
    };

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let context = CliContext::new(&config);
    let status = StatusLine::from_result(&context.execute(command));
    println!("{}", render(&status, format));
    process::exit(status.exit_code());
}
