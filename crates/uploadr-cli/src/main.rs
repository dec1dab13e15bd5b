use uploadr_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Log to the state file; stderr if that is not possible.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("uploadr error: {:#}", err);
        std::process::exit(1);
    }
}
