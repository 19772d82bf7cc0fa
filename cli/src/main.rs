mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, control};
use terminal::{logging, report};
use tracing::warn;
use wattbox_common::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Values already in the environment win over the .env file.
    let dotenv = dotenvy::dotenv();

    let commands = CommandLine::parse_args();

    let cfg = Config {
        verbose: commands.verbose,
    };
    logging::init_logging(&cfg);

    if let Err(err) = dotenv {
        if !err.not_found() {
            warn!("Ignoring .env file: {err}");
        }
    }

    match control::control(&commands, &cfg).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            report::failure(&err, &cfg);
            ExitCode::FAILURE
        }
    }
}
