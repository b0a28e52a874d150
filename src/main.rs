mod bubbles;
mod data;
mod graphics;
mod math;
mod modes;

use std::process::ExitCode;

use clap::Parser;

use data::{config::Options, log, Program};

fn main() -> ExitCode {
    let opts = Options::parse();

    log::init(opts.log.as_deref(), opts.logging_enabled());

    let result = Program::from_options(&opts)
        .map_err(data::Error::from)
        .and_then(modes::run);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");

            // Terminal modes run with logging off.
            if !opts.logging_enabled() {
                eprintln!("bubblevis: {e}");
            }

            ExitCode::FAILURE
        }
    }
}
