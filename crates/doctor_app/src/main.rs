mod cli;
mod config;
mod effects;
mod render;
mod session;

use std::process::ExitCode;

use clap::Parser;
use doctor_logging::doctor_error;

fn main() -> ExitCode {
    let args = cli::Args::parse();
    match cli::dispatch(args) {
        Ok(code) => code,
        Err(err) => {
            doctor_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
