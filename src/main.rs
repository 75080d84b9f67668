//! sitesrc - inspect and create site content objects

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = site_source::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
