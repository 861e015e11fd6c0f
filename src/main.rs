//! Month planner CLI

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = month_planner::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
