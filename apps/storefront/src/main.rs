//! # OD Storefront Entry Point
//!
//! Runs the storefront walkthrough. The setup lives in lib.rs for
//! testability.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match storefront::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
