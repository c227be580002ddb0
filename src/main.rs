//! Release bundler - build, package, checksum and version desktop releases.
//!
//! Exit code 0 means the requested operation completed; any failure prints
//! the error with recovery suggestions and exits with 1.

use release_bundler::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging; RUST_LOG overrides the default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Run CLI and get exit code
    let exit_code = match release_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            // Errors are shown even under --quiet
            let output = OutputManager::new(false, false);
            let _ = output.error(&format!("Error: {e}"));
            for suggestion in e.recovery_suggestions() {
                let _ = output.hint(&suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
