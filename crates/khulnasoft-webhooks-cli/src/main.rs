use khulnasoft_webhooks_cli::run_cli;
use tracing::error;

fn main() {
    if let Err(e) = run_cli() {
        error!(exit_code = e.exit_code(), "CLI error: {}", e);

        // Logging may not be initialized yet when configuration fails.
        eprintln!("Error: {}", e);

        std::process::exit(e.exit_code());
    }
}
