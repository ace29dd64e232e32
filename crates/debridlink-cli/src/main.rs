use std::process::ExitCode;

use clap::Parser;
use debridlink_cli::{Cli, CliError, bootstrap, logging};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env before parsing so DEBRIDLINK_CONFIG can come from it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Flushes the log file on drop
    let _guard = match logging::init(&cli.log_file) {
        Ok(guard) => guard,
        Err(e) => {
            let err = CliError::Internal(format!("{e:#}"));
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(exit_code = e.exit_code(), "{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let service = bootstrap(&cli.config)?;
    let summary = service.run_once().await?;
    info!(
        expired = summary.reclaim.expired_files,
        finished = summary.pipeline.finished,
        pending = summary.pipeline.pending,
        "debridlink done"
    );
    Ok(())
}
