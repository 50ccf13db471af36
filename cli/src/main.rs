use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use fastlog_core::{ClientConfig, FastLogClient, LogController, ReqwestTransport};

use fastlog_cli::args::Cli;
use fastlog_cli::{commands, telemetry};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    telemetry::init_subscriber(telemetry::get_subscriber("warn"))?;

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env().context("Reading client configuration")?;
    if let Some(origin) = cli.origin {
        config.origin = origin;
    }

    let transport = ReqwestTransport::new(&config).context("Building HTTP client")?;
    let controller = LogController::new(FastLogClient::new(&config.origin), transport);

    let outcome = commands::dispatch(
        &controller,
        cli.command,
        &mut io::stdout().lock(),
        &mut io::stderr(),
        |prompt| commands::confirm(prompt, &mut io::stdin().lock(), &mut io::stderr()),
    )
    .await
    .context("Writing output")?;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
