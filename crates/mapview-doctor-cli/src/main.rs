mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use mapview_doctor::config::DiagnosticConfig;
use mapview_doctor::diagnostics::{
    apply_remediation, format_diagnostic_report, DiagnosticReport, DiagnosticRunner, ReportOptions,
};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stderr keeps stdout clean for the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = DiagnosticConfig::load(cli.config.as_deref(), cli.flag_config())
        .context("invalid configuration")?;
    debug!(?config, "resolved configuration");

    let runner = DiagnosticRunner::native(&config).context("failed to set up probes")?;
    let mut findings = runner.run(&config).await;
    if cli.remediate {
        findings = apply_remediation(findings).await;
    }

    let report = DiagnosticReport::from_findings(findings);
    let options = ReportOptions {
        verbose: cli.verbose,
        json: cli.json,
    };
    let rendered =
        format_diagnostic_report(&report, &options).context("failed to render report")?;
    println!("{}", rendered);

    if cli.strict && !report.is_clean() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
