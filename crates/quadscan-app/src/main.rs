// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadscan: flatten a photographed document.
//
// Entry point. Initialises logging, parses the command line, and runs one
// scan. On failure the failing stage is printed to stderr and the process
// exits non-zero.

mod cli;
mod services;

use std::process::ExitCode;

use clap::Parser;
use quadscan_core::error::Result;
use quadscan_core::human_errors::describe;

use cli::Cli;
use services::report::ScanReport;
use services::scan_service::{ScanRequest, ScanService};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!(image = %cli.image.display(), "Quadscan starting");

    match run(&cli).await {
        Ok(report) => {
            println!(
                "{} ({}x{}, {})",
                report.output.display(),
                report.output_width,
                report.output_height,
                report.orientation
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let failure = describe(&err);
            tracing::error!(stage = %failure.stage, error = %err, "Scan failed");
            eprintln!("{failure}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<ScanReport> {
    let service = ScanService::new(cli.scan_config()?)?;
    let request = ScanRequest {
        image: cli.image.clone(),
        output: cli.output_path(),
        events: cli.events.clone(),
        preview: cli.preview.clone(),
        report: cli.report.clone(),
    };
    service.scan(&request).await
}
