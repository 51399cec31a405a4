// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Connects to a TLS server with Expect-CT Lite enforcement and reports
//! whether the handshake succeeded.

mod cli;
mod config;
mod connect;

use clap::Parser;
use ct_lite_rustls::lite_client_config;
use expect_ct_lite::StderrSink;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

use cli::{parse_target, Cli};
use config::ClientSettings;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => ClientSettings::load(path)?,
        None => ClientSettings::default(),
    }
    .with_cli(cli);

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level()?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let target = parse_target(&cli.target)?;
    let roots = connect::root_store(settings.ca_file.as_deref(), settings.webpki_roots)?;
    info!(roots = roots.len(), tls13_only = settings.tls13_only, "trust store ready");

    let config = lite_client_config(roots, settings.tls13_only, Arc::new(StderrSink))?;
    connect::handshake(&target, Arc::new(config))?;

    eprintln!("Successfully connected");
    Ok(())
}
