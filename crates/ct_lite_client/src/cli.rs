// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 443;

/// Connect to a TLS server, requiring at least one SCT delivered via a
/// CA-signed channel (Expect-CT Lite).
#[derive(Parser, Debug)]
#[command(name = "ct_lite_client", version)]
pub struct Cli {
    /// Server to connect to, as HOST[:PORT]. IPv6 literals go in brackets.
    pub target: String,

    /// PEM file with additional trusted root certificates
    #[arg(long)]
    pub ca_file: Option<PathBuf>,

    /// Require TLS 1.3 instead of the TLS 1.2 minimum
    #[arg(long)]
    pub tls13_only: bool,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// A server to connect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

/// Splits `HOST[:PORT]`. `[v6addr]:port` and bare IPv6 addresses without a
/// port are accepted.
pub fn parse_target(s: &str) -> anyhow::Result<Target> {
    let (host, port) = if let Some(rest) = s.strip_prefix('[') {
        let (host, after) = rest
            .split_once(']')
            .ok_or_else(|| anyhow!("unterminated '[' in {s:?}"))?;
        let port = match after {
            "" => None,
            _ => Some(
                after
                    .strip_prefix(':')
                    .ok_or_else(|| anyhow!("unexpected {after:?} after ']' in {s:?}"))?,
            ),
        };
        (host, port)
    } else if s.matches(':').count() > 1 {
        (s, None)
    } else {
        match s.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (s, None),
        }
    };

    if host.is_empty() {
        bail!("missing host in {s:?}");
    }
    let port = match port {
        Some(p) => p
            .parse::<u16>()
            .with_context(|| format!("invalid port {p:?}"))?,
        None => DEFAULT_PORT,
    };

    Ok(Target {
        host: host.to_string(),
        port,
    })
}
