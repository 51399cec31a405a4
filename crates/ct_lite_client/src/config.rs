// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Client configuration, read from an optional JSON file and overridden by
//! command-line flags.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientSettings {
    /// PEM file with additional trusted roots.
    pub ca_file: Option<PathBuf>,
    /// Trust the bundled Mozilla root set.
    #[serde(default = "default_webpki_roots")]
    pub webpki_roots: bool,
    #[serde(default)]
    pub tls13_only: bool,
    pub logging_level: Option<String>,
}

fn default_webpki_roots() -> bool {
    true
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            ca_file: None,
            webpki_roots: default_webpki_roots(),
            tls13_only: false,
            logging_level: None,
        }
    }
}

impl ClientSettings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Applies command-line flags on top of the file settings.
    #[must_use]
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(ca_file) = &cli.ca_file {
            self.ca_file = Some(ca_file.clone());
        }
        self.tls13_only |= cli.tls13_only;
        if cli.verbose {
            self.logging_level = Some("debug".to_string());
        }
        self
    }

    /// The log level to run at; warnings only unless configured otherwise.
    pub fn log_level(&self) -> anyhow::Result<tracing::Level> {
        match &self.logging_level {
            Some(level) => level
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid logging_level {level:?}")),
            None => Ok(tracing::Level::WARN),
        }
    }
}
