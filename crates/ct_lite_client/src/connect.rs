// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

use anyhow::Context;
use der::Encode;
use rustls::pki_types::{CertificateDer, ServerName};
use rustls::{ClientConfig, ClientConnection, RootCertStore};
use std::net::TcpStream;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use x509_cert::Certificate;

use crate::cli::Target;

/// Builds the trust store from the bundled Mozilla roots and/or a PEM file.
pub fn root_store(ca_file: Option<&Path>, use_webpki_roots: bool) -> anyhow::Result<RootCertStore> {
    let mut roots = if use_webpki_roots {
        RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned())
    } else {
        RootCertStore::empty()
    };

    if let Some(path) = ca_file {
        let pem = std::fs::read(path)
            .with_context(|| format!("failed to read CA file {}", path.display()))?;
        let certs = Certificate::load_pem_chain(&pem)
            .with_context(|| format!("failed to parse CA file {}", path.display()))?;
        for cert in certs {
            roots
                .add(CertificateDer::from(cert.to_der()?))
                .with_context(|| format!("unusable root {}", cert.tbs_certificate.subject))?;
        }
        debug!(path = %path.display(), "loaded extra roots");
    }

    Ok(roots)
}

/// Connects to `target` and drives the TLS handshake to completion.
pub fn handshake(target: &Target, config: Arc<ClientConfig>) -> anyhow::Result<()> {
    let server_name = ServerName::try_from(target.host.clone())
        .with_context(|| format!("invalid server name {:?}", target.host))?;

    let mut sock = TcpStream::connect((target.host.as_str(), target.port))
        .with_context(|| format!("failed to connect to {}:{}", target.host, target.port))?;
    info!(host = %target.host, port = target.port, "connected, starting handshake");

    let mut conn = ClientConnection::new(config, server_name)?;
    while conn.is_handshaking() {
        conn.complete_io(&mut sock).context("TLS handshake failed")?;
    }
    debug!(version = ?conn.protocol_version(), "handshake complete");

    Ok(())
}
