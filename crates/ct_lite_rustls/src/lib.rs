// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Expect-CT Lite enforcement for rustls clients.
//!
//! rustls has no CT support of its own, so this crate collects SCTs from the
//! leaf certificate and the stapled OCSP response and runs the registered
//! [`expect_ct_lite::CtValidationCallback`] from inside certificate
//! verification. A denial in strict mode fails the handshake with
//! `InvalidCertificate`.

pub mod collect;
pub mod error;
pub mod verifier;

pub use collect::{collect_scts, OCSP_SCT_LIST_OID};
pub use error::{CollectError, CtRejected, SetupError};
pub use verifier::CtLiteVerifier;

use std::sync::Arc;

use expect_ct_lite::{configure_ct_lite_enforcement, CtSettings, DiagnosticSink, ExpectCtLite};
use rustls::client::WebPkiServerVerifier;
use rustls::{ClientConfig, RootCertStore, SupportedProtocolVersion};

static TLS13_ONLY: &[&SupportedProtocolVersion] = &[&rustls::version::TLS13];

/// Builds a client configuration with webpki path validation over `roots`
/// and Expect-CT Lite enforcement reporting to `diag`. TLS 1.2 is the
/// minimum version unless `tls13_only` is set.
///
/// # Errors
///
/// Returns an error if `roots` is empty or the configuration is rejected by
/// rustls.
pub fn lite_client_config(
    roots: RootCertStore,
    tls13_only: bool,
    diag: Arc<dyn DiagnosticSink>,
) -> Result<ClientConfig, SetupError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let webpki =
        WebPkiServerVerifier::builder_with_provider(Arc::new(roots), provider.clone()).build()?;

    let mut settings = CtSettings::new();
    configure_ct_lite_enforcement(&mut settings, ExpectCtLite::with_sink(diag))?;
    let verifier = CtLiteVerifier::new(webpki, settings)?;

    let versions = if tls13_only {
        TLS13_ONLY
    } else {
        rustls::DEFAULT_VERSIONS
    };

    let config = ClientConfig::builder_with_provider(provider)
        .with_protocol_versions(versions)?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(verifier))
        .with_no_client_auth();
    Ok(config)
}
