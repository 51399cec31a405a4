// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

use const_oid::ObjectIdentifier;
use expect_ct_lite::ConfigError;
use thiserror::Error;

/// Errors reading SCTs out of a delivery channel.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error(transparent)]
    Der(#[from] der::Error),

    #[error("found {0} SCT list extensions, expected at most 1")]
    MultipleSctExtensions(usize),

    #[error("failed to parse SCT list: {0}")]
    SctList(String),

    #[error("log ID has invalid length: {0} (expected 32)")]
    InvalidLogId(usize),

    #[error("OCSP response status is not successful")]
    OcspNotSuccessful,

    #[error("OCSP response has no response bytes")]
    MissingOcspResponseBytes,

    #[error("unsupported OCSP response type {0}")]
    UnsupportedOcspResponseType(ObjectIdentifier),
}

/// The handshake was aborted by CT enforcement.
#[derive(Error, Debug)]
#[error("Expect-CT Lite: server did not present sufficient SCTs")]
pub struct CtRejected;

/// Errors building a CT-enforcing client configuration.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("CT configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("certificate verifier: {0}")]
    Verifier(#[from] rustls::client::VerifierBuilderError),

    #[error("TLS configuration: {0}")]
    Tls(#[from] rustls::Error),
}
