// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

use thiserror::Error;

/// Reasons the Lite policy rejects a handshake. The messages double as the
/// diagnostic lines written when the rejection happens.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    #[error("No SCTs received, not considering this connection valid")]
    NoScts,

    #[error(
        "No SCTs were received via a CA-signed delivery method, not considering this connection valid"
    )]
    NoCaSignedSct,
}

/// Errors raised while wiring CT enforcement into a TLS client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CT validation must be enabled before a validation callback is registered")]
    CtNotEnabled,

    #[error("CT validation is enabled but no validation callback is registered")]
    NoValidationCallback,
}
