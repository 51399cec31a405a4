// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Expect-CT Lite policy. See <https://www.devever.net/~hl/expect-ct-lite>
//!
//! A connection is acceptable if at least one SCT arrived over a channel the
//! issuing CA signs. SCT signatures and log identities are not checked.

use crate::diag::DiagnosticSink;
use crate::error::PolicyError;
use crate::sct::Sct;
use crate::source::{classify, grade_line};

/// Minimum number of SCTs that must arrive via a CA-signed channel.
pub const MIN_CA_SIGNED_SCTS: usize = 1;

/// What the TLS layer knows about the certificate under evaluation. Lite
/// mode never looks at it.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolicyEvalContext<'a> {
    /// DER of the leaf certificate.
    pub cert: &'a [u8],
    /// DER of the issuing certificate, if the chain included it.
    pub issuer: Option<&'a [u8]>,
    /// Validation time in milliseconds since the Unix epoch.
    pub epoch_time_ms: u64,
}

/// Outcome of evaluating the SCTs of one handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Accept { total: usize, ca_signed: usize },
    Reject(PolicyError),
}

impl Decision {
    #[must_use]
    pub fn is_accept(&self) -> bool {
        matches!(self, Decision::Accept { .. })
    }
}

/// A policy deciding whether a set of SCTs is good enough.
pub trait SctPolicy: core::fmt::Debug + Send + Sync {
    fn evaluate(
        &self,
        ctx: &PolicyEvalContext<'_>,
        scts: &[Sct],
        diag: &dyn DiagnosticSink,
    ) -> Decision;
}

/// Requires [`MIN_CA_SIGNED_SCTS`] SCTs delivered in the certificate or in a
/// stapled OCSP response.
#[derive(Clone, Copy, Debug, Default)]
pub struct LitePolicy;

impl SctPolicy for LitePolicy {
    fn evaluate(
        &self,
        _ctx: &PolicyEvalContext<'_>,
        scts: &[Sct],
        diag: &dyn DiagnosticSink,
    ) -> Decision {
        if scts.is_empty() {
            return Decision::Reject(PolicyError::NoScts);
        }

        diag.emit("SCTs:");
        let mut ca_signed = 0;
        for sct in scts {
            diag.emit(&format!("{sct}{}", grade_line(sct)));
            if classify(sct).is_ca_signed() {
                ca_signed += 1;
            }
        }

        if ca_signed < MIN_CA_SIGNED_SCTS {
            return Decision::Reject(PolicyError::NoCaSignedSct);
        }

        Decision::Accept {
            total: scts.len(),
            ca_signed,
        }
    }
}
