// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! The callback the TLS layer runs once it has collected a handshake's SCTs.

use std::sync::Arc;

use crate::diag::{DiagnosticSink, StderrSink};
use crate::policy::{Decision, LitePolicy, PolicyEvalContext, SctPolicy};
use crate::sct::Sct;

/// Whether the handshake may proceed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny,
}

impl Verdict {
    #[must_use]
    pub fn is_allow(self) -> bool {
        self == Verdict::Allow
    }
}

/// A CT validation callback. Runs on the handshake's own thread and only
/// borrows its arguments for the duration of the call.
pub trait CtValidationCallback: core::fmt::Debug + Send + Sync {
    fn validate(&self, ctx: &PolicyEvalContext<'_>, scts: &[Sct]) -> Verdict;
}

/// Expect-CT Lite enforcement: runs a policy, reports the outcome and maps it
/// to a verdict.
#[derive(Debug, Clone)]
pub struct ExpectCtLite<P = LitePolicy> {
    policy: P,
    diag: Arc<dyn DiagnosticSink>,
}

impl ExpectCtLite<LitePolicy> {
    /// Lite policy reporting to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(LitePolicy, Arc::new(StderrSink))
    }

    /// Lite policy reporting to `diag`.
    #[must_use]
    pub fn with_sink(diag: Arc<dyn DiagnosticSink>) -> Self {
        Self::with_policy(LitePolicy, diag)
    }
}

impl Default for ExpectCtLite<LitePolicy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SctPolicy> ExpectCtLite<P> {
    #[must_use]
    pub fn with_policy(policy: P, diag: Arc<dyn DiagnosticSink>) -> Self {
        Self { policy, diag }
    }

    /// Evaluates `scts` and writes the summary lines for the decision.
    pub fn decide(&self, ctx: &PolicyEvalContext<'_>, scts: &[Sct]) -> Decision {
        let decision = self.policy.evaluate(ctx, scts, self.diag.as_ref());
        match decision {
            Decision::Accept { total, ca_signed } => {
                self.diag.emit(&format!(
                    "Got {total} SCTs of which {ca_signed} were via CA-signed channels, \
                     considering this connection valid"
                ));
                self.diag.emit("SCT signatures have NOT been validated");
            }
            Decision::Reject(reason) => self.diag.emit(&reason.to_string()),
        }
        log::debug!("Expect-CT Lite decision over {} SCTs: {decision:?}", scts.len());
        decision
    }
}

impl<P: SctPolicy> CtValidationCallback for ExpectCtLite<P> {
    fn validate(&self, ctx: &PolicyEvalContext<'_>, scts: &[Sct]) -> Verdict {
        if self.decide(ctx, scts).is_accept() {
            Verdict::Allow
        } else {
            Verdict::Deny
        }
    }
}
