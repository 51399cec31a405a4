// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Expect-CT Lite enforcement for TLS clients.
//!
//! The policy:
//! - At least one SCT must be delivered via a CA-signed channel (embedded in
//!   the certificate, or in a stapled OCSP response)
//! - SCTs from the TLS extension are listed but never count as CA-signed
//! - SCTs from unrecognized channels are treated like TLS extension SCTs
//!
//! SCT signatures are not verified and no log list is consulted, so the
//! guarantee rests on the CA having submitted the certificate to a log.
//!
//! The crate does not depend on any TLS library. A TLS integration collects
//! the SCTs of a handshake, runs the registered [`CtValidationCallback`] and
//! aborts the handshake on [`Verdict::Deny`] when [`CtValidationMode::Strict`]
//! is set.

pub mod diag;
pub mod error;
pub mod hook;
pub mod policy;
pub mod sct;
pub mod settings;
pub mod source;

pub use diag::{DiagnosticSink, MemorySink, StderrSink};
pub use error::{ConfigError, PolicyError};
pub use hook::{CtValidationCallback, ExpectCtLite, Verdict};
pub use policy::{Decision, LitePolicy, PolicyEvalContext, SctPolicy, MIN_CA_SIGNED_SCTS};
pub use sct::{Sct, SctSource};
pub use settings::{configure_ct_lite_enforcement, CtSettings, CtValidationMode};
pub use source::{classify, SctGrade};
