// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Grading SCTs by how they were delivered.
//!
//! SCTs can arrive in the certificate, in a stapled OCSP response, or in a TLS
//! extension. Only the first two are covered by a CA signature.

use crate::sct::{Sct, SctSource};

/// How much a delivery channel vouches for an SCT.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SctGrade {
    /// Delivered inside data signed by the issuing CA or its OCSP responder.
    CaSigned,
    /// Delivered by the server with no CA signature binding it.
    Bare,
    /// Delivered by a channel we do not recognize. Counts as not CA-signed.
    Unknown,
}

impl SctGrade {
    #[must_use]
    pub fn of_source(source: SctSource) -> Self {
        match source {
            SctSource::X509v3Extension | SctSource::OcspStapledResponse => SctGrade::CaSigned,
            SctSource::TlsExtension => SctGrade::Bare,
            SctSource::Unknown => SctGrade::Unknown,
        }
    }

    #[must_use]
    pub fn is_ca_signed(self) -> bool {
        self == SctGrade::CaSigned
    }

    fn label(self) -> &'static str {
        match self {
            SctGrade::CaSigned => "CA-signed",
            SctGrade::Bare => "not CA-signed",
            SctGrade::Unknown => "assuming not CA-signed",
        }
    }
}

/// Grades an SCT by its delivery source.
#[must_use]
pub fn classify(sct: &Sct) -> SctGrade {
    SctGrade::of_source(sct.source)
}

/// The per-SCT diagnostic line, e.g.
/// `    ==> Got an SCT delivered via OCSP (CA-signed)`.
#[must_use]
pub fn grade_line(sct: &Sct) -> String {
    format!(
        "    ==> Got an SCT delivered via {} ({})",
        sct.source,
        classify(sct).label()
    )
}
