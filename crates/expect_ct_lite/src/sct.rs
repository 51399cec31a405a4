// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! The SCT record handed to the policy by the TLS layer.

use core::fmt;

/// SCT version number for RFC 6962 v1 SCTs.
pub const SCT_VERSION_V1: u8 = 0;

/// Hash algorithm code for SHA-256 in the TLS `HashAlgorithm` registry.
pub const HASH_SHA256: u8 = 4;
/// Signature algorithm codes in the TLS `SignatureAlgorithm` registry.
pub const SIG_RSA: u8 = 1;
pub const SIG_ECDSA: u8 = 3;

/// Bytes per line when printing log IDs and signatures.
const HEX_BYTES_PER_LINE: usize = 16;

/// How an SCT reached the client.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SctSource {
    /// Embedded in the leaf certificate's SCT list extension.
    X509v3Extension,
    /// Inside a stapled OCSP response.
    OcspStapledResponse,
    /// In the `signed_certificate_timestamp` TLS extension.
    TlsExtension,
    /// Not set, or a channel this crate does not know about.
    Unknown,
}

impl fmt::Display for SctSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SctSource::X509v3Extension => write!(f, "X509v3"),
            SctSource::OcspStapledResponse => write!(f, "OCSP"),
            SctSource::TlsExtension => write!(f, "TLS extension"),
            SctSource::Unknown => write!(f, "unknown source"),
        }
    }
}

/// A received SCT. Signatures are carried for display only and are never
/// checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sct {
    pub version: u8,
    /// SHA-256 hash of the issuing log's public key.
    pub log_id: [u8; 32],
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub extensions: Vec<u8>,
    /// TLS `HashAlgorithm` code.
    pub hash_algorithm: u8,
    /// TLS `SignatureAlgorithm` code.
    pub signature_algorithm: u8,
    pub signature: Vec<u8>,
    pub source: SctSource,
}

impl Sct {
    /// Returns a v1 SCT with empty extensions and signature, delivered via
    /// `source`.
    #[must_use]
    pub fn new(source: SctSource, log_id: [u8; 32], timestamp: u64) -> Self {
        Self {
            version: SCT_VERSION_V1,
            log_id,
            timestamp,
            extensions: Vec::new(),
            hash_algorithm: HASH_SHA256,
            signature_algorithm: SIG_ECDSA,
            signature: Vec::new(),
            source,
        }
    }

    fn signature_name(&self) -> Option<&'static str> {
        match (self.hash_algorithm, self.signature_algorithm) {
            (HASH_SHA256, SIG_ECDSA) => Some("ecdsa-with-SHA256"),
            (HASH_SHA256, SIG_RSA) => Some("sha256WithRSAEncryption"),
            _ => None,
        }
    }
}

// Laid out like OpenSSL's SCT_print with an indent of 2.
impl fmt::Display for Sct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Signed Certificate Timestamp:")?;
        if self.version == SCT_VERSION_V1 {
            writeln!(f, "    Version   : v1 (0x0)")?;
        } else {
            writeln!(f, "    Version   : unknown")?;
        }

        write!(f, "    Log ID    : ")?;
        write_hex_block(f, &self.log_id)?;

        write!(f, "    Timestamp : ")?;
        match i64::try_from(self.timestamp)
            .ok()
            .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
        {
            Some(dt) => writeln!(f, "{}", dt.format("%b %e %H:%M:%S%.3f %Y GMT"))?,
            None => writeln!(f, "{} ms (out of range)", self.timestamp)?,
        }

        write!(f, "    Extensions: ")?;
        if self.extensions.is_empty() {
            writeln!(f, "none")?;
        } else {
            write_hex_block(f, &self.extensions)?;
        }

        write!(f, "    Signature : ")?;
        match self.signature_name() {
            Some(name) => writeln!(f, "{name}")?,
            None => writeln!(
                f,
                "UNKNOWN (hash 0x{:02x}, sig 0x{:02x})",
                self.hash_algorithm, self.signature_algorithm
            )?,
        }
        write!(f, "                ")?;
        write_hex_block(f, &self.signature)
    }
}

fn write_hex_block(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    if bytes.is_empty() {
        return writeln!(f);
    }
    for (i, chunk) in bytes.chunks(HEX_BYTES_PER_LINE).enumerate() {
        if i > 0 {
            write!(f, "                ")?;
        }
        let line = chunk
            .iter()
            .map(|b| hex::encode_upper([*b]))
            .collect::<Vec<_>>()
            .join(":");
        writeln!(f, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_like_sct_print() {
        let mut sct = Sct::new(SctSource::X509v3Extension, [0xab; 32], 1_679_479_872_345);
        sct.signature = vec![0x30, 0x45, 0x02];

        let text = sct.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "  Signed Certificate Timestamp:");
        assert_eq!(lines[1], "    Version   : v1 (0x0)");
        assert!(lines[2].starts_with("    Log ID    : AB:AB:"));
        // 32-byte log ID wraps onto a second line
        assert!(lines[3].starts_with("                AB:AB:"));
        assert_eq!(lines[4], "    Timestamp : Mar 22 10:11:12.345 2023 GMT");
        assert_eq!(lines[5], "    Extensions: none");
        assert_eq!(lines[6], "    Signature : ecdsa-with-SHA256");
        assert_eq!(lines[7], "                30:45:02");
    }

    #[test]
    fn unknown_algorithms_and_versions_still_print() {
        let mut sct = Sct::new(SctSource::Unknown, [0; 32], u64::MAX);
        sct.version = 7;
        sct.hash_algorithm = 9;
        sct.signature_algorithm = 9;
        sct.extensions = vec![1, 2];

        let text = sct.to_string();
        assert!(text.contains("Version   : unknown"));
        assert!(text.contains("(out of range)"));
        assert!(text.contains("Extensions: 01:02"));
        assert!(text.contains("UNKNOWN (hash 0x09, sig 0x09)"));
    }

    #[test]
    fn source_names() {
        assert_eq!(SctSource::X509v3Extension.to_string(), "X509v3");
        assert_eq!(SctSource::OcspStapledResponse.to_string(), "OCSP");
        assert_eq!(SctSource::TlsExtension.to_string(), "TLS extension");
        assert_eq!(SctSource::Unknown.to_string(), "unknown source");
    }
}
