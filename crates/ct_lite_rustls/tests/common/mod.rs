// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! DER builders for a two-certificate PKI (CA and leaf) with SCTs in the
//! leaf's extension and in stapled OCSP responses. Certificates carry real
//! P-256 signatures so webpki accepts them.

#![allow(dead_code)]

use const_oid::ObjectIdentifier;
use der::Encode;
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use p256::pkcs8::{EncodePrivateKey, EncodePublicKey};

pub const SERVER_NAME: &str = "localhost";
pub const LEAF_SERIAL: u8 = 0x11;

const CT_PRECERT_SCTS: &str = "1.3.6.1.4.1.11129.2.4.2";
const CT_OCSP_SCTS: &str = "1.3.6.1.4.1.11129.2.4.5";
const ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
const OCSP_BASIC: &str = "1.3.6.1.5.5.7.48.1.1";

pub fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    let len = content.len();
    if len < 0x80 {
        out.push(len as u8);
    } else {
        let bytes = len.to_be_bytes();
        let skip = bytes.iter().take_while(|b| **b == 0).count();
        out.push(0x80 | (bytes.len() - skip) as u8);
        out.extend_from_slice(&bytes[skip..]);
    }
    out.extend_from_slice(content);
    out
}

pub fn seq(parts: &[Vec<u8>]) -> Vec<u8> {
    tlv(0x30, &parts.concat())
}

fn oid(dotted: &str) -> Vec<u8> {
    ObjectIdentifier::new(dotted).unwrap().to_der().unwrap()
}

fn octets(bytes: &[u8]) -> Vec<u8> {
    tlv(0x04, bytes)
}

fn explicit(tag_number: u8, inner: &[u8]) -> Vec<u8> {
    tlv(0xa0 | tag_number, inner)
}

fn small_int(value: u8) -> Vec<u8> {
    assert!(value < 0x80);
    tlv(0x02, &[value])
}

fn bit_string(bytes: &[u8]) -> Vec<u8> {
    let mut content = vec![0];
    content.extend_from_slice(bytes);
    tlv(0x03, &content)
}

fn ecdsa_with_sha256() -> Vec<u8> {
    seq(&[oid(ECDSA_WITH_SHA256)])
}

fn name(common_name: &str) -> Vec<u8> {
    let attribute = seq(&[oid("2.5.4.3"), tlv(0x0c, common_name.as_bytes())]);
    seq(&[tlv(0x31, &attribute)])
}

fn extension(id: &str, critical: bool, value: &[u8]) -> Vec<u8> {
    let mut parts = vec![oid(id)];
    if critical {
        parts.push(tlv(0x01, &[0xff]));
    }
    parts.push(octets(value));
    seq(&parts)
}

/// TLS encoding of a v1 SCT with an ECDSA/SHA-256 signature.
pub fn tls_sct(log_byte: u8, timestamp: u64) -> Vec<u8> {
    let mut out = vec![0u8];
    out.extend_from_slice(&[log_byte; 32]);
    out.extend_from_slice(&timestamp.to_be_bytes());
    out.extend_from_slice(&[0, 0]);
    out.extend_from_slice(&[4, 3]);
    let signature = [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01];
    out.extend_from_slice(&(signature.len() as u16).to_be_bytes());
    out.extend_from_slice(&signature);
    out
}

/// TLS encoding of a `SignedCertificateTimestampList` with one SCT per log.
pub fn tls_sct_list(log_bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    for (i, log_byte) in log_bytes.iter().enumerate() {
        let sct = tls_sct(*log_byte, 1_700_000_000_000 + i as u64);
        body.extend_from_slice(&(sct.len() as u16).to_be_bytes());
        body.extend_from_slice(&sct);
    }
    let mut out = (body.len() as u16).to_be_bytes().to_vec();
    out.extend_from_slice(&body);
    out
}

/// An SCT list extension value: the TLS list wrapped in an OCTET STRING.
fn sct_list_extension(id: &str, log_bytes: &[u8]) -> Vec<u8> {
    extension(id, false, &octets(&tls_sct_list(log_bytes)))
}

fn certificate(
    serial: u8,
    issuer: &str,
    subject: &str,
    subject_key: &SigningKey,
    issuer_key: &SigningKey,
    extensions: &[Vec<u8>],
) -> Vec<u8> {
    let spki = subject_key
        .verifying_key()
        .to_public_key_der()
        .unwrap()
        .as_bytes()
        .to_vec();
    let tbs = seq(&[
        explicit(0, &small_int(2)),
        small_int(serial),
        ecdsa_with_sha256(),
        name(issuer),
        seq(&[tlv(0x17, b"200101000000Z"), tlv(0x17, b"491231235959Z")]),
        name(subject),
        spki,
        explicit(3, &seq(extensions)),
    ]);
    let signature: Signature = issuer_key.sign(&tbs);
    seq(&[tbs, ecdsa_with_sha256(), bit_string(signature.to_der().as_bytes())])
}

/// A CA and a leaf for [`SERVER_NAME`] issued by it.
pub struct TestPki {
    pub ca: Vec<u8>,
    pub leaf: Vec<u8>,
    pub leaf_key: SigningKey,
}

impl TestPki {
    /// Issues the leaf with an embedded SCT list from `embedded_logs`, or no
    /// SCT extension if empty.
    pub fn new(embedded_logs: &[u8]) -> Self {
        let ca_key = SigningKey::from_slice(&[7u8; 32]).unwrap();
        let leaf_key = SigningKey::from_slice(&[9u8; 32]).unwrap();

        let basic_constraints = extension("2.5.29.19", true, &seq(&[tlv(0x01, &[0xff])]));
        let ca = certificate(1, "Test CA", "Test CA", &ca_key, &ca_key, &[basic_constraints]);

        let san = extension("2.5.29.17", false, &seq(&[tlv(0x82, SERVER_NAME.as_bytes())]));
        let server_auth = extension("2.5.29.37", false, &seq(&[oid("1.3.6.1.5.5.7.3.1")]));
        let mut extensions = vec![san, server_auth];
        if !embedded_logs.is_empty() {
            extensions.push(sct_list_extension(CT_PRECERT_SCTS, embedded_logs));
        }
        let leaf = certificate(
            LEAF_SERIAL,
            "Test CA",
            SERVER_NAME,
            &leaf_key,
            &ca_key,
            &extensions,
        );

        Self { ca, leaf, leaf_key }
    }

    /// The leaf key as PKCS#8 DER.
    pub fn leaf_key_der(&self) -> Vec<u8> {
        self.leaf_key.to_pkcs8_der().unwrap().as_bytes().to_vec()
    }
}

/// A successful basic OCSP response with one `SingleResponse` per
/// `(serial, log)` entry, each carrying a one-SCT list single-extension.
/// The response signature is a placeholder.
pub fn ocsp_response(entries: &[(u8, u8)]) -> Vec<u8> {
    let sha1 = seq(&[oid("1.3.14.3.2.26"), vec![0x05, 0x00]]);
    let produced_at = tlv(0x18, b"20250101000000Z");

    let responses: Vec<Vec<u8>> = entries
        .iter()
        .map(|&(serial, log)| {
            let cert_id = seq(&[
                sha1.clone(),
                octets(&[0; 20]),
                octets(&[0; 20]),
                small_int(serial),
            ]);
            // certStatus good: [0] IMPLICIT NULL
            seq(&[
                cert_id,
                vec![0x80, 0x00],
                produced_at.clone(),
                explicit(1, &seq(&[sct_list_extension(CT_OCSP_SCTS, &[log])])),
            ])
        })
        .collect();

    // responderID byKey: [2] EXPLICIT KeyHash
    let tbs = seq(&[explicit(2, &octets(&[0; 20])), produced_at, seq(&responses)]);
    let basic = seq(&[tbs, ecdsa_with_sha256(), bit_string(&[0])]);

    seq(&[
        tlv(0x0a, &[0]),
        explicit(0, &seq(&[oid(OCSP_BASIC), octets(&basic)])),
    ])
}

/// An OCSP response with a non-successful status and no body.
pub fn ocsp_error_response(status: u8) -> Vec<u8> {
    seq(&[tlv(0x0a, &[status])])
}
