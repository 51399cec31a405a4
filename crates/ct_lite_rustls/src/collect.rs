// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Collecting SCTs from the three delivery channels of RFC 6962 section 3.3:
//! the certificate, a stapled OCSP response and the TLS extension.

use crate::error::CollectError;
use const_oid::{AssociatedOid, ObjectIdentifier};
use der::{asn1::OctetString, Decode, Encode};
use expect_ct_lite::sct::{HASH_SHA256, SCT_VERSION_V1, SIG_ECDSA, SIG_RSA};
use expect_ct_lite::{Sct, SctSource};
use x509_cert::ext::pkix::sct::{SignedCertificateTimestamp, SignedCertificateTimestampList};
use x509_cert::ext::Extension;
use x509_cert::serial_number::SerialNumber;
use x509_cert::Certificate;
use x509_ocsp::{BasicOcspResponse, OcspResponse, OcspResponseStatus};

/// OCSP single-response extension carrying an SCT list.
pub const OCSP_SCT_LIST_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.11129.2.4.5");

// Stands in for algorithms outside the TLS registry codes above.
const UNKNOWN_ALGORITHM: u8 = 0xff;

/// `id-pkix-ocsp-basic` response type.
const OCSP_BASIC_RESPONSE_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.48.1.1");

/// Collects every SCT the server presented, in channel order: certificate,
/// OCSP, TLS extension.
///
/// A channel that fails to parse is logged and contributes nothing. The leaf
/// has already passed path validation, so a parse failure here means a
/// malformed extension, and dropping SCTs can only make the policy stricter.
#[must_use]
pub fn collect_scts(
    end_entity: &[u8],
    ocsp_response: &[u8],
    tls_extension: Option<&[u8]>,
) -> Vec<Sct> {
    let mut scts = Vec::new();

    match Certificate::from_der(end_entity) {
        Ok(leaf) => {
            match scts_from_certificate(&leaf) {
                Ok(found) => scts.extend(found),
                Err(e) => log::warn!("Ignoring SCTs embedded in certificate: {e}"),
            }
            if !ocsp_response.is_empty() {
                match scts_from_ocsp_response(ocsp_response, &leaf.tbs_certificate.serial_number) {
                    Ok(found) => scts.extend(found),
                    Err(e) => log::warn!("Ignoring SCTs in stapled OCSP response: {e}"),
                }
            }
        }
        // Without the leaf's serial there's nothing to bind an OCSP response to.
        Err(e) => log::warn!("Ignoring certificate and OCSP SCTs, leaf does not parse: {e}"),
    }

    if let Some(raw) = tls_extension {
        match scts_from_tls_extension(raw) {
            Ok(found) => scts.extend(found),
            Err(e) => log::warn!("Ignoring SCTs from TLS extension: {e}"),
        }
    }

    log::debug!("Collected {} SCTs", scts.len());
    scts
}

/// Returns the SCTs embedded in `cert`, or none if it has no SCT list.
///
/// # Errors
///
/// Returns an error if the certificate has more than one SCT list or the list
/// is malformed.
pub fn scts_from_certificate(cert: &Certificate) -> Result<Vec<Sct>, CollectError> {
    match &cert.tbs_certificate.extensions {
        Some(extensions) => scts_from_extensions(
            extensions,
            SignedCertificateTimestampList::OID,
            SctSource::X509v3Extension,
        ),
        None => Ok(Vec::new()),
    }
}

/// Returns the SCTs stapled in a DER-encoded OCSP response for the
/// certificate with serial number `serial`. Responses about other
/// certificates are skipped. The OCSP signature is not checked.
///
/// # Errors
///
/// Returns an error if the response does not parse, is not a successful
/// basic response, or carries a malformed SCT list.
pub fn scts_from_ocsp_response(
    raw: &[u8],
    serial: &SerialNumber,
) -> Result<Vec<Sct>, CollectError> {
    let response = OcspResponse::from_der(raw)?;
    if !matches!(response.response_status, OcspResponseStatus::Successful) {
        return Err(CollectError::OcspNotSuccessful);
    }
    let bytes = response
        .response_bytes
        .ok_or(CollectError::MissingOcspResponseBytes)?;
    if bytes.response_type != OCSP_BASIC_RESPONSE_OID {
        return Err(CollectError::UnsupportedOcspResponseType(bytes.response_type));
    }
    let basic = BasicOcspResponse::from_der(bytes.response.as_bytes())?;

    let mut scts = Vec::new();
    for single in &basic.tbs_response_data.responses {
        if single.cert_id.serial_number != *serial {
            continue;
        }
        if let Some(extensions) = &single.single_extensions {
            scts.extend(scts_from_extensions(
                extensions,
                OCSP_SCT_LIST_OID,
                SctSource::OcspStapledResponse,
            )?);
        }
    }
    Ok(scts)
}

/// Returns the SCTs in the body of a `signed_certificate_timestamp` TLS
/// extension.
///
/// # Errors
///
/// Returns an error if the list is malformed.
pub fn scts_from_tls_extension(raw: &[u8]) -> Result<Vec<Sct>, CollectError> {
    // The extension body is the same TLS structure the X.509 extension wraps
    // in an OCTET STRING.
    let wrapped = OctetString::new(raw.to_vec())?.to_der()?;
    let list = SignedCertificateTimestampList::from_der(&wrapped)?;
    parse_sct_list(&list, SctSource::TlsExtension)
}

/// Finds the extension with `oid` and parses it as an SCT list.
///
/// # Errors
///
/// Returns an error if more than one extension has `oid` or if its SCT list
/// is malformed.
pub fn scts_from_extensions(
    extensions: &[Extension],
    oid: ObjectIdentifier,
    source: SctSource,
) -> Result<Vec<Sct>, CollectError> {
    // Per RFC 6962, all SCTs go in one extension. Reject multiple.
    let sct_extensions: Vec<&Extension> = extensions
        .iter()
        .filter(|ext| ext.extn_id == oid)
        .collect();

    let sct_ext = match sct_extensions.as_slice() {
        [] => return Ok(Vec::new()),
        [ext] => *ext,
        _ => return Err(CollectError::MultipleSctExtensions(sct_extensions.len())),
    };

    let list = SignedCertificateTimestampList::from_der(sct_ext.extn_value.as_bytes())?;
    parse_sct_list(&list, source)
}

fn parse_sct_list(
    list: &SignedCertificateTimestampList,
    source: SctSource,
) -> Result<Vec<Sct>, CollectError> {
    let raw_timestamps = list
        .parse_timestamps()
        .map_err(|e| CollectError::SctList(format!("{e:?}")))?;

    let mut scts = Vec::new();
    for (index, raw_ts) in raw_timestamps.iter().enumerate() {
        match raw_ts.parse_timestamp() {
            Ok(sct) => scts.push(convert_sct(&sct, source)?),
            Err(e) => log::debug!("Skipping unparseable SCT {index} from {source}: {e:?}"),
        }
    }
    Ok(scts)
}

fn convert_sct(sct: &SignedCertificateTimestamp, source: SctSource) -> Result<Sct, CollectError> {
    use x509_cert::ext::pkix::sct::{HashAlgorithm, SignatureAlgorithm};

    let log_id_slice = sct.log_id.key_id.as_ref();
    let log_id: [u8; 32] = log_id_slice
        .try_into()
        .map_err(|_| CollectError::InvalidLogId(log_id_slice.len()))?;

    let hash_algorithm = match sct.signature.algorithm.hash {
        HashAlgorithm::Sha256 => HASH_SHA256,
        _ => UNKNOWN_ALGORITHM,
    };
    let signature_algorithm = match sct.signature.algorithm.signature {
        SignatureAlgorithm::Rsa => SIG_RSA,
        SignatureAlgorithm::Ecdsa => SIG_ECDSA,
        _ => UNKNOWN_ALGORITHM,
    };

    Ok(Sct {
        // Only v1 SCTs deserialize.
        version: SCT_VERSION_V1,
        log_id,
        timestamp: sct.timestamp,
        extensions: sct.extensions.clone().into_vec(),
        hash_algorithm,
        signature_algorithm,
        signature: sct.signature.signature.clone().into_vec(),
        source,
    })
}
