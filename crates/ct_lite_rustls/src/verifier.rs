// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! A rustls certificate verifier that runs CT validation after path
//! validation.

use std::sync::Arc;

use expect_ct_lite::{ConfigError, CtSettings, CtValidationMode, PolicyEvalContext, Verdict};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{
    CertificateError, DigitallySignedStruct, Error as TlsError, OtherError, SignatureScheme,
};

use crate::collect::collect_scts;
use crate::error::CtRejected;

/// Wraps a verifier (normally webpki) with CT enforcement.
#[derive(Debug)]
pub struct CtLiteVerifier {
    inner: Arc<dyn ServerCertVerifier>,
    settings: CtSettings,
}

impl CtLiteVerifier {
    /// # Errors
    ///
    /// Returns an error if `settings` enable CT without a validation callback.
    pub fn new(
        inner: Arc<dyn ServerCertVerifier>,
        settings: CtSettings,
    ) -> Result<Self, ConfigError> {
        settings.check()?;
        Ok(Self { inner, settings })
    }

    #[must_use]
    pub fn settings(&self) -> &CtSettings {
        &self.settings
    }

    /// Runs the CT validation callback over the SCTs the server presented.
    fn enforce_ct(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> Result<(), CtRejected> {
        let (Some(mode), Some(callback)) =
            (self.settings.validation_mode(), self.settings.callback())
        else {
            return Ok(());
        };

        let cert: &[u8] = end_entity.as_ref();
        // rustls does not expose the signed_certificate_timestamp extension.
        let scts = collect_scts(cert, ocsp_response, None);
        let ctx = PolicyEvalContext {
            cert,
            issuer: intermediates.first().map(|c| c.as_ref()),
            epoch_time_ms: now.as_secs().saturating_mul(1000),
        };

        let verdict = callback.validate(&ctx, &scts);
        match mode {
            // Strict mode never accepts a handshake without SCTs, whatever
            // the callback says.
            CtValidationMode::Strict if scts.is_empty() => {
                if verdict.is_allow() {
                    log::warn!("CT callback allowed a handshake with no SCTs, rejecting");
                }
                Err(CtRejected)
            }
            CtValidationMode::Strict => match verdict {
                Verdict::Allow => Ok(()),
                Verdict::Deny => Err(CtRejected),
            },
            CtValidationMode::Permissive => {
                if !verdict.is_allow() {
                    log::warn!("CT validation failed, continuing in permissive mode");
                }
                Ok(())
            }
        }
    }
}

impl ServerCertVerifier for CtLiteVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> Result<ServerCertVerified, TlsError> {
        let verified = self.inner.verify_server_cert(
            end_entity,
            intermediates,
            server_name,
            ocsp_response,
            now,
        )?;

        self.enforce_ct(end_entity, intermediates, ocsp_response, now)
            .map_err(|e| {
                TlsError::InvalidCertificate(CertificateError::Other(OtherError(Arc::new(e))))
            })?;

        Ok(verified)
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        self.inner.verify_tls12_signature(message, cert, dss)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        self.inner.verify_tls13_signature(message, cert, dss)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.inner.supported_verify_schemes()
    }
}
