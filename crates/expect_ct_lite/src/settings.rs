// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! CT settings of a TLS client and the Expect-CT Lite setup routine.

use std::sync::Arc;

use crate::error::ConfigError;
use crate::hook::{CtValidationCallback, ExpectCtLite};
use crate::policy::SctPolicy;

/// What the TLS layer does with a denying callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CtValidationMode {
    /// Log the denial and let the handshake continue.
    Permissive,
    /// Abort the handshake.
    Strict,
}

/// CT validation state for a TLS client. CT is disabled until
/// [`CtSettings::enable_ct`] is called.
#[derive(Clone, Debug, Default)]
pub struct CtSettings {
    mode: Option<CtValidationMode>,
    callback: Option<Arc<dyn CtValidationCallback>>,
}

impl CtSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable_ct(&mut self, mode: CtValidationMode) {
        self.mode = Some(mode);
    }

    /// Turns CT validation off and drops any registered callback.
    pub fn disable_ct(&mut self) {
        self.mode = None;
        self.callback = None;
    }

    /// Registers the callback that decides whether SCTs are acceptable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CtNotEnabled`] if CT validation has not been
    /// enabled; a callback on its own would never run.
    pub fn set_ct_validation_callback(
        &mut self,
        callback: Arc<dyn CtValidationCallback>,
    ) -> Result<(), ConfigError> {
        if self.mode.is_none() {
            return Err(ConfigError::CtNotEnabled);
        }
        self.callback = Some(callback);
        Ok(())
    }

    #[must_use]
    pub fn validation_mode(&self) -> Option<CtValidationMode> {
        self.mode
    }

    #[must_use]
    pub fn is_ct_enabled(&self) -> bool {
        self.mode.is_some()
    }

    #[must_use]
    pub fn callback(&self) -> Option<&Arc<dyn CtValidationCallback>> {
        self.callback.as_ref()
    }

    /// Checks the settings are usable by a TLS client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoValidationCallback`] if CT is enabled with no
    /// callback to run.
    pub fn check(&self) -> Result<(), ConfigError> {
        match (self.mode, &self.callback) {
            (Some(_), None) => Err(ConfigError::NoValidationCallback),
            (None, Some(_)) => Err(ConfigError::CtNotEnabled),
            _ => Ok(()),
        }
    }
}

/// Configures `settings` for Expect-CT Lite enforcement: strict CT validation
/// with `hook` as the validation callback. Both steps are required.
///
/// # Errors
///
/// Returns an error if the callback cannot be registered.
pub fn configure_ct_lite_enforcement<P: SctPolicy + 'static>(
    settings: &mut CtSettings,
    hook: ExpectCtLite<P>,
) -> Result<(), ConfigError> {
    settings.enable_ct(CtValidationMode::Strict);
    settings.set_ct_validation_callback(Arc::new(hook))
}
