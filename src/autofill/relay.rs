//! Command Relay
//!
//! Forwards typed commands from the UI to the native layer's command entry
//! point and decodes the response. Every failure is converted into an
//! error result; the relay never lets a native failure propagate to its
//! caller and never retries.

use crate::autofill::command::{self, CommandInput, CommandResult};
use crate::autofill::native::NativeAutofillHandle;
use crate::error::{AutofillBridgeError, Result};
use crate::feature_flag::{FeatureFlag, FeatureGate};
use std::sync::Arc;
use tracing::{debug, error};

pub struct CommandRelay {
    gate: Arc<dyn FeatureGate>,
    native: Arc<dyn NativeAutofillHandle>,
}

impl CommandRelay {
    pub fn new(gate: Arc<dyn FeatureGate>, native: Arc<dyn NativeAutofillHandle>) -> Self {
        Self { gate, native }
    }

    /// Run a command against the native layer.
    ///
    /// Always returns a result value. When the feature gate is disabled the
    /// native layer is never contacted; transport and native failures
    /// surface as an error result carrying a diagnostic string.
    pub async fn run_command(&self, input: CommandInput) -> CommandResult {
        let flag = FeatureFlag::MacOsNativeCredentialSync;
        if !self.gate.is_enabled(flag).await {
            debug!(
                command = input.name(),
                "exiting run_command: {flag} feature flag is disabled"
            );
            return CommandResult::error(
                AutofillBridgeError::FeatureDisabled(flag).to_string(),
            );
        }

        match self.dispatch(&input).await {
            Ok(result) => {
                if let CommandResult::Error { error } = &result {
                    error!(
                        command = input.name(),
                        %error,
                        "autofill command returned an error"
                    );
                }
                result
            }
            Err(e) => {
                error!(command = input.name(), error = %e, "autofill command failed");
                CommandResult::error(e.to_string())
            }
        }
    }

    /// At most one native invocation per relay call
    async fn dispatch(&self, input: &CommandInput) -> Result<CommandResult> {
        let payload = input.encode()?;
        let raw = self.native.run_command(payload).await?;
        command::decode_result(input.namespace(), input.name(), &raw)
    }
}
