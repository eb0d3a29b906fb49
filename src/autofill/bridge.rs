//! Autofill Bridge
//!
//! Event server and completion channel between the OS credential
//! subsystem and the UI process. The bridge owns the session state
//! (readiness flag, message buffer, pending-request map) and is handed to
//! the native layer as its event handler.

use crate::autofill::command::{CommandInput, CommandResult};
use crate::autofill::native::{NativeAutofillHandle, NativeEventHandler, NativeEventPayload};
use crate::autofill::relay::CommandRelay;
use crate::autofill::session::{PendingKind, RequestKey, SessionState};
use crate::autofill::types::{
    NativeStatus, PasskeyAssertionRequest, PasskeyAssertionResponse,
    PasskeyAssertionWithoutUserInterfaceRequest, PasskeyRegistrationRequest,
    PasskeyRegistrationResponse,
};
use crate::autofill::ui::{channels, UiSurface};
use crate::config::{BridgeConfig, FlushPolicy};
use crate::error::{AutofillBridgeError, Result};
use crate::feature_flag::{FeatureFlag, FeatureGate};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

pub struct AutofillBridge {
    gate: Arc<dyn FeatureGate>,
    native: Arc<dyn NativeAutofillHandle>,
    ui: Arc<dyn UiSurface>,
    relay: CommandRelay,
    config: BridgeConfig,
    session: Mutex<SessionState>,
}

impl AutofillBridge {
    pub fn new(
        gate: Arc<dyn FeatureGate>,
        native: Arc<dyn NativeAutofillHandle>,
        ui: Arc<dyn UiSurface>,
        config: BridgeConfig,
    ) -> Self {
        let relay = CommandRelay::new(gate.clone(), native.clone());
        Self {
            gate,
            native,
            ui,
            relay,
            config,
            session: Mutex::new(SessionState::new()),
        }
    }

    /// Run a typed command against the native layer on behalf of the UI
    pub async fn run_command(&self, input: CommandInput) -> CommandResult {
        self.relay.run_command(input).await
    }

    /// UI signal that its event listener is attached. Sets the readiness
    /// flag and flushes the message buffer in FIFO order.
    pub async fn listener_ready(&self) -> Result<()> {
        let flag = FeatureFlag::MacOsNativeCredentialSync;
        if !self.gate.is_enabled(flag).await {
            debug!("ignoring listener_ready: {flag} feature flag is disabled");
            return Ok(());
        }

        let mut session = self.session.lock().await;
        session.mark_listener_ready();

        if !self.ui.is_attached() {
            return match self.config.flush_policy {
                FlushPolicy::Drop => {
                    error!(
                        "Cannot flush message buffer - no UI surface attached; dropping {} messages",
                        session.buffered_len()
                    );
                    session.clear_buffer();
                    Ok(())
                }
                FlushPolicy::Requeue => {
                    warn!(
                        "Cannot flush message buffer - no UI surface attached; keeping {} messages queued",
                        session.buffered_len()
                    );
                    Ok(())
                }
                FlushPolicy::Escalate => {
                    error!("Cannot flush message buffer - no UI surface attached");
                    Err(AutofillBridgeError::DeliveryUnavailable)
                }
            };
        }

        let messages = session.drain_buffer();
        info!("Listener is ready, flushing {} buffered messages", messages.len());
        for message in messages {
            self.ui.send(message.channel, message.data);
        }

        Ok(())
    }

    /// UI acknowledgement of a delivered registration event
    pub async fn complete_passkey_registration(
        &self,
        client_id: u32,
        sequence_number: u32,
        response: PasskeyRegistrationResponse,
    ) -> Result<()> {
        let key = RequestKey::new(client_id, sequence_number);
        if !self.check_gate_or_complete_error(key).await {
            return Ok(());
        }

        debug!(client_id, sequence_number, "completing passkey registration");
        self.take_pending_of_kind(key, |kind| matches!(kind, PendingKind::Registration))
            .await?;
        self.native
            .complete_registration(client_id, sequence_number, response)
            .await
    }

    /// UI acknowledgement of a delivered assertion event
    pub async fn complete_passkey_assertion(
        &self,
        client_id: u32,
        sequence_number: u32,
        response: PasskeyAssertionResponse,
    ) -> Result<()> {
        let key = RequestKey::new(client_id, sequence_number);
        if !self.check_gate_or_complete_error(key).await {
            return Ok(());
        }

        debug!(client_id, sequence_number, "completing passkey assertion");
        self.take_pending_of_kind(key, |kind| {
            matches!(
                kind,
                PendingKind::Assertion | PendingKind::AssertionWithoutUserInterface
            )
        })
        .await?;
        self.native
            .complete_assertion(client_id, sequence_number, response)
            .await
    }

    /// UI rejection of a delivered event, forwarded to the native layer
    pub async fn complete_error(
        &self,
        client_id: u32,
        sequence_number: u32,
        error: String,
    ) -> Result<()> {
        let key = RequestKey::new(client_id, sequence_number);
        if !self.check_gate_or_complete_error(key).await {
            return Ok(());
        }

        debug!(client_id, sequence_number, "completing with UI-supplied error");
        self.take_pending_of_kind(key, |_| true).await?;
        self.native
            .complete_error(client_id, sequence_number, error)
            .await
    }

    /// Deliver a message to the UI, buffering it until the listener is
    /// ready. Returns false when the feature gate is disabled (no state is
    /// modified); buffering counts as a successful hand-off.
    async fn safe_send(&self, channel: &'static str, message: Value) -> bool {
        let flag = FeatureFlag::MacOsNativeCredentialSync;
        if !self.gate.is_enabled(flag).await {
            debug!("exiting safe_send({channel}): {flag} feature flag is disabled");
            return false;
        }

        let mut session = self.session.lock().await;
        if session.is_listener_ready() && self.ui.is_attached() {
            self.ui.send(channel, message);
        } else {
            info!("Buffering message to {channel} until the listener is ready");
            session.push_buffered(channel, message);
        }

        true
    }

    /// Common path for all four event kinds: fast-fail on native-reported
    /// errors, otherwise record the pending request and hand the event off
    /// to the UI.
    async fn handle_event<T: Serialize + Send>(
        &self,
        kind: PendingKind,
        channel: &'static str,
        payload_key: &'static str,
        client_id: u32,
        sequence_number: u32,
        event: NativeEventPayload<T>,
    ) {
        let payload = match event {
            Ok(payload) => payload,
            Err(native_error) => {
                error!(
                    channel,
                    client_id,
                    sequence_number,
                    error = %native_error,
                    "native layer reported an event error"
                );
                self.complete_native_error(client_id, sequence_number, native_error)
                    .await;
                return;
            }
        };

        let payload = match serde_json::to_value(&payload) {
            Ok(value) => value,
            Err(e) => {
                error!(channel, client_id, sequence_number, error = %e, "failed to encode event payload");
                self.complete_native_error(client_id, sequence_number, e.to_string())
                    .await;
                return;
            }
        };

        let message = json!({
            "clientId": client_id,
            "sequenceNumber": sequence_number,
            payload_key: payload,
        });

        let key = RequestKey::new(client_id, sequence_number);
        {
            let mut session = self.session.lock().await;
            if !session.record_pending(key, kind) {
                warn!(
                    client_id,
                    sequence_number, "replacing pending entry for duplicate native request"
                );
            }
        }

        if !self.safe_send(channel, message).await {
            self.session.lock().await.take_pending(key);
            self.complete_native_error(
                client_id,
                sequence_number,
                AutofillBridgeError::FeatureDisabled(FeatureFlag::MacOsNativeCredentialSync)
                    .to_string(),
            )
            .await;
        }
    }

    /// Gate re-check shared by the completion handlers. On a disabled gate
    /// the pending native request is completed with the fixed gate error
    /// and the UI's supplied response is discarded.
    async fn check_gate_or_complete_error(&self, key: RequestKey) -> bool {
        let flag = FeatureFlag::MacOsNativeCredentialSync;
        if self.gate.is_enabled(flag).await {
            return true;
        }

        self.session.lock().await.take_pending(key);
        self.complete_native_error(
            key.client_id,
            key.sequence_number,
            AutofillBridgeError::FeatureDisabled(flag).to_string(),
        )
        .await;
        false
    }

    /// Remove the pending entry for a completion, rejecting completions
    /// that are unmatched or of the wrong kind. Rejected completions leave
    /// the pending map untouched and never reach the native layer.
    async fn take_pending_of_kind(
        &self,
        key: RequestKey,
        matches_kind: fn(PendingKind) -> bool,
    ) -> Result<()> {
        let mut session = self.session.lock().await;
        match session.pending_kind(key) {
            None => {
                warn!(
                    client_id = key.client_id,
                    sequence_number = key.sequence_number,
                    "completion for a request that is not pending"
                );
                Err(AutofillBridgeError::UnmatchedCompletion {
                    client_id: key.client_id,
                    sequence_number: key.sequence_number,
                })
            }
            Some(kind) if !matches_kind(kind) => {
                warn!(
                    client_id = key.client_id,
                    sequence_number = key.sequence_number,
                    ?kind,
                    "completion kind does not match pending request"
                );
                Err(AutofillBridgeError::MismatchedCompletion {
                    client_id: key.client_id,
                    sequence_number: key.sequence_number,
                })
            }
            Some(_) => {
                session.take_pending(key);
                Ok(())
            }
        }
    }

    async fn complete_native_error(&self, client_id: u32, sequence_number: u32, error: String) {
        if let Err(e) = self
            .native
            .complete_error(client_id, sequence_number, error)
            .await
        {
            error!(
                client_id,
                sequence_number,
                error = %e,
                "failed to complete native request with an error"
            );
        }
    }
}

#[async_trait]
impl NativeEventHandler for AutofillBridge {
    async fn passkey_registration(
        &self,
        client_id: u32,
        sequence_number: u32,
        event: NativeEventPayload<PasskeyRegistrationRequest>,
    ) {
        self.handle_event(
            PendingKind::Registration,
            channels::PASSKEY_REGISTRATION,
            "request",
            client_id,
            sequence_number,
            event,
        )
        .await;
    }

    async fn passkey_assertion(
        &self,
        client_id: u32,
        sequence_number: u32,
        event: NativeEventPayload<PasskeyAssertionRequest>,
    ) {
        self.handle_event(
            PendingKind::Assertion,
            channels::PASSKEY_ASSERTION,
            "request",
            client_id,
            sequence_number,
            event,
        )
        .await;
    }

    async fn passkey_assertion_without_user_interface(
        &self,
        client_id: u32,
        sequence_number: u32,
        event: NativeEventPayload<PasskeyAssertionWithoutUserInterfaceRequest>,
    ) {
        self.handle_event(
            PendingKind::AssertionWithoutUserInterface,
            channels::PASSKEY_ASSERTION_WITHOUT_USER_INTERFACE,
            "request",
            client_id,
            sequence_number,
            event,
        )
        .await;
    }

    async fn native_status(
        &self,
        client_id: u32,
        sequence_number: u32,
        event: NativeEventPayload<NativeStatus>,
    ) {
        self.handle_event(
            PendingKind::Status,
            channels::NATIVE_STATUS,
            "status",
            client_id,
            sequence_number,
            event,
        )
        .await;
    }
}
