//! Native Layer Interface
//!
//! The out-of-process OS credential subsystem is an opaque collaborator.
//! It exposes a command entry point plus three completion entry points,
//! and pushes events into whatever `NativeEventHandler` it holds.

use crate::autofill::types::{
    NativeStatus, PasskeyAssertionRequest, PasskeyAssertionResponse,
    PasskeyAssertionWithoutUserInterfaceRequest, PasskeyRegistrationRequest,
    PasskeyRegistrationResponse,
};
use crate::error::Result;
use async_trait::async_trait;

/// Event payload as reported by the native layer; `Err` carries the
/// native-side error string.
pub type NativeEventPayload<T> = std::result::Result<T, String>;

/// Opaque handle to the out-of-process credential subsystem
#[async_trait]
pub trait NativeAutofillHandle: Send + Sync {
    /// Execute a JSON-encoded command and return the JSON-encoded result
    async fn run_command(&self, payload: String) -> Result<String>;

    /// Complete a pending registration request
    async fn complete_registration(
        &self,
        client_id: u32,
        sequence_number: u32,
        response: PasskeyRegistrationResponse,
    ) -> Result<()>;

    /// Complete a pending assertion request
    async fn complete_assertion(
        &self,
        client_id: u32,
        sequence_number: u32,
        response: PasskeyAssertionResponse,
    ) -> Result<()>;

    /// Complete a pending request with an error
    async fn complete_error(
        &self,
        client_id: u32,
        sequence_number: u32,
        error: String,
    ) -> Result<()>;
}

/// Receiver for events pushed by the native layer, one method per event
/// kind. The native layer holds a reference to this instead of raw
/// callbacks.
#[async_trait]
pub trait NativeEventHandler: Send + Sync {
    async fn passkey_registration(
        &self,
        client_id: u32,
        sequence_number: u32,
        event: NativeEventPayload<PasskeyRegistrationRequest>,
    );

    async fn passkey_assertion(
        &self,
        client_id: u32,
        sequence_number: u32,
        event: NativeEventPayload<PasskeyAssertionRequest>,
    );

    async fn passkey_assertion_without_user_interface(
        &self,
        client_id: u32,
        sequence_number: u32,
        event: NativeEventPayload<PasskeyAssertionWithoutUserInterfaceRequest>,
    );

    async fn native_status(
        &self,
        client_id: u32,
        sequence_number: u32,
        event: NativeEventPayload<NativeStatus>,
    );
}
