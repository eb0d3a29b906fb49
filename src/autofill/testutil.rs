//! Test doubles for the bridge's collaborators

use crate::autofill::native::NativeAutofillHandle;
use crate::autofill::types::{
    NativeStatus, PasskeyAssertionRequest, PasskeyAssertionResponse,
    PasskeyAssertionWithoutUserInterfaceRequest, PasskeyRegistrationRequest,
    PasskeyRegistrationResponse, UserVerification,
};
use crate::autofill::ui::UiSurface;
use crate::error::{AutofillBridgeError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A completion call recorded by `RecordingNative`
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Completion {
    Registration {
        client_id: u32,
        sequence_number: u32,
        response: PasskeyRegistrationResponse,
    },
    Assertion {
        client_id: u32,
        sequence_number: u32,
        response: PasskeyAssertionResponse,
    },
    Error {
        client_id: u32,
        sequence_number: u32,
        error: String,
    },
}

/// Native handle double that records every call and serves a programmable
/// command response.
pub(crate) struct RecordingNative {
    run_calls: Mutex<Vec<String>>,
    run_response: Mutex<std::result::Result<String, String>>,
    completions: Mutex<Vec<Completion>>,
}

impl RecordingNative {
    pub fn new() -> Self {
        Self {
            run_calls: Mutex::new(Vec::new()),
            run_response: Mutex::new(Err("no response configured".to_string())),
            completions: Mutex::new(Vec::new()),
        }
    }

    pub fn set_run_command_response(&self, response: std::result::Result<String, String>) {
        *self.run_response.lock().unwrap() = response;
    }

    pub fn run_command_calls(&self) -> Vec<String> {
        self.run_calls.lock().unwrap().clone()
    }

    pub fn completions(&self) -> Vec<Completion> {
        self.completions.lock().unwrap().clone()
    }
}

#[async_trait]
impl NativeAutofillHandle for RecordingNative {
    async fn run_command(&self, payload: String) -> Result<String> {
        self.run_calls.lock().unwrap().push(payload);
        self.run_response
            .lock()
            .unwrap()
            .clone()
            .map_err(AutofillBridgeError::NativeError)
    }

    async fn complete_registration(
        &self,
        client_id: u32,
        sequence_number: u32,
        response: PasskeyRegistrationResponse,
    ) -> Result<()> {
        self.completions.lock().unwrap().push(Completion::Registration {
            client_id,
            sequence_number,
            response,
        });
        Ok(())
    }

    async fn complete_assertion(
        &self,
        client_id: u32,
        sequence_number: u32,
        response: PasskeyAssertionResponse,
    ) -> Result<()> {
        self.completions.lock().unwrap().push(Completion::Assertion {
            client_id,
            sequence_number,
            response,
        });
        Ok(())
    }

    async fn complete_error(
        &self,
        client_id: u32,
        sequence_number: u32,
        error: String,
    ) -> Result<()> {
        self.completions.lock().unwrap().push(Completion::Error {
            client_id,
            sequence_number,
            error,
        });
        Ok(())
    }
}

/// UI surface double with a switchable attached state
pub(crate) struct RecordingUi {
    attached: AtomicBool,
    sent: Mutex<Vec<(String, Value)>>,
}

impl RecordingUi {
    pub fn new(attached: bool) -> Self {
        Self {
            attached: AtomicBool::new(attached),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn set_attached(&self, attached: bool) {
        self.attached.store(attached, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(String, Value)> {
        self.sent.lock().unwrap().clone()
    }
}

impl UiSurface for RecordingUi {
    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn send(&self, channel: &str, message: Value) {
        self.sent.lock().unwrap().push((channel.to_string(), message));
    }
}

pub(crate) fn registration_request() -> PasskeyRegistrationRequest {
    PasskeyRegistrationRequest {
        rp_id: "example.com".to_string(),
        user_name: "user@example.com".to_string(),
        user_handle: vec![1, 2, 3],
        client_data_hash: vec![4, 5, 6],
        supported_algorithms: vec![-7, -257],
    }
}

pub(crate) fn registration_response() -> PasskeyRegistrationResponse {
    PasskeyRegistrationResponse {
        rp_id: "example.com".to_string(),
        client_data_hash: vec![4, 5, 6],
        credential_id: vec![9, 9, 9],
        attestation_object: vec![7, 7],
    }
}

pub(crate) fn assertion_request() -> PasskeyAssertionRequest {
    PasskeyAssertionRequest {
        rp_id: "example.com".to_string(),
        credential_id: vec![9, 9, 9],
        user_handle: vec![1, 2, 3],
        record_identifier: None,
        client_data_hash: vec![4, 5, 6],
        user_verification: UserVerification::Preferred,
    }
}

pub(crate) fn assertion_without_ui_request() -> PasskeyAssertionWithoutUserInterfaceRequest {
    PasskeyAssertionWithoutUserInterfaceRequest {
        rp_id: "example.com".to_string(),
        credential_id: vec![9, 9, 9],
        user_handle: vec![1, 2, 3],
        record_identifier: Some("record-1".to_string()),
        client_data_hash: vec![4, 5, 6],
        user_verification: UserVerification::Required,
    }
}

pub(crate) fn assertion_response() -> PasskeyAssertionResponse {
    PasskeyAssertionResponse {
        rp_id: "example.com".to_string(),
        user_handle: vec![1, 2, 3],
        signature: vec![8, 8],
        client_data_hash: vec![4, 5, 6],
        authenticator_data: vec![2, 2],
        credential_id: vec![9, 9, 9],
    }
}

pub(crate) fn native_status() -> NativeStatus {
    NativeStatus {
        key: "sync".to_string(),
        value: json!({ "state": "idle" }),
    }
}
