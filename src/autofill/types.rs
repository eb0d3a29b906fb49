//! Autofill Wire Types
//!
//! Payloads exchanged with the OS credential subsystem and the UI. The
//! transport is JSON with camelCase field names on both sides.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Passkey registration request pushed by the OS credential subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasskeyRegistrationRequest {
    pub rp_id: String,
    pub user_name: String,
    pub user_handle: Vec<u8>,
    pub client_data_hash: Vec<u8>,
    pub supported_algorithms: Vec<i32>,
}

/// UI response completing a passkey registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasskeyRegistrationResponse {
    pub rp_id: String,
    pub client_data_hash: Vec<u8>,
    pub credential_id: Vec<u8>,
    pub attestation_object: Vec<u8>,
}

/// Passkey assertion request pushed by the OS credential subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasskeyAssertionRequest {
    pub rp_id: String,
    pub credential_id: Vec<u8>,
    pub user_handle: Vec<u8>,
    pub record_identifier: Option<String>,
    pub client_data_hash: Vec<u8>,
    pub user_verification: UserVerification,
}

/// Assertion request the OS resolves without showing any UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasskeyAssertionWithoutUserInterfaceRequest {
    pub rp_id: String,
    pub credential_id: Vec<u8>,
    pub user_handle: Vec<u8>,
    pub record_identifier: Option<String>,
    pub client_data_hash: Vec<u8>,
    pub user_verification: UserVerification,
}

/// User verification requirement for an assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserVerification {
    Preferred,
    Required,
    Discouraged,
}

/// UI response completing a passkey assertion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasskeyAssertionResponse {
    pub rp_id: String,
    pub user_handle: Vec<u8>,
    pub signature: Vec<u8>,
    pub client_data_hash: Vec<u8>,
    pub authenticator_data: Vec<u8>,
    pub credential_id: Vec<u8>,
}

/// Status update pushed by the native layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NativeStatus {
    pub key: String,
    pub value: serde_json::Value,
}

/// Credential pushed to the OS credential store by the `sync` command
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SyncCredential {
    #[serde(rename_all = "camelCase")]
    Fido2 {
        cipher_id: Uuid,
        rp_id: String,
        user_name: String,
        credential_id: Vec<u8>,
        user_handle: Vec<u8>,
    },
    #[serde(rename_all = "camelCase")]
    Password {
        cipher_id: Uuid,
        uri: String,
        username: String,
        #[serde(serialize_with = "serialize_secret")]
        password: SecretString,
    },
}

/// The OS store needs the cleartext password; this is the only place a
/// secret is exposed for serialization.
fn serialize_secret<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}
