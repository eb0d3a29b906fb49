//! Autofill Command Set
//!
//! Closed set of commands the UI can run against the native layer, the
//! wire envelope they travel in, and the per-command result decoders.

use crate::autofill::types::SyncCredential;
use crate::error::{AutofillBridgeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NAMESPACE_AUTOFILL: &str = "autofill";
pub const COMMAND_STATUS: &str = "status";
pub const COMMAND_SYNC: &str = "sync";

/// Typed input for a command in the closed set
#[derive(Debug, Clone)]
pub enum CommandInput {
    /// Query the OS credential store's capabilities and current state
    Status,
    /// Push vault credentials into the OS credential store
    Sync { credentials: Vec<SyncCredential> },
}

/// Wire envelope for the native `runCommand` entry point
#[derive(Debug, Serialize)]
struct RunCommandParams<'a> {
    namespace: &'static str,
    command: &'static str,
    params: &'a Value,
}

impl CommandInput {
    pub fn namespace(&self) -> &'static str {
        NAMESPACE_AUTOFILL
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandInput::Status => COMMAND_STATUS,
            CommandInput::Sync { .. } => COMMAND_SYNC,
        }
    }

    /// Serialize the command to its transport encoding
    pub fn encode(&self) -> Result<String> {
        let params = match self {
            CommandInput::Status => Value::Object(serde_json::Map::new()),
            CommandInput::Sync { credentials } => serde_json::to_value(SyncParams {
                credentials: credentials.as_slice(),
            })?,
        };

        let envelope = RunCommandParams {
            namespace: self.namespace(),
            command: self.name(),
            params: &params,
        };

        Ok(serde_json::to_string(&envelope)?)
    }
}

#[derive(Debug, Serialize)]
struct SyncParams<'a> {
    credentials: &'a [SyncCredential],
}

/// Success payload of the `status` command
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResult {
    pub support: StatusSupport,
    pub state: StatusState,
}

/// What the OS credential store supports on this machine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSupport {
    pub fido2: bool,
    pub password: bool,
    pub incremental_updates: bool,
}

/// Current state of the OS credential store integration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusState {
    pub enabled: bool,
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
}

/// Success payload of the `sync` command
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub added: u32,
}

/// Typed output of a completed command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Status(StatusResult),
    Sync(SyncResult),
}

/// Result returned to the UI for every relayed command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Success(CommandOutput),
    Error { error: String },
}

impl CommandResult {
    pub fn error(message: impl Into<String>) -> Self {
        CommandResult::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CommandResult::Error { .. })
    }
}

/// Wire shape of the native layer's response, before per-command decoding
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum WireResult {
    Success { value: Value },
    Error { error: String },
}

type Decoder = fn(Value) -> serde_json::Result<CommandOutput>;

fn decode_status(value: Value) -> serde_json::Result<CommandOutput> {
    Ok(CommandOutput::Status(serde_json::from_value(value)?))
}

fn decode_sync(value: Value) -> serde_json::Result<CommandOutput> {
    Ok(CommandOutput::Sync(serde_json::from_value(value)?))
}

/// Per-command decoder table, keyed by (namespace, name)
fn decoder_for(namespace: &str, command: &str) -> Option<Decoder> {
    match (namespace, command) {
        (NAMESPACE_AUTOFILL, COMMAND_STATUS) => Some(decode_status),
        (NAMESPACE_AUTOFILL, COMMAND_SYNC) => Some(decode_sync),
        _ => None,
    }
}

/// Decode a raw native response into the command's typed result
pub fn decode_result(namespace: &str, command: &str, raw: &str) -> Result<CommandResult> {
    let wire: WireResult = serde_json::from_str(raw)?;

    match wire {
        WireResult::Error { error } => Ok(CommandResult::Error { error }),
        WireResult::Success { value } => {
            let decoder =
                decoder_for(namespace, command).ok_or_else(|| AutofillBridgeError::UnknownCommand {
                    namespace: namespace.to_string(),
                    command: command.to_string(),
                })?;
            Ok(CommandResult::Success(decoder(value)?))
        }
    }
}
