//! Error Types for the Autofill Bridge
//!
//! Every failure the bridge can observe is converted into one of these
//! variants at the boundary; nothing propagates as an unhandled fault
//! across the UI/native boundary.

use crate::feature_flag::FeatureFlag;
use thiserror::Error;

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, AutofillBridgeError>;

/// Main error type for the bridge
#[derive(Error, Debug)]
pub enum AutofillBridgeError {
    // ===== Feature Gate =====
    /// The feature gate is disabled; the operation never reached the
    /// native layer
    #[error("{0} feature flag is disabled")]
    FeatureDisabled(FeatureFlag),

    // ===== Native Layer =====
    /// The native layer reported a failure
    #[error("Native error: {0}")]
    NativeError(String),

    // ===== Transport =====
    /// JSON encoding or decoding failed
    #[error("Transport error: {0}")]
    TransportError(#[from] serde_json::Error),

    /// Command is not in the closed command set
    #[error("Unknown command: {namespace}.{command}")]
    UnknownCommand { namespace: String, command: String },

    // ===== Delivery =====
    /// No UI surface was attached when the message buffer was flushed
    #[error("No UI surface available to deliver buffered messages")]
    DeliveryUnavailable,

    /// A completion arrived for a request that is not pending
    #[error("No pending request for client {client_id}, sequence {sequence_number}")]
    UnmatchedCompletion { client_id: u32, sequence_number: u32 },

    /// A completion arrived whose kind does not match the pending request
    #[error("Completion kind does not match pending request for client {client_id}, sequence {sequence_number}")]
    MismatchedCompletion { client_id: u32, sequence_number: u32 },

    // ===== Configuration =====
    /// Configuration could not be read or written
    #[error("Config error: {0}")]
    ConfigError(String),

    // ===== I/O Errors =====
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AutofillBridgeError {
    /// Check if this error is the feature-gate short-circuit
    pub fn is_gate_disabled(&self) -> bool {
        matches!(self, AutofillBridgeError::FeatureDisabled(_))
    }

    /// Check if this error indicates a completion the bridge rejected
    pub fn is_rejected_completion(&self) -> bool {
        matches!(
            self,
            AutofillBridgeError::UnmatchedCompletion { .. }
                | AutofillBridgeError::MismatchedCompletion { .. }
        )
    }
}
