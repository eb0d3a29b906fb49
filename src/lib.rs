//! Bitwarden Autofill Bridge
//!
//! Bridges the desktop UI process and the OS-native credential subsystem:
//! relays typed commands over a JSON transport, receives asynchronous
//! passkey registration/assertion/status events, and buffers outbound
//! events until the UI signals it is ready to receive them.
//!
//! ## Architecture
//! - `autofill::relay` - typed command execution against the native layer
//! - `autofill::bridge` - event server, message buffering, completions
//! - `feature_flag` - remote feature gate queried before every operation
//! - `config` - flush-policy configuration

pub mod autofill;
pub mod config;
pub mod error;
pub mod feature_flag;

pub use autofill::{AutofillBridge, CommandRelay};
pub use error::{AutofillBridgeError, Result};
