//! UI Surface
//!
//! The push side toward the UI process: channel names and the surface the
//! bridge delivers events to.

use serde_json::Value;

/// Channel names for events pushed to the UI
pub mod channels {
    pub const PASSKEY_REGISTRATION: &str = "autofill.passkeyRegistration";
    pub const PASSKEY_ASSERTION: &str = "autofill.passkeyAssertion";
    pub const PASSKEY_ASSERTION_WITHOUT_USER_INTERFACE: &str =
        "autofill.passkeyAssertionWithoutUserInterface";
    pub const NATIVE_STATUS: &str = "autofill.nativeStatus";
}

/// A live UI window or renderer the bridge can push messages to
pub trait UiSurface: Send + Sync {
    /// Whether a live surface currently exists
    fn is_attached(&self) -> bool;

    /// Push a message to the UI; fire-and-forget
    fn send(&self, channel: &str, message: Value);
}
