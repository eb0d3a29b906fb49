//! Native Autofill Module
//!
//! This module bridges the desktop UI process and the OS credential
//! subsystem. Commands flow UI → native through the relay; passkey and
//! status events flow native → UI through the bridge, buffered until the
//! UI listener attaches, with UI acknowledgements completing the pending
//! native requests.

pub mod bridge;
pub mod command;
pub mod native;
pub mod relay;
pub mod session;
pub mod types;
pub mod ui;

#[cfg(test)]
pub(crate) mod testutil;

pub use bridge::AutofillBridge;
pub use command::{CommandInput, CommandOutput, CommandResult};
pub use native::{NativeAutofillHandle, NativeEventHandler};
pub use relay::CommandRelay;
pub use ui::UiSurface;
