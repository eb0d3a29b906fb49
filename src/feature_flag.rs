//! Feature Gate
//!
//! A remotely-configured boolean toggle controls whether the bridge is
//! active at all. Every bridge operation queries the gate before touching
//! the native layer or the message buffer.

use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Closed set of feature flags the bridge cares about.
///
/// `Display` yields the flag's wire name, which also appears verbatim in
/// the gate-disabled error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureFlag {
    MacOsNativeCredentialSync,
}

impl FeatureFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureFlag::MacOsNativeCredentialSync => "MacOsNativeCredentialSync",
        }
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean-valued flag lookup, backed by the host application's remote
/// configuration service.
#[async_trait]
pub trait FeatureGate: Send + Sync {
    async fn is_enabled(&self, flag: FeatureFlag) -> bool;
}

/// Fixed in-memory gate for tests and local development.
#[derive(Debug)]
pub struct StaticFeatureGate {
    enabled: AtomicBool,
}

impl StaticFeatureGate {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

#[async_trait]
impl FeatureGate for StaticFeatureGate {
    async fn is_enabled(&self, _flag: FeatureFlag) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}
