//! Bridge Session State
//!
//! Readiness flag, message buffer and pending-request map for one UI
//! session. Owned by the bridge and rebuilt from scratch on process
//! restart; buffered messages do not survive a restart.

use serde_json::Value;
use std::collections::{HashMap, VecDeque};

/// Correlates a pushed event with its eventual completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub client_id: u32,
    pub sequence_number: u32,
}

impl RequestKey {
    pub fn new(client_id: u32, sequence_number: u32) -> Self {
        Self {
            client_id,
            sequence_number,
        }
    }
}

/// Kind of native request awaiting a UI completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    Registration,
    Assertion,
    AssertionWithoutUserInterface,
    Status,
}

/// A (channel, payload) pair awaiting delivery to the UI
#[derive(Debug, Clone)]
pub struct BufferedMessage {
    pub channel: &'static str,
    pub data: Value,
}

/// Mutable session state, touched only under the bridge's lock
#[derive(Debug, Default)]
pub struct SessionState {
    listener_ready: bool,
    buffer: VecDeque<BufferedMessage>,
    pending: HashMap<RequestKey, PendingKind>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listener_ready(&self) -> bool {
        self.listener_ready
    }

    /// Monotonic: once set, the flag never reverts for the life of the
    /// session.
    pub fn mark_listener_ready(&mut self) {
        self.listener_ready = true;
    }

    pub fn push_buffered(&mut self, channel: &'static str, data: Value) {
        self.buffer.push_back(BufferedMessage { channel, data });
    }

    /// Remove and return all buffered messages in arrival order
    pub fn drain_buffer(&mut self) -> Vec<BufferedMessage> {
        self.buffer.drain(..).collect()
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    #[cfg(test)]
    pub fn buffered_messages(&self) -> impl Iterator<Item = &BufferedMessage> {
        self.buffer.iter()
    }

    /// Record a native request awaiting a UI completion. Returns false if
    /// an entry for the key already existed (it is replaced).
    pub fn record_pending(&mut self, key: RequestKey, kind: PendingKind) -> bool {
        self.pending.insert(key, kind).is_none()
    }

    pub fn pending_kind(&self, key: RequestKey) -> Option<PendingKind> {
        self.pending.get(&key).copied()
    }

    pub fn take_pending(&mut self, key: RequestKey) -> Option<PendingKind> {
        self.pending.remove(&key)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
