//! Session readiness gate
//!
//! After sign-up the identity collaborator establishes the session out of
//! band, so the first authenticated page load can race it. The registry
//! replaces client-side polling with an event-driven gate: the identity
//! side signals readiness once, and waiters block on a watch channel under
//! a single bounded timeout.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tracing::debug;

/// Session gate failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The wait expired before the session was signalled ready.
    #[error("session for user {user_id} not ready after {waited_ms} ms")]
    Timeout {
        /// The user whose session was awaited
        user_id: String,
        /// How long the caller waited, in milliseconds
        waited_ms: u64,
    },

    /// The readiness channel for the session was dropped.
    #[error("readiness channel for user {user_id} closed")]
    Closed {
        /// The user whose channel closed
        user_id: String,
    },
}

/// Per-user readiness channels, shared across handlers.
///
/// Cloning is cheap and every clone observes the same signals. Entries
/// are created lazily on the first signal or wait and live for the
/// process lifetime.
#[derive(Clone, Debug, Default)]
pub struct SessionRegistry {
    channels: Arc<Mutex<HashMap<String, watch::Sender<bool>>>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    async fn sender_for(&self, user_id: &str) -> watch::Sender<bool> {
        let mut channels = self.channels.lock().await;
        channels
            .entry(user_id.to_string())
            .or_insert_with(|| watch::channel(false).0)
            .clone()
    }

    /// Signal that the session for `user_id` is established.
    ///
    /// Wakes every current waiter and satisfies future waits
    /// immediately. Signalling twice is harmless.
    pub async fn mark_ready(&self, user_id: &str) {
        let sender = self.sender_for(user_id).await;
        sender.send_replace(true);
        debug!("Session for user {} marked ready", user_id);
    }

    /// Whether the session for `user_id` has been signalled ready.
    pub async fn is_ready(&self, user_id: &str) -> bool {
        let channels = self.channels.lock().await;
        channels
            .get(user_id)
            .map(|sender| *sender.borrow())
            .unwrap_or(false)
    }

    /// Await the readiness signal for `user_id`, bounded by `timeout`.
    ///
    /// Resolves immediately when the session is already ready. There is
    /// no retry or re-poll: one wait, one deadline.
    pub async fn wait_ready(&self, user_id: &str, timeout: Duration) -> Result<(), SessionError> {
        let sender = self.sender_for(user_id).await;
        let mut receiver = sender.subscribe();

        let result = match tokio::time::timeout(timeout, receiver.wait_for(|ready| *ready)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(_)) => Err(SessionError::Closed {
                user_id: user_id.to_string(),
            }),
            Err(_) => Err(SessionError::Timeout {
                user_id: user_id.to_string(),
                waited_ms: timeout.as_millis() as u64,
            }),
        };
        result
    }
}
