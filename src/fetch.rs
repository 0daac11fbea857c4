//! Latest-only fetch guard
//!
//! Each trigger (a character id, a search prefix) starts a new generation and
//! cancels whatever was in flight for the previous one. A result is only
//! handed back if its ticket is still the newest when the fetch completes, so
//! a slow response can never overwrite a faster, more recent one.

use std::fmt::Debug;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

/// Handle for one fetch started through [`FetchGuard::begin`]
#[derive(Debug, Clone)]
pub struct FetchTicket<K> {
    key: K,
    generation: u64,
    cancel: CancellationToken,
}

impl<K> FetchTicket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once a newer fetch has superseded this one
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug)]
struct GuardState<K> {
    generation: u64,
    key: Option<K>,
    cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct FetchGuard<K> {
    state: Mutex<GuardState<K>>,
}

impl<K: Clone + Debug> FetchGuard<K> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GuardState {
                generation: 0,
                key: None,
                cancel: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GuardState<K>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a fetch for `key`, superseding the previous one
    pub fn begin(&self, key: K) -> FetchTicket<K> {
        let mut state = self.lock();

        if let Some(previous) = state.cancel.take() {
            tracing::debug!(superseded = ?state.key, next = ?key, "Cancelling stale fetch");
            previous.cancel();
        }

        state.generation += 1;
        let cancel = CancellationToken::new();
        state.cancel = Some(cancel.clone());
        state.key = Some(key.clone());

        FetchTicket {
            key,
            generation: state.generation,
            cancel,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket<K>) -> bool {
        self.lock().generation == ticket.generation
    }

    /// Key of the most recent fetch
    pub fn current_key(&self) -> Option<K> {
        self.lock().key.clone()
    }

    /// Drive `fetch` to completion unless it is superseded first.
    ///
    /// Returns `None` when the ticket was cancelled while waiting or is no
    /// longer current at completion.
    pub async fn run<F, T>(&self, ticket: &FetchTicket<K>, fetch: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        tokio::select! {
            biased;
            _ = ticket.cancel.cancelled() => {
                tracing::debug!(key = ?ticket.key, "Discarding superseded fetch");
                None
            }
            output = fetch => {
                if self.is_current(ticket) {
                    Some(output)
                } else {
                    tracing::debug!(key = ?ticket.key, "Discarding stale result");
                    None
                }
            }
        }
    }
}

impl<K: Clone + Debug> Default for FetchGuard<K> {
    fn default() -> Self {
        Self::new()
    }
}
