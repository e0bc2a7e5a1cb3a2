// src/services/debounce.rs
// DOCUMENTATION: Generic time-delay gate for rapid call streams
// PURPOSE: Defer a callback until the caller has been quiet for a full window

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

type BoxedCallback<T> =
    Arc<dyn Fn(T) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Debounced dispatcher for an async callback
/// DOCUMENTATION: Each call() resets the pending timer, so only the last
/// value within any quiescence window reaches the callback. cancel() only
/// affects a call still inside its delay window; once the timer has fired
/// the callback runs detached and is no longer cancellable.
pub struct Debouncer<T> {
    delay: Duration,
    callback: BoxedCallback<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            callback: Arc::new(move |value| Box::pin(callback(value))),
            pending: Mutex::new(None),
        }
    }

    /// Schedule the callback to run with `value` after the delay of quiescence
    /// DOCUMENTATION: Supersedes any previously pending (not yet fired) call.
    /// Fire-and-forget: no result is produced.
    pub fn call(&self, value: T) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let callback = Arc::clone(&self.callback);
        // Anchor the deadline at call time, not at the task's first poll
        let sleep = tokio::time::sleep(self.delay);
        *pending = Some(tokio::spawn(async move {
            sleep.await;
            // Detach so a later cancel() cannot interrupt a running callback
            tokio::spawn(callback(value));
        }));
    }

    /// Discard any pending scheduled call
    /// DOCUMENTATION: Safe to call repeatedly and after the timer has fired.
    pub fn cancel(&self) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
