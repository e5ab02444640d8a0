//! Busy indicator for async operations.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

/// Tracks whether any wrapped operation is in flight.
///
/// Clones share the same flag. The flag is raised while at least one future
/// passed to [`with_loading`](Self::with_loading) runs and drops back once
/// all of them finished, failed or were cancelled.
#[derive(Debug, Clone)]
pub struct LoadingFlag {
    in_flight: Arc<watch::Sender<usize>>,
}

struct Lowered<'a>(&'a watch::Sender<usize>);

impl Drop for Lowered<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n = n.saturating_sub(1));
    }
}

impl LoadingFlag {
    pub fn new() -> Self {
        let (in_flight, _) = watch::channel(0);
        Self {
            in_flight: Arc::new(in_flight),
        }
    }

    /// Returns true while an operation is running.
    pub fn is_loading(&self) -> bool {
        *self.in_flight.borrow() > 0
    }

    /// Subscribes to the number of operations in flight.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.in_flight.subscribe()
    }

    /// Runs `future` with the flag raised and returns its output.
    pub async fn with_loading<F, R>(&self, future: F) -> R
    where
        F: Future<Output = R>,
    {
        self.in_flight.send_modify(|n| *n += 1);
        let _lowered = Lowered(&self.in_flight);
        future.await
    }
}

impl Default for LoadingFlag {
    fn default() -> Self {
        Self::new()
    }
}
