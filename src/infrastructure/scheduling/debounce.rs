use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

/// Coalesces bursts of calls into one action.
///
/// Every `call` restarts the quiet period; when it elapses without another
/// call, the action runs once with the most recent value. Earlier values in
/// the burst are discarded. Dropping the debouncer cancels a pending
/// emission.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    quiet_period: Duration,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the background task on the current tokio runtime
    pub fn spawn<F, Fut>(quiet_period: Duration, mut action: F) -> Self
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        tokio::spawn(async move {
            while let Some(mut pending) = rx.recv().await {
                let mut coalesced = 0usize;
                loop {
                    match tokio::time::timeout(quiet_period, rx.recv()).await {
                        Ok(Some(newer)) => {
                            pending = newer;
                            coalesced += 1;
                        }
                        Ok(None) => return,
                        Err(_) => break,
                    }
                }
                debug!(coalesced, "Quiet period elapsed, emitting");
                action(pending).await;
            }
        });

        Self { tx, quiet_period }
    }

    /// Schedule `value`, superseding any value still waiting
    pub fn call(&self, value: T) {
        // the receiver only goes away when the runtime shuts down
        let _ = self.tx.send(value);
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}
