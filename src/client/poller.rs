//! Fixed-interval polling loop
//!
//! Each poller is an independent tokio task. A failed poll is logged and
//! the next tick runs as scheduled: no retry, no backoff. The latest good
//! value is published on a watch channel.

use crate::error::ClientError;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to a running polling task; dropping it stops the task
pub struct Poller<T> {
    name: &'static str,
    receiver: watch::Receiver<Option<T>>,
    handle: JoinHandle<()>,
}

impl<T> Poller<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn a poller that runs `task` immediately and then every `interval`
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn<F, Fut>(name: &'static str, interval: Duration, mut task: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let (sender, receiver) = watch::channel(None);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match task().await {
                    Ok(value) => {
                        if sender.send(Some(value)).is_err() {
                            break;
                        }
                    }
                    Err(err) => tracing::error!("Poll '{}' failed: {}", name, err),
                }
            }
        });

        Self {
            name,
            receiver,
            handle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Most recent successful value, if any poll has succeeded yet
    pub fn latest(&self) -> Option<T> {
        self.receiver.borrow().clone()
    }

    /// Independent receiver for UI code that wants change notifications
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.receiver.clone()
    }

    /// Wait for the next successful poll
    ///
    /// Returns None once the task has stopped.
    pub async fn next(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        self.receiver.borrow_and_update().clone()
    }

    /// Stop polling; a request already in flight is abandoned
    pub fn stop(self) {}
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_publishes_successful_polls() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let mut poller = Poller::spawn("counter", Duration::from_secs(3), move || {
            let c = c.clone();
            async move { Ok::<_, ClientError>(c.fetch_add(1, Ordering::SeqCst)) }
        });

        assert_eq!(poller.next().await, Some(0));
        assert_eq!(poller.next().await, Some(1));
        assert_eq!(poller.latest(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_do_not_stop_polling() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let mut poller = Poller::spawn("flaky", Duration::from_secs(10), move || {
            let c = c.clone();
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst);
                if n % 2 == 0 {
                    Err(ClientError::Api {
                        status: 500,
                        message: "boom".to_string(),
                    })
                } else {
                    Ok(n)
                }
            }
        });

        assert_eq!(poller.next().await, Some(1));
        assert_eq!(poller.next().await, Some(3));
        assert!(counter.load(Ordering::SeqCst) >= 4);
    }
}
