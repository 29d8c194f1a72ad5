//! Fixed-interval refresh of a widget's data.
//!
//! Each successful fetch replaces the published snapshot; a failed fetch is logged and
//! the previous snapshot stays in place. There is no backoff: the next attempt simply
//! happens on the next tick.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::{
    select,
    sync::{oneshot, watch},
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, warn};

/// The latest successful fetch.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub data: Arc<T>,
    /// Unix seconds (UTC) when the fetch completed.
    pub fetched_at: i64,
    /// Counts successful fetches, starting at 1.
    pub generation: u64,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            fetched_at: self.fetched_at,
            generation: self.generation,
        }
    }
}

/// A handle for a running poll task.
pub struct PollHandle {
    join: JoinHandle<()>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl PollHandle {
    /// Politely ask the poller to stop and wait for it to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        let _ = self.join.await;
    }

    /// Immediately abort the background task.
    pub fn abort(self) {
        self.join.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// Receiver side: `None` until the first fetch succeeds.
pub type SnapshotReceiver<T> = watch::Receiver<Option<Snapshot<T>>>;

/// Starts polling `fetch` every `every`, the first call immediately.
///
/// The task ends on [`PollHandle::stop`], [`PollHandle::abort`], or once every receiver
/// has been dropped.
pub fn spawn<T, E, F, Fut>(name: &'static str, every: Duration, mut fetch: F) -> (PollHandle, SnapshotReceiver<T>)
where
    T: Send + Sync + 'static,
    E: Display + Send + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let (tx, rx) = watch::channel::<Option<Snapshot<T>>>(None);
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let join = tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut generation = 0u64;

        loop {
            select! {
                _ = ticker.tick() => {
                    match fetch().await {
                        Ok(data) => {
                            generation += 1;
                            debug!(poller = name, generation, "refreshed");
                            tx.send_replace(Some(Snapshot {
                                data: Arc::new(data),
                                fetched_at: Utc::now().timestamp(),
                                generation,
                            }));
                        }
                        Err(e) => warn!(poller = name, error = %e, "refresh failed, keeping previous snapshot"),
                    }

                    if tx.is_closed() {
                        debug!(poller = name, "all receivers dropped");
                        break;
                    }
                }
                _ = &mut stop_rx => {
                    break;
                }
                () = tx.closed() => {
                    debug!(poller = name, "all receivers dropped");
                    break;
                }
            }
        }
    });

    (
        PollHandle {
            join,
            stop_tx: Some(stop_tx),
        },
        rx,
    )
}
