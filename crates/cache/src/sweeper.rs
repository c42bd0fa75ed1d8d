use crate::error::{ErrorKind, Result};
use crate::store::ResponseCache;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to a background task periodically [sweeping](ResponseCache::sweep)
/// a cache. The task stops when the handle is dropped, or by itself once the
/// cache is gone.
#[derive(Debug)]
pub struct Sweeper {
    handle: JoinHandle<()>,
}
impl Sweeper {
    /// Start sweeping `cache` every `interval`. Must be called from within a
    /// Tokio runtime.
    pub fn spawn<V>(cache: &Arc<ResponseCache<V>>, interval: Duration) -> Result<Self>
    where
        V: Clone + Send + Sync + 'static,
    {
        if interval.is_zero() {
            exn::bail!(ErrorKind::InvalidInterval);
        }
        let cache = Arc::downgrade(cache);
        let handle = tokio::spawn(Self::run(cache, interval));
        Ok(Self { handle })
    }

    async fn run<V: Clone + Send + Sync>(cache: Weak<ResponseCache<V>>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; there's nothing to sweep yet.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let Some(cache) = cache.upgrade() else {
                tracing::debug!("Cache dropped; stopping sweeper");
                return;
            };
            cache.sweep().await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
impl Drop for Sweeper {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
