use core::time::Duration;
use std::sync::{Arc, Mutex};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;

/// Bounds the number of outbound requests in flight and lets any caller hold back new
/// requests for a while, typically after a service reported a rate limit.
///
/// Requests already running are never interrupted by a pause. When pauses overlap the
/// one ending last wins.
#[derive(Debug)]
pub struct Throttler {
    semaphore: Arc<Semaphore>,
    paused_until: Mutex<Option<Instant>>,
}

impl Throttler {
    /// Create a throttler admitting at most `max_concurrent` requests at a time.
    #[must_use]
    pub fn new(max_concurrent: usize) -> Arc<Self> {
        Arc::new(Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            paused_until: Mutex::new(None),
        })
    }

    /// Wait out any active pause, then take a request slot.
    ///
    /// The slot is released when the returned permit is dropped. Returns `None` only if
    /// the underlying semaphore was closed, which never happens in practice; callers
    /// proceed without a slot in that case.
    pub async fn acquire(&self) -> Option<OwnedSemaphorePermit> {
        while let Some(remaining) = self.pause_remaining() {
            tokio::time::sleep(remaining).await;
        }

        Arc::clone(&self.semaphore).acquire_owned().await.ok()
    }

    /// Whether new requests are currently being held back.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.pause_remaining().is_some()
    }

    /// Hold back new requests for `duration`.
    ///
    /// Returns `false` and leaves the current pause untouched if it already ends at or
    /// after the requested time.
    pub fn pause_for(&self, duration: Duration) -> bool {
        let until = Instant::now() + duration;
        let mut guard = self.paused_until.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        if guard.is_some_and(|existing| existing >= until) {
            return false;
        }

        *guard = Some(until);
        true
    }

    fn pause_remaining(&self) -> Option<Duration> {
        let guard = self.paused_until.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.and_then(|until| until.checked_duration_since(Instant::now())).filter(|d| !d.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_limits_concurrency() {
        let throttler = Throttler::new(2);
        let active = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let throttler = Arc::clone(&throttler);
                let active = Arc::clone(&active);
                let max_seen = Arc::clone(&max_seen);
                tokio::spawn(async move {
                    let _permit = throttler.acquire().await;
                    let current = active.fetch_add(1, Ordering::SeqCst) + 1;
                    _ = max_seen.fetch_max(current, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    _ = active.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        _ = futures_util::future::join_all(tasks).await;

        assert!(max_seen.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_delays_new_requests() {
        let throttler = Throttler::new(5);
        assert!(throttler.pause_for(Duration::from_secs(30)));
        assert!(throttler.is_paused());

        let start = Instant::now();
        let _permit = throttler.acquire().await;

        assert!(start.elapsed() >= Duration::from_secs(30));
        assert!(!throttler.is_paused());
    }

    #[tokio::test(start_paused = true)]
    async fn test_longer_pause_wins() {
        let throttler = Throttler::new(1);
        assert!(throttler.pause_for(Duration::from_secs(60)));
        assert!(!throttler.pause_for(Duration::from_secs(10)));
        assert!(throttler.pause_for(Duration::from_secs(120)));

        let start = Instant::now();
        let _permit = throttler.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(120));
    }
}
