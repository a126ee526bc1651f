use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::SourceError;

/// Time source for staleness checks. Injected so tests can move time without
/// sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct Entry<V> {
    fetched_at: DateTime<Utc>,
    value: V,
}

/// Per-source cache with lazy TTL expiry.
///
/// Staleness is evaluated on read; there are no background timers. When a
/// refresh fails and a stale entry exists, the stale entry is served: an
/// outdated number beats a blank dashboard.
#[derive(Clone)]
pub struct TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Mutex<HashMap<K, Entry<V>>>>,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }

    /// Returns the cached value if it is within `ttl` of its fetch time,
    /// otherwise invokes `producer`. A successful refresh is stored with a
    /// fresh timestamp. A failed refresh returns the previous value when one
    /// exists, else the producer's error.
    ///
    /// The lock is never held across the producer's await point.
    pub async fn get_or_refresh<F, Fut>(
        &self,
        key: K,
        ttl: TimeDelta,
        producer: F,
    ) -> Result<V, SourceError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, SourceError>>,
    {
        let now = self.clock.now();
        {
            let cache = self.inner.lock().await;
            if let Some(entry) = cache.get(&key) {
                if now - entry.fetched_at <= ttl {
                    debug!("Cache HIT");
                    return Ok(entry.value.clone());
                }
                debug!("Cache STALE");
            } else {
                debug!("Cache MISS");
            }
        }

        match producer().await {
            Ok(value) => {
                let mut cache = self.inner.lock().await;
                cache.insert(
                    key,
                    Entry {
                        fetched_at: self.clock.now(),
                        value: value.clone(),
                    },
                );
                Ok(value)
            }
            Err(err) => {
                let cache = self.inner.lock().await;
                match cache.get(&key) {
                    Some(entry) => {
                        debug!(error = %err, "Refresh failed, serving stale value");
                        Ok(entry.value.clone())
                    }
                    None => Err(err),
                }
            }
        }
    }

    /// Drops every entry so the next read refetches. Backs `refresh()`.
    pub async fn invalidate_all(&self) {
        let mut cache = self.inner.lock().await;
        debug!("Cache INVALIDATE");
        cache.clear();
    }
}
