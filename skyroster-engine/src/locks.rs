//! Per-flight serialization boundary. Every mutating roster or seat
//! operation on a flight runs under that flight's mutex, so the
//! qualification check and the resulting write are atomic with respect to
//! other attempts on the same flight. Operations on different flights do not
//! contend.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Default)]
pub struct FlightLocks {
    inner: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl FlightLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one flight, waiting in arrival order behind any
    /// in-flight operation on the same flight. The guard is owned so it can
    /// be held across awaits.
    pub async fn acquire(&self, flight_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.inner.lock().expect("flight lock registry poisoned");
            // an entry only the registry still references has no guard and no
            // waiter; evict those so the map tracks in-flight operations, not
            // every flight id ever touched
            registry.retain(|_, lock| Arc::strong_count(lock) > 1);
            registry
                .entry(flight_id)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn same_flight_operations_are_serialized() {
        let locks = Arc::new(FlightLocks::new());
        let flight_id = Uuid::new_v4();
        let inside = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = locks.clone();
            let inside = inside.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(flight_id).await;
                let seen = inside.fetch_add(1, Ordering::SeqCst);
                assert_eq!(seen, 0, "two tasks inside the same flight's section");
                tokio::task::yield_now().await;
                inside.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn released_flight_entries_are_evicted() {
        let locks = FlightLocks::new();
        let flight_a = Uuid::new_v4();

        let guard = locks.acquire(flight_a).await;
        drop(guard);

        // the next acquire sweeps entries with no guard and no waiter
        let _other = locks.acquire(Uuid::new_v4()).await;
        let registry = locks.inner.lock().unwrap();
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains_key(&flight_a));
    }

    #[tokio::test]
    async fn different_flights_do_not_contend() {
        let locks = FlightLocks::new();
        let guard_a = locks.acquire(Uuid::new_v4()).await;
        // acquiring another flight's lock must not block
        let guard_b = locks.acquire(Uuid::new_v4()).await;
        drop(guard_a);
        drop(guard_b);
    }
}
