use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::join_all;

/// Run `f` once per key with a fixed-size worker pool. Workers claim
/// indices from a shared cursor, so at most `concurrency` calls are in
/// flight at any moment regardless of key count. The output is aligned
/// with the input: same length, same order.
///
/// Degradation policy lives in `f` itself; the pool never drops a key.
pub async fn map_bounded<T, F, Fut>(keys: &[String], concurrency: usize, f: F) -> Vec<T>
where
    F: Fn(String) -> Fut + Clone,
    Fut: Future<Output = T>,
{
    assert!(concurrency > 0, "pool concurrency must be > 0");
    if keys.is_empty() {
        return Vec::new();
    }

    let cursor = AtomicUsize::new(0);
    let cursor = &cursor;
    let workers = (0..concurrency.min(keys.len())).map(|_| {
        let f = f.clone();
        async move {
            let mut claimed = Vec::new();
            loop {
                let i = cursor.fetch_add(1, Ordering::Relaxed);
                if i >= keys.len() {
                    break;
                }
                claimed.push((i, f(keys[i].clone()).await));
            }
            claimed
        }
    });

    let mut results: Vec<(usize, T)> = join_all(workers).await.into_iter().flatten().collect();
    results.sort_by_key(|(i, _)| *i);
    results.into_iter().map(|(_, v)| v).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn keys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("SYM{i}")).collect()
    }

    #[test]
    fn preserves_order_and_length() {
        let keys = keys(17);
        let out = tokio_test::block_on(map_bounded(&keys, 6, |k| async move { k }));
        assert_eq!(out, keys);
    }

    #[tokio::test]
    async fn never_exceeds_concurrency_bound() {
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let in_flight = &in_flight;
        let peak = &peak;

        let keys = keys(30);
        map_bounded(&keys, 4, |_k| async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(2)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
        })
        .await;

        assert!(peak.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn empty_input_spawns_nothing() {
        let out: Vec<u8> = map_bounded(&[], 6, |_k| async move { 1u8 }).await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    #[should_panic(expected = "pool concurrency must be > 0")]
    async fn zero_concurrency_panics() {
        let keys = keys(1);
        let _: Vec<()> = map_bounded(&keys, 0, |_k| async move {}).await;
    }
}
