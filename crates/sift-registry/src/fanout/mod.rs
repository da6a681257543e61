//! Ordered concurrent fan-out
//!
//! Runs one future per input item and collects the outputs in input order,
//! either all at once or with at most `n` in flight.

use std::future::Future;
use std::num::NonZeroUsize;

use futures::future::join_all;
use futures::stream::{self, StreamExt};

/// How many fan-out requests may be in flight at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Concurrency {
    /// Start every request immediately
    #[default]
    Unbounded,
    /// At most this many requests in flight
    Limited(NonZeroUsize),
}

impl Concurrency {
    /// `0` means unbounded
    pub fn from_limit(limit: usize) -> Self {
        NonZeroUsize::new(limit).map_or(Concurrency::Unbounded, Concurrency::Limited)
    }
}

/// Apply `f` to every item concurrently; output order equals input order
pub async fn fan_out<I, F, Fut>(items: I, concurrency: Concurrency, f: F) -> Vec<Fut::Output>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future,
{
    match concurrency {
        Concurrency::Unbounded => join_all(items.into_iter().map(f)).await,
        Concurrency::Limited(limit) => {
            stream::iter(items)
                .map(f)
                .buffered(limit.get())
                .collect()
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_from_limit() {
        assert_eq!(Concurrency::from_limit(0), Concurrency::Unbounded);
        assert_eq!(
            Concurrency::from_limit(4),
            Concurrency::Limited(NonZeroUsize::new(4).unwrap())
        );
    }

    #[tokio::test]
    async fn test_output_order_matches_input() {
        for concurrency in [Concurrency::Unbounded, Concurrency::from_limit(2)] {
            // Later items finish first
            let results = fan_out(1..=5u64, concurrency, |n| async move {
                tokio::time::sleep(Duration::from_millis(30 - n * 5)).await;
                n * 10
            })
            .await;

            assert_eq!(results, vec![10, 20, 30, 40, 50]);
        }
    }

    #[tokio::test]
    async fn test_limited_caps_in_flight() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let results = fan_out(0..12, Concurrency::from_limit(3), |n| {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                for _ in 0..4 {
                    tokio::task::yield_now().await;
                }
                in_flight.fetch_sub(1, Ordering::SeqCst);
                n
            }
        })
        .await;

        assert_eq!(results, (0..12).collect::<Vec<_>>());
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(peak.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let results: Vec<u8> = fan_out(Vec::<u8>::new(), Concurrency::Unbounded, |n| async move { n }).await;
        assert!(results.is_empty());
    }
}
