//! Debounced, stale-safe lookups for a location text field.
//!
//! Every call to [`LookupSession::input`] starts a new generation. A lookup
//! only runs if its generation is still current once the debounce interval
//! has elapsed, and its results are only published if the generation is
//! still current when the provider answers. A slow response for an earlier
//! query therefore never overwrites suggestions for a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cmship_core::GeocodeResult;
use cmship_geocode::GeocodeProvider;
use tokio::sync::watch;

use crate::lookup::{LocationLookup, LookupNotice};

/// Suggestions published for one generation of input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    pub generation: u64,
    /// Trimmed query as typed, without the country hint.
    pub query: String,
    pub results: Vec<GeocodeResult>,
    pub notice: Option<LookupNotice>,
}

/// Owns the debounce timer and the generation counter for one input field.
pub struct LookupSession<P> {
    lookup: Arc<LocationLookup<P>>,
    debounce: Duration,
    generation: Arc<AtomicU64>,
    tx: Arc<watch::Sender<Suggestions>>,
}

impl<P> LookupSession<P>
where
    P: GeocodeProvider + 'static,
{
    #[must_use]
    pub fn new(lookup: LocationLookup<P>, debounce: Duration) -> Self {
        let (tx, _rx) = watch::channel(Suggestions::default());
        Self {
            lookup: Arc::new(lookup),
            debounce,
            generation: Arc::new(AtomicU64::new(0)),
            tx: Arc::new(tx),
        }
    }

    /// Receiver that observes every published [`Suggestions`] value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.tx.subscribe()
    }

    /// Most recently published suggestions.
    #[must_use]
    pub fn latest(&self) -> Suggestions {
        self.tx.borrow().clone()
    }

    /// Generation of the most recent input.
    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Records new text in the field and schedules a debounced lookup.
    ///
    /// Blank text publishes an empty suggestion set immediately, with no
    /// provider call. Must be called from within a Tokio runtime.
    pub fn input(&self, query: &str) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim().to_string();

        if query.is_empty() {
            publish(
                &self.tx,
                &self.generation,
                Suggestions {
                    generation,
                    ..Suggestions::default()
                },
            );
            return generation;
        }

        let lookup = Arc::clone(&self.lookup);
        let latest = Arc::clone(&self.generation);
        let tx = Arc::clone(&self.tx);
        let debounce = self.debounce;

        tokio::spawn(async move {
            if !debounce.is_zero() {
                tokio::time::sleep(debounce).await;
            }
            if latest.load(Ordering::SeqCst) != generation {
                tracing::trace!(generation, query = %query, "lookup superseded during debounce");
                return;
            }

            let outcome = lookup.lookup(&query).await;

            let published = publish(
                &tx,
                &latest,
                Suggestions {
                    generation,
                    query: query.clone(),
                    results: outcome.results,
                    notice: outcome.notice,
                },
            );
            if !published {
                tracing::debug!(generation, query = %query, "discarding stale lookup results");
            }
        });

        generation
    }
}

/// Publishes `next` only if its generation is still the latest input and
/// newer than whatever is currently published.
fn publish(tx: &watch::Sender<Suggestions>, latest: &AtomicU64, next: Suggestions) -> bool {
    tx.send_if_modified(|current| {
        if latest.load(Ordering::SeqCst) != next.generation
            || current.generation >= next.generation
        {
            return false;
        }
        *current = next;
        true
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use cmship_core::{AddressComponents, Coordinates};
    use cmship_geocode::{GeocodeError, GeocodeRequest};
    use futures::future::BoxFuture;

    use super::*;
    use crate::lookup::LookupSettings;

    /// Answers each query after a per-query delay.
    struct DelayedProvider {
        delays: HashMap<String, Duration>,
        calls: Mutex<Vec<String>>,
    }

    impl DelayedProvider {
        fn new(delays: &[(&str, u64)]) -> Self {
            Self {
                delays: delays
                    .iter()
                    .map(|(q, ms)| ((*q).to_string(), Duration::from_millis(*ms)))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl GeocodeProvider for DelayedProvider {
        fn geocode<'a>(
            &'a self,
            request: &'a GeocodeRequest,
        ) -> BoxFuture<'a, Result<Vec<GeocodeResult>, GeocodeError>> {
            self.calls.lock().unwrap().push(request.query.clone());
            let delay = self
                .delays
                .get(&request.query)
                .copied()
                .unwrap_or_default();
            let result = GeocodeResult {
                formatted: request.query.clone(),
                coordinates: Some(Coordinates::new(4.0, 10.0)),
                components: AddressComponents::default(),
            };
            Box::pin(async move {
                tokio::time::sleep(delay).await;
                Ok(vec![result])
            })
        }

        fn name(&self) -> &'static str {
            "delayed"
        }
    }

    fn session(provider: DelayedProvider, debounce_ms: u64) -> LookupSession<Arc<DelayedProvider>> {
        session_with(Arc::new(provider), debounce_ms)
    }

    fn session_with(
        provider: Arc<DelayedProvider>,
        debounce_ms: u64,
    ) -> LookupSession<Arc<DelayedProvider>> {
        let settings = LookupSettings {
            query_hint: None,
            ..LookupSettings::default()
        };
        LookupSession::new(
            LocationLookup::new(provider, settings),
            Duration::from_millis(debounce_ms),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn late_results_for_superseded_query_are_discarded() {
        let provider = Arc::new(DelayedProvider::new(&[("Douala", 500), ("Yaoundé", 100)]));
        let session = session_with(Arc::clone(&provider), 0);
        let mut rx = session.subscribe();

        session.input("Douala");
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = session.input("Yaoundé");

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().query, "Yaoundé");

        // Let the slow Douala response land.
        tokio::time::sleep(Duration::from_millis(1000)).await;

        let latest = session.latest();
        assert_eq!(latest.generation, second);
        assert_eq!(latest.query, "Yaoundé");
        assert_eq!(latest.results[0].formatted, "Yaoundé");
        assert!(!rx.has_changed().unwrap(), "Douala results must not be published");
        assert_eq!(
            *provider.calls.lock().unwrap(),
            vec!["Douala".to_string(), "Yaoundé".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_keystrokes_makes_one_call() {
        let provider = Arc::new(DelayedProvider::new(&[]));
        let session = session_with(Arc::clone(&provider), 300);

        for q in ["D", "Do", "Dou", "Doua"] {
            session.input(q);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*provider.calls.lock().unwrap(), vec!["Doua".to_string()]);
        assert_eq!(session.latest().query, "Doua");
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_clears_without_network() {
        let provider = Arc::new(DelayedProvider::new(&[]));
        let session = session_with(Arc::clone(&provider), 300);

        let generation = session.input("   ");
        let latest = session.latest();
        assert_eq!(latest.generation, generation);
        assert!(latest.results.is_empty());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_the_field_discards_in_flight_lookup() {
        let session = session(DelayedProvider::new(&[("Kumba", 200)]), 0);

        session.input("Kumba");
        tokio::time::sleep(Duration::from_millis(50)).await;
        let cleared = session.input("");
        tokio::time::sleep(Duration::from_millis(500)).await;

        let latest = session.latest();
        assert_eq!(latest.generation, cleared);
        assert!(latest.results.is_empty());
        assert_eq!(session.current_generation(), cleared);
    }
}
