//! In-process `TripAuthenticityRegistry`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::domain::ports::{
    RegistrationOutcome, TripAuthenticityRegistry, TripAuthenticityRegistryError,
};
use crate::domain::{Trip, TripFingerprint};

/// Registry keyed by fingerprint, with an optional per-record lifetime.
#[derive(Debug, Default)]
pub struct InMemoryTripAuthenticityRegistry {
    records: Mutex<HashMap<TripFingerprint, Option<Instant>>>,
    ttl: Option<Duration>,
}

impl InMemoryTripAuthenticityRegistry {
    /// `ttl` of `None` keeps records forever.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            records: Mutex::default(),
            ttl,
        }
    }

    fn lock(
        &self,
    ) -> Result<
        std::sync::MutexGuard<'_, HashMap<TripFingerprint, Option<Instant>>>,
        TripAuthenticityRegistryError,
    > {
        self.records
            .lock()
            .map_err(|_| TripAuthenticityRegistryError::query("in-memory registry lock poisoned"))
    }
}

fn is_live(expires_at: Option<Instant>, now: Instant) -> bool {
    expires_at.is_none_or(|deadline| now < deadline)
}

#[async_trait]
impl TripAuthenticityRegistry for InMemoryTripAuthenticityRegistry {
    async fn register(
        &self,
        trip: &Trip,
    ) -> Result<RegistrationOutcome, TripAuthenticityRegistryError> {
        let fingerprint = TripFingerprint::of(trip);
        let now = Instant::now();
        let mut records = self.lock()?;
        if records
            .get(&fingerprint)
            .is_some_and(|expires_at| is_live(*expires_at, now))
        {
            return Ok(RegistrationOutcome::AlreadyKnown);
        }
        records.insert(fingerprint, self.ttl.map(|ttl| now + ttl));
        Ok(RegistrationOutcome::Registered)
    }

    async fn is_authentic(&self, trip: &Trip) -> Result<bool, TripAuthenticityRegistryError> {
        let fingerprint = TripFingerprint::of(trip);
        let now = Instant::now();
        let records = self.lock()?;
        Ok(records
            .get(&fingerprint)
            .is_some_and(|expires_at| is_live(*expires_at, now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TripDraft;

    fn trip(cost: f64) -> Trip {
        Trip::try_from(TripDraft {
            id: "a1".into(),
            origin: "JFK".into(),
            destination: "LAX".into(),
            cost,
            duration: 6.0,
            transport_type: "flight".into(),
            display_name: "Nonstop".into(),
        })
        .expect("valid trip")
    }

    #[tokio::test]
    async fn registration_is_idempotent() {
        let registry = InMemoryTripAuthenticityRegistry::new(None);

        assert_eq!(
            registry.register(&trip(300.0)).await.expect("register"),
            RegistrationOutcome::Registered
        );
        assert_eq!(
            registry.register(&trip(300.0)).await.expect("register"),
            RegistrationOutcome::AlreadyKnown
        );
    }

    #[tokio::test]
    async fn tampered_trip_is_not_authentic() {
        let registry = InMemoryTripAuthenticityRegistry::new(None);
        registry.register(&trip(300.0)).await.expect("register");

        assert!(registry.is_authentic(&trip(300.0)).await.expect("lookup"));
        assert!(!registry.is_authentic(&trip(1.0)).await.expect("lookup"));
    }

    #[tokio::test(start_paused = true)]
    async fn records_expire_when_ttl_is_set() {
        let registry = InMemoryTripAuthenticityRegistry::new(Some(Duration::from_secs(10)));
        registry.register(&trip(300.0)).await.expect("register");

        tokio::time::advance(Duration::from_secs(10)).await;

        assert!(!registry.is_authentic(&trip(300.0)).await.expect("lookup"));
        assert_eq!(
            registry.register(&trip(300.0)).await.expect("register"),
            RegistrationOutcome::Registered
        );
    }
}
