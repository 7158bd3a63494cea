//! Port recording which trips were surfaced by a search.
//!
//! Records are keyed by [`TripFingerprint`]; registration is set-if-absent so
//! repeated searches never overwrite an existing record.
//!
//! [`TripFingerprint`]: crate::domain::TripFingerprint

use async_trait::async_trait;

use crate::domain::Trip;

use super::define_port_error;

define_port_error! {
    /// Errors raised by authenticity registry adapters.
    pub enum TripAuthenticityRegistryError {
        /// Registry backend could not be reached.
        Connection { message: String } => "authenticity registry connection failed: {message}",
        /// Registry backend failed a command.
        Query { message: String } => "authenticity registry query failed: {message}",
        /// The trip could not be encoded for storage.
        Serialization { message: String } =>
            "authenticity registry serialisation failed: {message}",
    }
}

/// Result of [`TripAuthenticityRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// No record existed; one was written.
    Registered,
    /// A record already existed and was left untouched.
    AlreadyKnown,
}

/// Port for the authenticity registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripAuthenticityRegistry: Send + Sync {
    /// Record the trip's fingerprint if it is not yet known.
    async fn register(
        &self,
        trip: &Trip,
    ) -> Result<RegistrationOutcome, TripAuthenticityRegistryError>;

    /// Whether the trip's fingerprint was registered and has not expired.
    async fn is_authentic(&self, trip: &Trip) -> Result<bool, TripAuthenticityRegistryError>;
}

/// Registry that accepts every trip.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripAuthenticityRegistry;

#[async_trait]
impl TripAuthenticityRegistry for FixtureTripAuthenticityRegistry {
    async fn register(
        &self,
        _trip: &Trip,
    ) -> Result<RegistrationOutcome, TripAuthenticityRegistryError> {
        Ok(RegistrationOutcome::Registered)
    }

    async fn is_authentic(&self, _trip: &Trip) -> Result<bool, TripAuthenticityRegistryError> {
        Ok(true)
    }
}
