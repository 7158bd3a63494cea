//! Content fingerprints proving a trip was surfaced by a search.
//!
//! The fingerprint hashes the identifying tuple
//! `origin:destination:cost:duration:type:id` with SHA-256. Changing any of
//! those fields yields a different fingerprint; `display_name` is not part of
//! the tuple. Trip validation keeps `:` out of every string field but the
//! trailing id, so each tuple splits back into exactly one trip.

use std::fmt;

use sha2::{Digest, Sha256};

use super::trip::{FINGERPRINT_SEPARATOR, Trip};

/// Key prefix under which authenticity records are stored.
pub const AUTHENTICITY_KEY_PREFIX: &str = "valid-trip:";

/// Hex-encoded SHA-256 fingerprint of a trip.
///
/// # Examples
/// ```
/// use trip_backend::domain::{Trip, TripDraft, TripFingerprint};
///
/// let trip = Trip::try_from(TripDraft {
///     id: "a1".into(),
///     origin: "JFK".into(),
///     destination: "LAX".into(),
///     cost: 300.0,
///     duration: 6.0,
///     transport_type: "flight".into(),
///     display_name: "Nonstop".into(),
/// })
/// .expect("valid trip");
/// let fingerprint = TripFingerprint::of(&trip);
/// assert_eq!(fingerprint.as_str().len(), 64);
/// assert!(fingerprint.storage_key().starts_with("valid-trip:"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripFingerprint(String);

impl TripFingerprint {
    /// Compute the fingerprint for a trip.
    #[must_use]
    pub fn of(trip: &Trip) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(canonical_tuple(trip).as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Storage key `valid-trip:{fingerprint}`.
    pub fn storage_key(&self) -> String {
        format!("{AUTHENTICITY_KEY_PREFIX}{}", self.0)
    }
}

impl fmt::Display for TripFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integral numbers render without a fractional part (`300`, not `300.0`).
fn canonical_tuple(trip: &Trip) -> String {
    let sep = FINGERPRINT_SEPARATOR;
    format!(
        "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
        trip.origin(),
        trip.destination(),
        trip.cost(),
        trip.duration(),
        trip.transport_type(),
        trip.id()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TripDraft;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> TripDraft {
        TripDraft {
            id: "a1".into(),
            origin: "JFK".into(),
            destination: "LAX".into(),
            cost: 300.0,
            duration: 6.5,
            transport_type: "flight".into(),
            display_name: "Nonstop".into(),
        }
    }

    fn build(draft: TripDraft) -> Trip {
        Trip::try_from(draft).expect("valid trip")
    }

    #[rstest]
    fn tuple_uses_plain_number_rendering(draft: TripDraft) {
        assert_eq!(canonical_tuple(&build(draft)), "JFK:LAX:300:6.5:flight:a1");
    }

    #[rstest]
    fn fingerprint_matches_sha256_of_tuple(draft: TripDraft) {
        let expected = hex::encode(Sha256::digest(b"JFK:LAX:300:6.5:flight:a1"));
        assert_eq!(TripFingerprint::of(&build(draft)).as_str(), expected);
    }

    #[rstest]
    fn fingerprint_is_deterministic(draft: TripDraft) {
        let trip = build(draft);
        assert_eq!(TripFingerprint::of(&trip), TripFingerprint::of(&trip));
    }

    #[rstest]
    #[case::cost(|d: &mut TripDraft| d.cost = 299.0)]
    #[case::duration(|d: &mut TripDraft| d.duration = 7.0)]
    #[case::origin(|d: &mut TripDraft| d.origin = "JFX".into())]
    #[case::destination(|d: &mut TripDraft| d.destination = "SFO".into())]
    #[case::transport(|d: &mut TripDraft| d.transport_type = "train".into())]
    #[case::id(|d: &mut TripDraft| d.id = "a2".into())]
    fn hashed_field_changes_fingerprint(draft: TripDraft, #[case] mutate: fn(&mut TripDraft)) {
        let original = TripFingerprint::of(&build(draft.clone()));
        let mut changed = draft;
        mutate(&mut changed);
        assert_ne!(original, TripFingerprint::of(&build(changed)));
    }

    #[rstest]
    fn display_name_is_not_hashed(draft: TripDraft) {
        let original = TripFingerprint::of(&build(draft.clone()));
        let mut renamed = draft;
        renamed.display_name = "Renamed".into();
        assert_eq!(original, TripFingerprint::of(&build(renamed)));
    }

    #[rstest]
    fn separator_cannot_shift_between_type_and_id(draft: TripDraft) {
        let mut surfaced = draft.clone();
        surfaced.id = "a:1".into();
        let surfaced = build(surfaced);

        let mut forged = draft;
        forged.transport_type = "flight:a".into();
        forged.id = "1".into();

        assert!(Trip::try_from(forged).is_err());
        assert_eq!(canonical_tuple(&surfaced), "JFK:LAX:300:6.5:flight:a:1");
    }
}
