//! IATA location codes used as search origins and destinations.

use std::fmt;

use thiserror::Error;

/// Airports the trip provider integration accepts as origin or destination.
pub const SUPPORTED_LOCATIONS: [&str; 50] = [
    "ATL", "PEK", "LAX", "DXB", "HND", "ORD", "LHR", "PVG", "CDG", "DFW", "AMS", "FRA", "IST",
    "CAN", "JFK", "SIN", "DEN", "ICN", "BKK", "SFO", "LAS", "CLT", "MIA", "KUL", "SEA", "MUC",
    "EWR", "MAD", "HKG", "MCO", "PHX", "IAH", "SYD", "MEL", "GRU", "YYZ", "LGW", "BCN", "MAN",
    "BOM", "DEL", "ZRH", "SVO", "DME", "JNB", "ARN", "OSL", "CPH", "HEL", "VIE",
];

/// Length of an IATA location code.
pub const LOCATION_CODE_LEN: usize = 3;

/// Validation errors returned by [`LocationCode::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationCodeValidationError {
    /// Input was empty after trimming.
    #[error("location code must not be empty")]
    Empty,
    /// Input was not exactly three ASCII letters.
    #[error("location code must be a 3-letter IATA code")]
    Malformed,
}

/// Three-letter IATA code, normalised to upper case.
///
/// # Examples
/// ```
/// use trip_backend::domain::LocationCode;
///
/// let code = LocationCode::new("jfk").expect("valid code");
/// assert_eq!(code.as_str(), "JFK");
/// assert!(LocationCode::new("JFKX").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationCode(String);

impl LocationCode {
    /// Validate and normalise a location code.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LocationCodeValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(LocationCodeValidationError::Empty);
        }
        if trimmed.len() != LOCATION_CODE_LEN || !trimmed.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(LocationCodeValidationError::Malformed);
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Borrow the normalised code.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the code appears in [`SUPPORTED_LOCATIONS`].
    pub fn is_supported(&self) -> bool {
        SUPPORTED_LOCATIONS.contains(&self.as_str())
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for LocationCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("JFK", "JFK")]
    #[case("lax", "LAX")]
    #[case(" cdg ", "CDG")]
    fn normalises_valid_codes(#[case] raw: &str, #[case] expected: &str) {
        let code = LocationCode::new(raw).expect("valid code");
        assert_eq!(code.as_str(), expected);
    }

    #[rstest]
    #[case("", LocationCodeValidationError::Empty)]
    #[case("   ", LocationCodeValidationError::Empty)]
    #[case("JF", LocationCodeValidationError::Malformed)]
    #[case("JFKL", LocationCodeValidationError::Malformed)]
    #[case("J1K", LocationCodeValidationError::Malformed)]
    fn rejects_malformed_codes(#[case] raw: &str, #[case] expected: LocationCodeValidationError) {
        assert_eq!(LocationCode::new(raw), Err(expected));
    }

    #[rstest]
    fn supported_list_has_no_duplicates() {
        let mut codes = SUPPORTED_LOCATIONS.to_vec();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), SUPPORTED_LOCATIONS.len());
    }

    #[rstest]
    #[case("JFK", true)]
    #[case("XXX", false)]
    fn reports_support(#[case] raw: &str, #[case] expected: bool) {
        let code = LocationCode::new(raw).expect("valid code");
        assert_eq!(code.is_supported(), expected);
    }
}
