//! Trip records surfaced by searches and persisted by users.
//!
//! A [`Trip`] is only constructed through validation: either from a typed
//! [`TripDraft`] or from a loosely typed [`TripPayload`] as received over the
//! wire or read back from storage. Once built it is immutable.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Separator joining the fields of the authenticity fingerprint tuple.
pub(crate) const FINGERPRINT_SEPARATOR: char = ':';

/// Machine-readable reason attached to a [`TripValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripFieldIssue {
    /// The field was absent or `null`.
    MissingField,
    /// The field held a JSON value of the wrong type.
    InvalidType,
    /// A string field was empty once trimmed.
    EmptyField,
    /// A numeric field was negative.
    NegativeValue,
    /// A string field contained the `:` fingerprint separator.
    ReservedCharacter,
}

impl TripFieldIssue {
    /// Stable snake_case label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidType => "invalid_type",
            Self::EmptyField => "empty_field",
            Self::NegativeValue => "negative_value",
            Self::ReservedCharacter => "reserved_character",
        }
    }
}

impl fmt::Display for TripFieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First structural problem found while validating a trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("trip field `{field}` is invalid: {issue}")]
pub struct TripValidationError {
    field: &'static str,
    issue: TripFieldIssue,
}

impl TripValidationError {
    fn new(field: &'static str, issue: TripFieldIssue) -> Self {
        Self { field, issue }
    }

    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Reason the field was rejected.
    pub fn issue(&self) -> TripFieldIssue {
        self.issue
    }

    /// Structured details suitable for [`crate::domain::Error::with_details`].
    pub fn details(&self) -> Value {
        json!({
            "field": self.field,
            "code": self.issue.as_str(),
        })
    }
}

/// Opaque, non-blank trip identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TripId(String);

/// Validation errors for [`TripId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripIdValidationError {
    /// Identifier was empty once trimmed.
    #[error("trip id must not be empty")]
    Empty,
}

impl TripId {
    /// Validate an identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, TripIdValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TripIdValidationError::Empty);
        }
        Ok(Self(value))
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for TripId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Typed input for building a [`Trip`].
#[derive(Debug, Clone, PartialEq)]
pub struct TripDraft {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub cost: f64,
    pub duration: f64,
    pub transport_type: String,
    pub display_name: String,
}

/// A validated trip.
///
/// # Examples
/// ```
/// use trip_backend::domain::{Trip, TripDraft};
///
/// let trip = Trip::try_from(TripDraft {
///     id: "a1".into(),
///     origin: "JFK".into(),
///     destination: "LAX".into(),
///     cost: 250.0,
///     duration: 6.0,
///     transport_type: "flight".into(),
///     display_name: "Morning flight".into(),
/// })
/// .expect("valid trip");
/// assert_eq!(trip.cost(), 250.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TripPayload")]
pub struct Trip {
    id: TripId,
    origin: String,
    destination: String,
    cost: f64,
    duration: f64,
    #[serde(rename = "type")]
    transport_type: String,
    display_name: String,
}

impl Trip {
    pub fn id(&self) -> &TripId {
        &self.id
    }

    pub fn origin(&self) -> &str {
        self.origin.as_str()
    }

    pub fn destination(&self) -> &str {
        self.destination.as_str()
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Transport mode, serialised as `type`.
    pub fn transport_type(&self) -> &str {
        self.transport_type.as_str()
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }
}

fn non_blank(field: &'static str, value: String) -> Result<String, TripValidationError> {
    if value.trim().is_empty() {
        return Err(TripValidationError::new(field, TripFieldIssue::EmptyField));
    }
    Ok(value)
}

/// Fields that precede the id in the fingerprint tuple must not contain its
/// separator, or two different trips could hash the same string.
fn separator_free(field: &'static str, value: String) -> Result<String, TripValidationError> {
    let value = non_blank(field, value)?;
    if value.contains(FINGERPRINT_SEPARATOR) {
        return Err(TripValidationError::new(
            field,
            TripFieldIssue::ReservedCharacter,
        ));
    }
    Ok(value)
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, TripValidationError> {
    if !value.is_finite() {
        return Err(TripValidationError::new(field, TripFieldIssue::InvalidType));
    }
    if value < 0.0 {
        return Err(TripValidationError::new(field, TripFieldIssue::NegativeValue));
    }
    Ok(value)
}

impl TryFrom<TripDraft> for Trip {
    type Error = TripValidationError;

    fn try_from(draft: TripDraft) -> Result<Self, Self::Error> {
        let TripDraft {
            id,
            origin,
            destination,
            cost,
            duration,
            transport_type,
            display_name,
        } = draft;

        let id = TripId::new(id)
            .map_err(|_| TripValidationError::new("id", TripFieldIssue::EmptyField))?;
        Ok(Self {
            id,
            origin: separator_free("origin", origin)?,
            destination: separator_free("destination", destination)?,
            cost: non_negative("cost", cost)?,
            duration: non_negative("duration", duration)?,
            transport_type: separator_free("type", transport_type)?,
            display_name: non_blank("display_name", display_name)?,
        })
    }
}

/// Unvalidated trip as received from clients, the provider or storage.
///
/// Every field is an arbitrary JSON value so that type errors surface as
/// [`TripValidationError`]s rather than opaque decode failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripPayload {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub origin: Option<Value>,
    #[serde(default)]
    pub destination: Option<Value>,
    #[serde(default)]
    pub cost: Option<Value>,
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default, rename = "type")]
    pub transport_type: Option<Value>,
    #[serde(default)]
    pub display_name: Option<Value>,
}

fn require<'a>(
    field: &'static str,
    value: Option<&'a Value>,
) -> Result<&'a Value, TripValidationError> {
    match value {
        None | Some(Value::Null) => Err(TripValidationError::new(
            field,
            TripFieldIssue::MissingField,
        )),
        Some(value) => Ok(value),
    }
}

fn string_field(field: &'static str, value: Option<&Value>) -> Result<String, TripValidationError> {
    require(field, value)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| TripValidationError::new(field, TripFieldIssue::InvalidType))
}

fn number_field(field: &'static str, value: Option<&Value>) -> Result<f64, TripValidationError> {
    require(field, value)?
        .as_f64()
        .ok_or_else(|| TripValidationError::new(field, TripFieldIssue::InvalidType))
}

impl TryFrom<TripPayload> for Trip {
    type Error = TripValidationError;

    fn try_from(payload: TripPayload) -> Result<Self, Self::Error> {
        let draft = TripDraft {
            id: string_field("id", payload.id.as_ref())?,
            origin: string_field("origin", payload.origin.as_ref())?,
            destination: string_field("destination", payload.destination.as_ref())?,
            cost: number_field("cost", payload.cost.as_ref())?,
            duration: number_field("duration", payload.duration.as_ref())?,
            transport_type: string_field("type", payload.transport_type.as_ref())?,
            display_name: string_field("display_name", payload.display_name.as_ref())?,
        };
        Trip::try_from(draft)
    }
}

impl From<&Trip> for TripPayload {
    fn from(trip: &Trip) -> Self {
        Self {
            id: Some(json!(trip.id.as_str())),
            origin: Some(json!(trip.origin)),
            destination: Some(json!(trip.destination)),
            cost: Some(json!(trip.cost)),
            duration: Some(json!(trip.duration)),
            transport_type: Some(json!(trip.transport_type)),
            display_name: Some(json!(trip.display_name)),
        }
    }
}
