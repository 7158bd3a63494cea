//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, LocationCodeValidationError, TripSearchValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidLocation,
    InvalidSortBy,
    EmptyId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidLocation => "invalid_location",
            ErrorCode::InvalidSortBy => "invalid_sort_by",
            ErrorCode::EmptyId => "empty_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const ORIGIN: FieldName = FieldName::new("origin");
pub(crate) const DESTINATION: FieldName = FieldName::new("destination");
pub(crate) const SORT_BY: FieldName = FieldName::new("sort_by");
pub(crate) const TRIP_ID: FieldName = FieldName::new("id");

fn field_error(field: FieldName, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_value_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
    )
}

pub(crate) fn empty_id_error() -> Error {
    field_error(
        TRIP_ID,
        "trip id must not be empty".to_owned(),
        ErrorCode::EmptyId,
    )
}

/// Translate a search parameter failure into an `invalid_request` error that
/// names the offending query parameter.
pub(crate) fn map_search_validation_error(
    err: TripSearchValidationError,
    raw_value: &str,
) -> Error {
    match &err {
        TripSearchValidationError::Origin(LocationCodeValidationError::Empty)
        | TripSearchValidationError::Destination(LocationCodeValidationError::Empty) => {
            let field = if err.field() == ORIGIN.as_str() {
                ORIGIN
            } else {
                DESTINATION
            };
            missing_field_error(field)
        }
        TripSearchValidationError::Origin(_) => field_value_error(
            ORIGIN,
            err.to_string(),
            ErrorCode::InvalidLocation,
            raw_value,
        ),
        TripSearchValidationError::Destination(_) => field_value_error(
            DESTINATION,
            err.to_string(),
            ErrorCode::InvalidLocation,
            raw_value,
        ),
        TripSearchValidationError::SortBy(_) => field_value_error(
            SORT_BY,
            "sort_by must be fastest or cheapest".to_owned(),
            ErrorCode::InvalidSortBy,
            raw_value,
        ),
    }
}
