//! Trip provider outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `TripSource` port.

mod dto;
mod http_source;

pub use http_source::TripApiHttpSource;
