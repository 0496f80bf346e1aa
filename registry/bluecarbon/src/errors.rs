//! Registry-wide error types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    #[error("project {id}: boundary has {count} positions, at least 4 are required")]
    TooFewPositions { id: String, count: usize },

    #[error("project {id}: boundary ring is not closed")]
    OpenRing { id: String },

    #[error("project {id}: boundary ring has fewer than 3 distinct positions")]
    DegenerateRing { id: String },

    #[error("project {id}: position {index} ({lng}, {lat}) is outside WGS84 bounds")]
    PositionOutOfRange {
        id: String,
        index: usize,
        lng: f64,
        lat: f64,
    },

    #[error("project {id}: {retired} credits retired exceeds {issued} issued")]
    RetiredExceedsIssued { id: String, issued: u64, retired: u64 },

    #[error("project {id}: area {area} is not a non-negative number")]
    InvalidArea { id: String, area: f64 },

    #[error("invalid date {raw:?}: {reason}")]
    InvalidDate { raw: String, reason: String },

    #[error("unknown {field} value {value:?}")]
    UnknownValue { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
