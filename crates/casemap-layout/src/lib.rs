#![forbid(unsafe_code)]

//! Headless marker layout for case catalogs.
//!
//! `casemap-layout` decides where each map marker goes. Records that share a spot (after rounding
//! to a configurable number of decimal digits) are fanned out along one axis so every marker stays
//! clickable; records without usable coordinates are reported as unplaced instead of being guessed.
//!
//! The crate does no I/O and keeps no state between calls.

pub mod error;
pub mod key;
pub mod options;
pub mod record;
pub mod resolve;

pub use error::{Error, Result};
pub use key::CollisionKey;
pub use options::{
    DEFAULT_COORDINATE_PRECISION, DEFAULT_OFFSET_STEP, MAX_COORDINATE_PRECISION, OffsetAxis,
    ResolveOptions,
};
pub use record::{CoordinateCheck, LatLng, PlacementResult, PointRecord, validate_coordinates};
pub use resolve::resolve_placements;
