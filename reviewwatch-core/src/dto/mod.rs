//! Data transfer objects for the review API
//!
//! The review API is a loosely versioned third-party contract, so the raw
//! payload is decoded with explicit structural checks instead of being
//! trusted to match a schema.

pub mod feed;
