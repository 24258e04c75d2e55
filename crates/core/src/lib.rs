//! Domain types and the read-side analytics engine for the face rating
//! platform.
//!
//! Everything in this crate is pure: no I/O, no database handles. The
//! persistence layer (`facerate-db`) converts stored rows into
//! [`rating::RatingEvent`] values at its boundary and hands slices of them
//! to the `compute_*` functions here.

pub mod error;
pub mod export;
pub mod image_stats;
pub mod overview;
pub mod rating;
pub mod stats;
pub mod types;
pub mod user_stats;
