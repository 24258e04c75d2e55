//! HTTP surface over the rating store and analytics engine.
//!
//! Thin by design: every handler is one repository or analytics call plus
//! serialization. Authorization is deliberately absent; anyone embedding
//! this router in a network-facing product must gate it themselves.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
