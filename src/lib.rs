//! # Battleboard
//!
//! A battle-royale player stats tracker with multi-player comparison.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (player ids, stats, contexts, metrics)
//! - **calculate**: The comparison engine (normalize, aggregate, rank)
//! - **fetch**: Upstream stats API client with response caching
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod models;

pub use models::*;
