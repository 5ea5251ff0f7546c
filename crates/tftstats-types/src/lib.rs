//! # TFT Stats Types
//!
//! Core types, models, and error definitions for TFT Stats.
//!
//! This crate provides the foundational type system for the workspace:
//!
//! - **`error`** - Typed error hierarchy for fetching and configuration
//! - **`models`** - Game data bundle, tooltip geometry, and configuration models
//!
//! ## Architecture Role
//!
//! `tftstats-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!                tftstats-types (this crate)
//!                        │
//!            ┌───────────┴───────────┐
//!            ▼                       ▼
//!     tftstats-client ──────▶ tftstats-core
//!                                    │
//!                                    ▼
//!                              tftstats-cli
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for config files and CLI output
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{ConfigError, FetchError, Result, TypedError};

// Re-export core model types
pub use models::{
    AppConfig, CacheSettings, ClientSettings, Collection, Entity, GameDataBundle, RawBundle, Rect, Size,
    TooltipPlacement, TooltipSettings, TooltipVariant, Viewport,
};
