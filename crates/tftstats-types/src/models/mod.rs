//! Core domain models for TFT Stats.
//!
//! This module contains the shared data structures used across the workspace.

mod bundle;
mod config;
mod tooltip;

// Re-export all models
pub use bundle::{Collection, Entity, GameDataBundle, RawBundle};
pub use config::{AppConfig, CacheSettings, ClientSettings, TooltipSettings};
pub use tooltip::{Rect, Size, TooltipPlacement, TooltipVariant, Viewport};
