//! Tooltip placement and lifecycle.
//!
//! - [`position`] computes a viewport-safe anchor for a tooltip
//! - [`content`] maps content into the template of its variant
//! - [`TooltipManager`] owns the single display surface and its show/hide
//!   timers

pub mod content;
pub mod position;

mod lifecycle;
mod surface;


pub use content::{render, TooltipBody};
pub use lifecycle::{InputMode, TooltipManager, TooltipOptions};
pub use position::{compute_placement, DEFAULT_MARGIN};
pub use surface::{TooltipDisplay, TriggerId};
