//! Shared tooltip display state.

use serde_json::Value;
use tftstats_types::{TooltipPlacement, TooltipVariant};

use super::content::{render, TooltipBody};

/// Identifies the element that owns the tooltip.
pub type TriggerId = u64;

/// Everything a renderer needs to draw the single tooltip surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipDisplay {
    pub visible: bool,
    pub trigger: Option<TriggerId>,
    pub variant: TooltipVariant,
    pub content: Value,
    pub placement: TooltipPlacement,
}

impl TooltipDisplay {
    /// Body to draw, or `Empty` while hidden.
    pub fn body(&self) -> TooltipBody {
        if !self.visible {
            return TooltipBody::Empty;
        }
        render(self.variant, &self.content)
    }
}
