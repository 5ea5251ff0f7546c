//! Tooltip geometry and variant models.

use serde::{Deserialize, Serialize};

/// Screen-space bounding box of a trigger element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Build a rect from its origin and extent.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, right: left + width, bottom: top + height, width, height }
    }
}

/// Width and height of a tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Current visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1920.0, height: 1080.0 }
    }
}

/// Anchor point computed for a tooltip.
///
/// `x` is the horizontal centre of the tooltip. When `is_below` is false,
/// `y` is the bottom edge of the tooltip (it grows upward from the anchor);
/// otherwise it is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipPlacement {
    pub x: f64,
    pub y: f64,
    pub is_below: bool,
}

/// Closed set of tooltip content templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TooltipVariant {
    Champion,
    Item,
    Trait,
    OtherTraits,
    Augment,
    Force,
    SkillTree,
    #[default]
    Default,
}

impl TooltipVariant {
    pub const ALL: [TooltipVariant; 8] = [
        TooltipVariant::Champion,
        TooltipVariant::Item,
        TooltipVariant::Trait,
        TooltipVariant::OtherTraits,
        TooltipVariant::Augment,
        TooltipVariant::Force,
        TooltipVariant::SkillTree,
        TooltipVariant::Default,
    ];

    /// Resolve a variant by its name. Unknown names map to `Default`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL.into_iter().find(|v| v.as_str() == name).unwrap_or(Self::Default)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TooltipVariant::Champion => "champion",
            TooltipVariant::Item => "item",
            TooltipVariant::Trait => "trait",
            TooltipVariant::OtherTraits => "otherTraits",
            TooltipVariant::Augment => "augment",
            TooltipVariant::Force => "force",
            TooltipVariant::SkillTree => "skillTree",
            TooltipVariant::Default => "default",
        }
    }

    /// Estimated rendered size used for placement.
    ///
    /// A fixed table, not a measurement of the rendered content.
    pub fn estimated_size(&self) -> Size {
        match self {
            TooltipVariant::Champion => Size::new(320.0, 260.0),
            TooltipVariant::Item => Size::new(260.0, 160.0),
            TooltipVariant::Trait | TooltipVariant::OtherTraits => Size::new(280.0, 200.0),
            TooltipVariant::Augment => Size::new(260.0, 140.0),
            TooltipVariant::Force => Size::new(260.0, 160.0),
            TooltipVariant::SkillTree => Size::new(300.0, 220.0),
            TooltipVariant::Default => Size::new(200.0, 100.0),
        }
    }
}

impl std::fmt::Display for TooltipVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
