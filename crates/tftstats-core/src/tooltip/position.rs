//! Viewport-aware tooltip placement.

use tftstats_types::{Rect, Size, TooltipPlacement, Viewport};

/// Default distance kept from the trigger and from the viewport edges.
pub const DEFAULT_MARGIN: f64 = 10.0;

/// Compute where a tooltip of `size` anchored to `origin` should go.
///
/// The tooltip is centred above the trigger, shifted horizontally to stay
/// inside the viewport, flipped below the trigger when there is no room
/// above, and finally pulled up if it would leave the bottom edge. Inputs
/// larger than the viewport still produce a placement (possibly with
/// negative coordinates); this never panics.
pub fn compute_placement(
    origin: &Rect,
    size: Size,
    viewport: Viewport,
    margin: f64,
) -> TooltipPlacement {
    let half_width = size.width / 2.0;

    let mut x = origin.left + origin.width / 2.0;
    let mut y = origin.top - margin;
    let mut is_below = false;

    if x - half_width < margin {
        x = half_width + margin;
    }
    if x + half_width > viewport.width - margin {
        x = viewport.width - half_width - margin;
    }

    if y - size.height < margin {
        y = origin.bottom + margin;
        is_below = true;
    }

    if y + size.height > viewport.height - margin {
        y = viewport.height - size.height - margin;
    }

    TooltipPlacement { x, y, is_below }
}
