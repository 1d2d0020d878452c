// =============================================================================
// COLLISION.RS — Swept rectangle resolution against static terrain
//
// Horizontal and vertical motion are resolved separately:
// - Horizontal: push the mover back out of anything it walked into
// - Vertical: compare previous and current edges so thin platforms are
//   never tunnelled through, then snap onto / under the first one crossed
// =============================================================================

use crate::animation::FrameId;
use crate::geometry::{Facing, Rect};

/// Edge tolerance for the vertical crossing test, in world units.
const EDGE_TOLERANCE: f32 = 1.0;

/// A static piece of level geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    pub rect: Rect,
    /// Walls only block sideways movement and are skipped for floors/ceilings.
    pub is_wall: bool,
    pub image: FrameId,
}

impl Terrain {
    pub fn new(rect: Rect, is_wall: bool, image: FrameId) -> Self {
        Self { rect, is_wall, image }
    }
}

/// Resolve a horizontal move from `prev_x` to `mover.x`.
///
/// Any terrain the mover now intersects blocks it when the vertical overlap is
/// more than a quarter of the mover's height, or when the terrain is a wall.
/// Returns the side the mover was blocked on, if any.
pub fn resolve_horizontal(mover: &mut Rect, prev_x: f32, terrain: &[Terrain]) -> Option<Facing> {
    let mut blocked = None;
    for t in terrain {
        if !mover.intersects(&t.rect) {
            continue;
        }
        let grazing = mover.overlap_y(&t.rect) <= mover.h / 4.0;
        if grazing && !t.is_wall {
            continue;
        }
        if mover.x < prev_x {
            mover.set_left(t.rect.right());
            blocked = Some(Facing::Left);
        } else if mover.x > prev_x {
            mover.set_right(t.rect.left());
            blocked = Some(Facing::Right);
        }
    }
    blocked
}

/// Outcome of one vertical resolution pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VerticalContact {
    /// Landed on a floor this pass.
    pub grounded: bool,
    /// Bumped into a ceiling this pass.
    pub ceiling: bool,
}

/// Resolve vertical motion from `prev` to `mover` with velocity `vel_y`
/// (positive is downward).
///
/// Walls are ignored. The first non-wall terrain whose top (when falling) or
/// bottom (when rising) was crossed between the two rectangles wins: the mover
/// is snapped to that edge and `vel_y` zeroed.
pub fn resolve_vertical(mover: &mut Rect, prev: &Rect, vel_y: &mut f32, terrain: &[Terrain]) -> VerticalContact {
    let mut contact = VerticalContact::default();
    for t in terrain.iter().filter(|t| !t.is_wall) {
        if !mover.overlaps_x(&t.rect) {
            continue;
        }
        if *vel_y > 0.0 {
            if prev.bottom() <= t.rect.top() + EDGE_TOLERANCE && mover.bottom() >= t.rect.top() {
                mover.set_bottom(t.rect.top());
                *vel_y = 0.0;
                contact.grounded = true;
                break;
            }
        } else if *vel_y < 0.0 && prev.top() >= t.rect.bottom() - EDGE_TOLERANCE && mover.top() <= t.rect.bottom() {
            mover.set_top(t.rect.bottom());
            *vel_y = 0.0;
            contact.ceiling = true;
            break;
        }
    }
    contact
}
