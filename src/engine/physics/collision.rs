// Per-axis collision resolution against static tiles
//
// X is always resolved before Y. Overlapping candidates are applied in
// iteration order; in a well-formed grid only one tile can block a given axis
// in a single step.

use super::body::PhysicsBody;
use crate::engine::tilemap::PlacedTile;

/// Contact produced by a vertical resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalContact {
    /// Landed on top of a tile while falling
    pub grounded: bool,
    /// Hit the underside of a tile while rising
    pub ceiling: bool,
}

/// Push the body out of any tile it entered on the X axis.
///
/// Direction is inferred from `body.prev.x`. Returns true if a side wall was hit.
pub fn resolve_x(
    body: &mut PhysicsBody,
    candidates: &[PlacedTile],
    hits: &mut Vec<PlacedTile>,
) -> bool {
    let mut touching_side_wall = false;

    for tile in candidates {
        if !body.rect.intersects(&tile.rect) {
            continue;
        }
        hits.push(*tile);

        if body.rect.x > body.prev.x {
            body.rect.x = tile.rect.left() - body.rect.width() as f32;
            touching_side_wall = true;
        } else if body.rect.x < body.prev.x {
            body.rect.x = tile.rect.right();
            touching_side_wall = true;
        }
    }

    touching_side_wall
}

/// Push the body out of any tile it entered on the Y axis.
///
/// Direction comes from `velocity_y`, which is zeroed on contact. A body at
/// rest (`velocity_y == 0`) is never corrected.
pub fn resolve_y(
    body: &mut PhysicsBody,
    velocity_y: &mut f32,
    candidates: &[PlacedTile],
    hits: &mut Vec<PlacedTile>,
) -> VerticalContact {
    let mut contact = VerticalContact::default();

    for tile in candidates {
        if !body.rect.intersects(&tile.rect) {
            continue;
        }
        hits.push(*tile);

        if *velocity_y > 0.0 {
            body.rect.y = tile.rect.top() - body.rect.height() as f32;
            *velocity_y = 0.0;
            contact.grounded = true;
        } else if *velocity_y < 0.0 {
            body.rect.y = tile.rect.bottom();
            *velocity_y = 0.0;
            contact.ceiling = true;
        }
    }

    contact
}
