// Physics: AABB bodies against a static tile grid

pub mod body;
pub mod collision;
pub mod neighbors;
mod rect;

pub use body::PhysicsBody;
pub use collision::{resolve_x, resolve_y, VerticalContact};
pub use neighbors::{NeighborQuery, NEIGHBOR_MARGIN};
pub use rect::Rect;
