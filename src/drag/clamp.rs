use bevy::prelude::*;
use bevy_rapier::math::Vect;

/// Height of the dragged object's anchor. Dragging never moves it vertically.
pub const RESTING_HEIGHT: f32 = 0.0;

/// Horizontal extent of the floor, on the world X (`x`) and Z (`y`) axes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoomBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl RoomBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// A square room centered at the origin, `[-half_size, half_size]` on both axes.
    pub fn symmetric(half_size: f32) -> Self {
        Self::new(Vec2::splat(-half_size), Vec2::splat(half_size))
    }

    /// Shrinks the bounds by `margin` on every side.
    pub fn inset(self, margin: f32) -> Self {
        Self::new(self.min + Vec2::splat(margin), self.max - Vec2::splat(margin))
    }
}

impl Default for RoomBounds {
    fn default() -> Self {
        Self::symmetric(2.45)
    }
}

/// Clamps a value so that an interval of radius `half_extent` around it stays within
/// `[min, max]`. If the interval does not fit at all, the midpoint of `[min, max]` is returned.
fn clamp_axis(value: f32, half_extent: f32, min: f32, max: f32) -> f32 {
    let lo = min + half_extent;
    let hi = max - half_extent;

    if lo > hi {
        (min + max) / 2.0
    } else {
        value.min(hi).max(lo)
    }
}

/// Computes where the dragged object's anchor should go so that its footprint stays inside the
/// room.
///
/// `half_extents` holds the object's half-width along X (`x`) and half-depth along Z (`y`).
/// The vertical components of `target` and `offset` are ignored.
pub fn clamp_to_room(target: Vect, offset: Vect, half_extents: Vec2, bounds: &RoomBounds) -> Vect {
    let unclamped = target + offset;
    Vect::new(
        clamp_axis(unclamped.x, half_extents.x, bounds.min.x, bounds.max.x),
        RESTING_HEIGHT,
        clamp_axis(unclamped.z, half_extents.y, bounds.min.y, bounds.max.y),
    )
}
