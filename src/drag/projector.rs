use crate::camera::CameraView;
use crate::drag::scene::{QueryTarget, SceneQuery};
use crate::pointer::PointerState;
use bevy_rapier::math::Vect;

/// Finds the point of the floor under the pointer.
///
/// Returns `None` if there is no pointer sample yet, or if the pointer ray misses the floor
/// (aimed above the horizon, parallel to the floor, or past its edges).
pub fn project_to_floor(
    pointer: &PointerState,
    camera: &CameraView,
    scene: &impl SceneQuery,
) -> Option<Vect> {
    let ray = camera.ray_through(pointer.ndc?)?;
    scene
        .intersections(&ray, QueryTarget::Floor)
        .first()
        .map(|hit| hit.point)
}
