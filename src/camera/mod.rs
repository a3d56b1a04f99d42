use bevy::prelude::*;
use bevy::render::camera::CameraProjection;
use bevy_rapier::math::Vect;

/// A half-line starting at the camera near plane, with a unit direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickRay {
    pub origin: Vect,
    pub dir: Vect,
}

/// The two matrices needed to turn a pointer position into a world-space ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraView {
    pub world_from_view: Mat4,
    pub clip_from_view: Mat4,
}

impl CameraView {
    pub fn new(transform: &GlobalTransform, projection: &Projection) -> Self {
        Self {
            world_from_view: transform.compute_matrix(),
            clip_from_view: projection.get_clip_from_view(),
        }
    }

    /// Casts a ray from the camera through the given normalized device coordinates.
    ///
    /// Bevy projections use a reversed depth range: NDC `z = 1` is the near plane and the far
    /// plane may sit at infinity (`z = 0`), so the second point is unprojected at a finite
    /// intermediate depth.
    pub fn ray_through(&self, ndc: Vec2) -> Option<PickRay> {
        let ndc_to_world = self.world_from_view * self.clip_from_view.inverse();
        let near = ndc_to_world.project_point3(ndc.extend(1.0));
        let mid = ndc_to_world.project_point3(ndc.extend(0.5));

        if !near.is_finite() || !mid.is_finite() {
            return None;
        }

        let dir = (mid - near).try_normalize()?;
        Some(PickRay { origin: near, dir })
    }
}
