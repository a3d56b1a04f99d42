//! An analytic stand-in for the rapier-backed scene: a finite floor slab topped at `y = 0` and
//! one box-shaped draggable object resting on it.

use crate::camera::{CameraView, PickRay};
use crate::drag::scene::{QueryTarget, RayHit, SceneQuery};
use crate::parry::bounding_volume::Aabb;
use bevy::prelude::*;
use bevy_rapier::math::Vect;
use nalgebra::point;

#[derive(Copy, Clone, Debug)]
pub struct MockObject {
    pub entity: Entity,
    pub position: Vect,
    pub half_extents: Vec2,
    pub height: f32,
}

impl MockObject {
    pub fn new(position: Vect, half_extents: Vec2, height: f32) -> Self {
        Self {
            entity: Entity::from_raw(7),
            position,
            half_extents,
            height,
        }
    }

    fn bounds(&self) -> (Vect, Vect) {
        let mins = self.position - Vect::new(self.half_extents.x, 0.0, self.half_extents.y);
        let maxs = self.position + Vect::new(self.half_extents.x, self.height, self.half_extents.y);
        (mins, maxs)
    }
}

#[derive(Clone, Debug)]
pub struct MockScene {
    pub floor_half_extents: Vec2,
    pub draggable: Option<MockObject>,
    pub position_writes: usize,
}

impl Default for MockScene {
    fn default() -> Self {
        Self {
            floor_half_extents: Vec2::new(2.525, 2.5),
            draggable: Some(MockObject::new(Vect::ZERO, Vec2::new(0.3, 0.2), 0.8)),
            position_writes: 0,
        }
    }
}

impl MockScene {
    pub fn empty() -> Self {
        Self {
            draggable: None,
            ..Self::default()
        }
    }

    pub fn with_object(object: MockObject) -> Self {
        Self {
            draggable: Some(object),
            ..Self::default()
        }
    }
}

/// Entry and exit parameters of a ray through an axis-aligned box.
fn ray_box(ray: &PickRay, mins: Vect, maxs: Vect) -> Option<(f32, f32)> {
    let mut tmin = 0.0_f32;
    let mut tmax = f32::MAX;

    for i in 0..3 {
        let (origin, dir) = (ray.origin[i], ray.dir[i]);
        if dir == 0.0 {
            if origin < mins[i] || origin > maxs[i] {
                return None;
            }
        } else {
            let mut near = (mins[i] - origin) / dir;
            let mut far = (maxs[i] - origin) / dir;
            if near > far {
                std::mem::swap(&mut near, &mut far);
            }
            tmin = tmin.max(near);
            tmax = tmax.min(far);
            if tmin > tmax {
                return None;
            }
        }
    }

    Some((tmin, tmax))
}

impl SceneQuery for MockScene {
    fn draggable(&self) -> Option<Entity> {
        self.draggable.map(|obj| obj.entity)
    }

    fn intersections(&self, ray: &PickRay, target: QueryTarget) -> Vec<RayHit> {
        let hits = match target {
            QueryTarget::Floor => {
                // Only the top face counts, the floor is seen from above.
                if ray.dir.y >= -1.0e-6 {
                    return vec![];
                }
                let toi = -ray.origin.y / ray.dir.y;
                let point = ray.origin + ray.dir * toi;
                if toi < 0.0
                    || point.x.abs() > self.floor_half_extents.x
                    || point.z.abs() > self.floor_half_extents.y
                {
                    return vec![];
                }
                vec![toi]
            }
            QueryTarget::Draggable => {
                let Some(obj) = self.draggable else {
                    return vec![];
                };
                let (mins, maxs) = obj.bounds();
                match ray_box(ray, mins, maxs) {
                    // Exit first, the query must sort them.
                    Some((entry, exit)) if exit > entry => vec![exit, entry],
                    Some((entry, _)) => vec![entry],
                    None => vec![],
                }
            }
        };

        let mut hits: Vec<_> = hits
            .into_iter()
            .map(|toi| RayHit {
                toi,
                point: ray.origin + ray.dir * toi,
            })
            .collect();
        hits.sort_by(|a, b| a.toi.total_cmp(&b.toi));
        hits
    }

    fn draggable_aabb(&self) -> Option<Aabb> {
        let (mins, maxs) = self.draggable?.bounds();
        Some(Aabb::new(
            point![mins.x, mins.y, mins.z],
            point![maxs.x, maxs.y, maxs.z],
        ))
    }

    fn draggable_position(&self) -> Option<Vect> {
        self.draggable.map(|obj| obj.position)
    }

    fn set_draggable_position(&mut self, position: Vect) {
        if let Some(obj) = &mut self.draggable {
            obj.position = position;
            self.position_writes += 1;
        }
    }
}

pub fn camera_at(transform: Transform) -> CameraView {
    let projection = Projection::Perspective(PerspectiveProjection {
        fov: 30.0_f32.to_radians(),
        aspect_ratio: 16.0 / 9.0,
        near: 0.1,
        far: 1000.0,
    });
    CameraView::new(&GlobalTransform::from(transform), &projection)
}

/// The default viewpoint: standing at the open side of the room, looking slightly down.
pub fn room_camera() -> CameraView {
    camera_at(Transform::from_xyz(0.0, 1.7, 5.0).with_rotation(Quat::from_rotation_x(-0.1)))
}

/// NDC position under which `point` appears for `camera`.
pub fn ndc_of(camera: &CameraView, point: Vect) -> Vec2 {
    let clip_from_world = camera.clip_from_view * camera.world_from_view.inverse();
    clip_from_world.project_point3(point).truncate()
}
