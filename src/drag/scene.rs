use crate::camera::PickRay;
use crate::parry::bounding_volume::{Aabb, BoundingVolume};
use bevy::hierarchy::HierarchyQueryExt;
use bevy::prelude::*;
use bevy_rapier::math::Vect;
use bevy_rapier::pipeline::QueryFilter;
use bevy_rapier::plugin::RapierContext;

/// Which part of the scene a ray query is allowed to hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueryTarget {
    /// Any part of the draggable object.
    Draggable,
    /// The floor surface. Walls and the draggable object are never reported.
    Floor,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// Distance along the (unit) ray direction.
    pub toi: f32,
    pub point: Vect,
}

/// Everything the drag logic needs from the scene.
pub trait SceneQuery {
    /// The draggable object, if it has been loaded yet.
    fn draggable(&self) -> Option<Entity>;
    /// All the hits of `ray` against `target`, nearest first.
    fn intersections(&self, ray: &PickRay, target: QueryTarget) -> Vec<RayHit>;
    /// World-space bounding box of the draggable object.
    fn draggable_aabb(&self) -> Option<Aabb>;
    fn draggable_position(&self) -> Option<Vect>;
    fn set_draggable_position(&mut self, position: Vect);
}

/// Scene queries answered by the rapier query pipeline.
///
/// The draggable object is its root entity together with all its descendants: a loaded model
/// gets one collider per mesh, attached to the mesh entities of its scene.
pub struct RapierScene<'a> {
    context: &'a RapierContext,
    floor: Option<Entity>,
    draggable: Option<(Entity, Mut<'a, Transform>)>,
    parts: Vec<Entity>,
}

impl<'a> RapierScene<'a> {
    pub fn new(
        context: &'a RapierContext,
        floor: Option<Entity>,
        draggable: Option<(Entity, Mut<'a, Transform>)>,
        children: &Query<&Children>,
    ) -> Self {
        let parts = draggable
            .as_ref()
            .map(|(root, _)| {
                std::iter::once(*root)
                    .chain(children.iter_descendants(*root))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            context,
            floor,
            draggable,
            parts,
        }
    }

    fn is_target(&self, entity: Entity, target: QueryTarget) -> bool {
        match target {
            QueryTarget::Draggable => self.parts.contains(&entity),
            QueryTarget::Floor => self.floor == Some(entity),
        }
    }
}

impl<'a> SceneQuery for RapierScene<'a> {
    fn draggable(&self) -> Option<Entity> {
        self.draggable.as_ref().map(|(entity, _)| *entity)
    }

    fn intersections(&self, ray: &PickRay, target: QueryTarget) -> Vec<RayHit> {
        let mut hits = vec![];
        let predicate = |entity: Entity| self.is_target(entity, target);
        self.context.intersections_with_ray(
            ray.origin,
            ray.dir,
            f32::MAX,
            true,
            QueryFilter::default().predicate(&predicate),
            |_, inter| {
                hits.push(RayHit {
                    toi: (inter.point - ray.origin).dot(ray.dir),
                    point: inter.point,
                });
                true
            },
        );

        hits.sort_by(|a, b| a.toi.total_cmp(&b.toi));
        hits
    }

    /// Merged world-space bounding box of every collider of the draggable object, `None` until
    /// at least one of them exists.
    fn draggable_aabb(&self) -> Option<Aabb> {
        let handles = self.context.entity2collider();
        self.parts
            .iter()
            .filter_map(|entity| handles.get(entity))
            .filter_map(|handle| self.context.colliders.get(*handle))
            .map(|collider| collider.compute_aabb())
            .reduce(|a, b| a.merged(&b))
    }

    fn draggable_position(&self) -> Option<Vect> {
        self.draggable
            .as_ref()
            .map(|(_, transform)| transform.translation)
    }

    fn set_draggable_position(&mut self, position: Vect) {
        if let Some((_, transform)) = &mut self.draggable {
            transform.translation = position;
        }
    }
}
