use crate::camera::CameraView;
use crate::pointer::PointerState;
use bevy::prelude::*;
use bevy_rapier::math::Vect;

pub use self::clamp::{clamp_to_room, RoomBounds, RESTING_HEIGHT};
pub use self::projector::project_to_floor;
pub use self::scene::{QueryTarget, RapierScene, SceneQuery};

pub mod clamp;
mod mouse;
pub mod projector;
pub mod scene;
#[cfg(test)]
pub(crate) mod test_scene;

/// Marks the floor entity, the only surface the dragged object slides on.
#[derive(Copy, Clone, Debug, Default, Component)]
pub struct Floor;

/// Marks the one object the user can pick up.
#[derive(Copy, Clone, Debug, Default, Component)]
pub struct Draggable;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragStatus {
    Idle,
    Dragging,
}

/// What is captured when the object is picked.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSession {
    pub object: Entity,
    /// Anchor minus the picked point, with a zero vertical component.
    pub offset: Vect,
    /// Half-width along X and half-depth along Z of the object's bounding box.
    pub half_extents: Vec2,
}

#[derive(Clone, Debug, Default, Resource)]
pub struct DragController {
    session: Option<DragSession>,
    pub bounds: RoomBounds,
}

impl DragController {
    pub fn new(bounds: RoomBounds) -> Self {
        Self {
            session: None,
            bounds,
        }
    }

    pub fn status(&self) -> DragStatus {
        if self.session.is_some() {
            DragStatus::Dragging
        } else {
            DragStatus::Idle
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Tries to pick up the draggable object under `ndc`.
    ///
    /// Only has an effect while idle. Returns `true` if a drag started.
    pub fn press(&mut self, ndc: Vec2, camera: &CameraView, scene: &impl SceneQuery) -> bool {
        if self.session.is_some() {
            return false;
        }

        let Some(object) = scene.draggable() else {
            return false;
        };
        let Some(ray) = camera.ray_through(ndc) else {
            return false;
        };
        let Some(hit) = scene
            .intersections(&ray, QueryTarget::Draggable)
            .first()
            .copied()
        else {
            return false;
        };
        let (Some(aabb), Some(anchor)) = (scene.draggable_aabb(), scene.draggable_position())
        else {
            return false;
        };

        let half: Vect = aabb.half_extents().into();
        let offset = Vect::new(anchor.x - hit.point.x, 0.0, anchor.z - hit.point.z);
        let session = DragSession {
            object,
            offset,
            half_extents: Vec2::new(half.x, half.z),
        };

        log::debug!(
            "Picked {:?} at {}, offset {}, half-extents {}",
            object,
            hit.point,
            offset,
            session.half_extents
        );
        self.session = Some(session);
        true
    }

    /// Drops the object where it currently is. Does nothing while idle.
    pub fn release(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("Released {:?}", session.object);
        }
    }

    /// Moves the dragged object under the pointer, keeping its footprint inside the room.
    ///
    /// Does nothing while idle, or on frames where the pointer is not over the floor.
    pub fn advance_drag(
        &mut self,
        pointer: &PointerState,
        camera: &CameraView,
        scene: &mut impl SceneQuery,
    ) {
        let Some(session) = self.session else {
            return;
        };

        if scene.draggable() != Some(session.object) {
            log::warn!(
                "Dragged object {:?} is gone, ending the drag.",
                session.object
            );
            self.session = None;
            return;
        }

        if let Some(target) = project_to_floor(pointer, camera, &*scene) {
            let position = clamp_to_room(target, session.offset, session.half_extents, &self.bounds);
            scene.set_draggable_position(position);
        }
    }
}

pub struct DragPlugin {
    pub bounds: RoomBounds,
}

impl Plugin for DragPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DragController::new(self.bounds))
            .add_systems(
                Update,
                (mouse::handle_drag_buttons, mouse::advance_drag).chain(),
            );
    }
}
