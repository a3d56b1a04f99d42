use crate::camera::CameraView;
use crate::drag::{DragController, DragStatus, Draggable, Floor, RapierScene};
use crate::pointer::PointerState;
use crate::MainCamera;
use bevy::prelude::*;
use bevy_rapier::plugin::RapierContext;

pub fn advance_drag(
    mut drag: ResMut<DragController>,
    pointer: Res<PointerState>,
    camera: Query<(&GlobalTransform, &Projection), With<MainCamera>>,
    context: Res<RapierContext>,
    floor: Query<Entity, With<Floor>>,
    mut draggable: Query<(Entity, &mut Transform), With<Draggable>>,
    children: Query<&Children>,
) {
    if drag.status() == DragStatus::Idle {
        return;
    }

    let Ok((transform, projection)) = camera.get_single() else {
        return;
    };

    let view = CameraView::new(transform, projection);
    let mut scene = RapierScene::new(
        &context,
        floor.get_single().ok(),
        draggable.get_single_mut().ok(),
        &children,
    );
    drag.advance_drag(&pointer, &view, &mut scene);
}
