use crate::camera::CameraView;
use crate::drag::{DragController, Draggable, Floor, RapierScene};
use crate::pointer::{screen_to_ndc, PointerState};
use crate::MainCamera;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier::plugin::RapierContext;

pub fn handle_drag_buttons(
    mut drag: ResMut<DragController>,
    mut pointer: ResMut<PointerState>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&GlobalTransform, &Projection), With<MainCamera>>,
    context: Res<RapierContext>,
    floor: Query<Entity, With<Floor>>,
    mut draggable: Query<(Entity, &mut Transform), With<Draggable>>,
    children: Query<&Children>,
) {
    if mouse.just_pressed(MouseButton::Left) {
        // Pick with the position of the press itself, not the last move.
        let press = windows.get_single().ok().and_then(|window| {
            let viewport = Vec2::new(window.width(), window.height());
            let cursor = window.cursor_position()?;
            (viewport.x > 0.0 && viewport.y > 0.0).then(|| screen_to_ndc(cursor, viewport))
        });

        if let (Some(ndc), Ok((transform, projection))) = (press, camera.get_single()) {
            *pointer = PointerState::at(ndc);

            let view = CameraView::new(transform, projection);
            let scene = RapierScene::new(
                &context,
                floor.get_single().ok(),
                draggable.get_single_mut().ok(),
                &children,
            );
            drag.press(ndc, &view, &scene);
        }
    }

    // Handled after the press so that a click within a single frame ends up idle.
    if mouse.just_released(MouseButton::Left) {
        drag.release();
    }
}
