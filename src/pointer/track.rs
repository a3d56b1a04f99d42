use crate::pointer::{screen_to_ndc, PointerState};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

pub fn track_pointer(
    mut pointer: ResMut<PointerState>,
    mut cursor_moved: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    let viewport = Vec2::new(window.width(), window.height());
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        // Minimized window.
        return;
    }

    // Only the latest move of the frame matters.
    if let Some(moved) = cursor_moved.read().last() {
        pointer.ndc = Some(screen_to_ndc(moved.position, viewport));
    }
}
