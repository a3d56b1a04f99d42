use bevy::prelude::*;

mod track;

/// Latest pointer sample, in normalized device coordinates.
///
/// Written on every cursor move, read once per frame by the drag update.
#[derive(Default, Copy, Clone, Debug, PartialEq, Resource)]
pub struct PointerState {
    pub ndc: Option<Vec2>,
}

impl PointerState {
    pub fn at(ndc: Vec2) -> Self {
        Self { ndc: Some(ndc) }
    }
}

/// Maps a window-space position (origin top-left, y down) to normalized
/// device coordinates (origin at the center, y up, both axes in `[-1, 1]`).
///
/// The viewport dimensions must be positive.
pub fn screen_to_ndc(screen: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        screen.x / viewport.x * 2.0 - 1.0,
        -(screen.y / viewport.y) * 2.0 + 1.0,
    )
}

pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PointerState::default())
            .add_systems(PreUpdate, track::track_pointer);
    }
}
