use bevy::asset::{LoadState, UntypedHandle};
use bevy::prelude::*;

/// Assets loaded in the background whose outcome should be reported.
#[derive(Default, Resource)]
pub struct PendingAssets {
    pending: Vec<(String, UntypedHandle)>,
}

impl PendingAssets {
    pub fn watch(&mut self, label: impl Into<String>, handle: UntypedHandle) {
        self.pending.push((label.into(), handle));
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PendingAssets::default())
            .add_systems(Update, track_asset_loads);
    }
}

/// Logs each watched asset once it either loads or fails. The scene keeps running either way.
fn track_asset_loads(mut pending: ResMut<PendingAssets>, asset_server: Res<AssetServer>) {
    if pending.is_empty() {
        return;
    }

    pending
        .pending
        .retain(|(label, handle)| match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => {
                log::info!("{label} loaded!");
                false
            }
            Some(LoadState::Failed(err)) => {
                log::error!("Loading error for {label}: {err}");
                false
            }
            _ => true,
        });
}
