extern crate bevy_rapier3d as bevy_rapier;

pub use bevy_rapier::parry;

use crate::cli::CliArgs;
use crate::loading::PendingAssets;
use crate::room::RoomConfig;
use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::pbr::environment_map::EnvironmentMapLight;
use bevy::prelude::*;
use bevy_rapier::prelude::*;
use clap::Parser;
use std::f32::consts::FRAC_PI_2;

mod camera;
mod cli;
mod drag;
mod loading;
mod pointer;
mod room;

#[derive(Component)]
pub struct MainCamera;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = RoomConfig::from_cli(&args)?;
    let bounds = config.bounds();

    let mut app = App::new();
    app.insert_resource(ClearColor(config.background_color.color()))
        .insert_resource(AmbientLight {
            color: config.lighting.ambient_color.color(),
            brightness: config.lighting.ambient_brightness,
        })
        .insert_resource(config)
        .insert_resource(args)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Room drag".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(LogDiagnosticsPlugin::default())
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(loading::LoadingPlugin)
        .add_plugins(pointer::PointerPlugin)
        .add_plugins(room::RoomPlugin)
        .add_plugins(drag::DragPlugin { bounds })
        .add_systems(Startup, setup_graphics);

    if app.run().is_error() {
        anyhow::bail!("the application exited with an error");
    }

    Ok(())
}

fn setup_graphics(
    mut commands: Commands,
    config: Res<RoomConfig>,
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingAssets>,
) {
    let lighting = &config.lighting;

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            color: lighting.sun_color.color(),
            illuminance: lighting.sun_illuminance,
            shadows_enabled: true,
            ..Default::default()
        },
        transform: Transform::from_translation(lighting.sun_position)
            .looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    // Straight down, no shadows.
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            color: lighting.sky_color.color(),
            illuminance: lighting.sky_illuminance,
            shadows_enabled: false,
            ..Default::default()
        },
        transform: Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        ..Default::default()
    });

    let camera = &config.camera;
    let mut entity = commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(camera.position)
                .with_rotation(Quat::from_rotation_x(camera.pitch)),
            projection: Projection::Perspective(PerspectiveProjection {
                fov: camera.fov_degrees.to_radians(),
                near: camera.near,
                far: camera.far,
                ..PerspectiveProjection::default()
            }),
            ..Default::default()
        },
        MainCamera,
    ));

    if let Some(env) = &config.environment_map {
        let diffuse_map = asset_server.load(env.diffuse.clone());
        let specular_map = asset_server.load(env.specular.clone());
        pending.watch(env.diffuse.clone(), diffuse_map.clone().untyped());
        pending.watch(env.specular.clone(), specular_map.clone().untyped());
        entity.insert(EnvironmentMapLight {
            diffuse_map,
            specular_map,
            intensity: env.intensity,
        });
    }
}
