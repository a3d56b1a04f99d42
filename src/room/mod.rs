use crate::drag::{Draggable, Floor, RESTING_HEIGHT};
use crate::loading::PendingAssets;
use bevy::gltf::GltfAssetLabel;
use bevy::hierarchy::HierarchyQueryExt;
use bevy::prelude::*;
use bevy_rapier::geometry::{AsyncSceneCollider, Collider, ComputedColliderShape};
use std::f32::consts::FRAC_PI_2;

pub use self::config::{HexColor, RoomConfig};

mod config;

pub struct RoomPlugin;

impl Plugin for RoomPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_room, setup_draggable))
            .add_systems(Update, finish_draggable_materials);
    }
}

/// Placement of the back, left and right walls. The front side stays open for the camera.
pub fn wall_layout(config: &RoomConfig) -> [Transform; 3] {
    let h = config.half_size;
    let y = config.wall_height / 2.0;
    [
        Transform::from_xyz(0.0, y, -h),
        Transform::from_xyz(-h, y, 0.0).with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
        Transform::from_xyz(h, y, 0.0).with_rotation(Quat::from_rotation_y(-FRAC_PI_2)),
    ]
}

/// Collider of the plain box object. The anchor is the center of its base.
pub fn draggable_collider(size: Vec3) -> Collider {
    let half = size / 2.0;
    Collider::compound(vec![(
        Vec3::Y * half.y,
        Quat::IDENTITY,
        Collider::cuboid(half.x, half.y, half.z),
    )])
}

fn matte(color: &HexColor) -> StandardMaterial {
    StandardMaterial {
        base_color: color.color(),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    }
}

fn setup_room(
    mut commands: Commands,
    config: Res<RoomConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let side = config.half_size * 2.0;
    let thickness = config.wall_thickness;

    // Floor, slightly wider so that it tucks under the side walls. Its top face is at y = 0.
    let floor_size = Vec3::new(side + thickness, thickness, side);
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Cuboid::from_size(floor_size)),
            material: materials.add(matte(&config.floor_color)),
            transform: Transform::from_xyz(0.0, -thickness / 2.0, 0.0),
            ..default()
        },
        Collider::cuboid(floor_size.x / 2.0, floor_size.y / 2.0, floor_size.z / 2.0),
        Floor,
        Name::new("Floor"),
    ));

    if config.ceiling {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Cuboid::from_size(floor_size)),
                material: materials.add(matte(&config.ceiling_color)),
                transform: Transform::from_xyz(0.0, config.wall_height + thickness / 2.0, 0.0),
                ..default()
            },
            Name::new("Ceiling"),
        ));
    }

    // Walls are only drawn, the drag bounds come from the config.
    let wall_mesh = meshes.add(Cuboid::new(side, config.wall_height, thickness));
    let wall_material = materials.add(matte(&config.wall_color));
    for (i, transform) in wall_layout(&config).into_iter().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: wall_mesh.clone(),
                material: wall_material.clone(),
                transform,
                ..default()
            },
            Name::new(format!("Wall {i}")),
        ));
    }
}

fn setup_draggable(
    mut commands: Commands,
    config: Res<RoomConfig>,
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let draggable = &config.draggable;
    let half = draggable.size / 2.0;
    let anchor = Vec3::new(draggable.position.x, RESTING_HEIGHT, draggable.position.z);

    let mut entity = commands.spawn((
        SpatialBundle::from_transform(Transform::from_translation(anchor)),
        Draggable,
        Name::new("Draggable"),
    ));

    match &draggable.model {
        Some(path) => {
            let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()));
            pending.watch(path.clone(), scene.clone().untyped());
            // Each mesh of the model gets its own collider once the scene is spawned.
            entity.with_children(|parent| {
                parent.spawn((
                    SceneBundle { scene, ..default() },
                    AsyncSceneCollider {
                        shape: Some(ComputedColliderShape::TriMesh),
                        named_shapes: default(),
                    },
                ));
            });
        }
        None => {
            let material = StandardMaterial {
                base_color: draggable.color.color(),
                perceptual_roughness: draggable.roughness,
                metallic: draggable.metalness,
                ..default()
            };
            entity.insert(draggable_collider(draggable.size));
            entity.with_children(|parent| {
                parent.spawn(PbrBundle {
                    mesh: meshes.add(Cuboid::from_size(draggable.size)),
                    material: materials.add(material),
                    transform: Transform::from_xyz(0.0, half.y, 0.0),
                    ..default()
                });
            });
        }
    }
}

/// Gives the materials of the loaded model a glossy finish.
fn finish_draggable_materials(
    config: Res<RoomConfig>,
    added: Query<(Entity, &Handle<StandardMaterial>), Added<Handle<StandardMaterial>>>,
    parents: Query<&Parent>,
    draggables: Query<(), With<Draggable>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, handle) in added.iter() {
        if !parents
            .iter_ancestors(entity)
            .any(|ancestor| draggables.contains(ancestor))
        {
            continue;
        }

        if let Some(material) = materials.get_mut(handle) {
            material.perceptual_roughness = config.draggable.roughness;
            material.metallic = config.draggable.metalness;
        }
    }
}
