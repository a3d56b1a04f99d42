use crate::cli::CliArgs;
use crate::drag::RoomBounds;
use anyhow::{ensure, Context};
use bevy::color::{Color, Srgba};
use bevy::math::Vec3;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An sRGB color written as `"#rrggbb"` in config files.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub Srgba);

impl HexColor {
    pub fn rgb(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self(Srgba::rgb_u8(r, g, b))
    }

    pub fn color(&self) -> Color {
        Color::Srgba(self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Srgba::hex(&value)
            .map(HexColor)
            .map_err(|e| format!("invalid color {value:?}: {e}"))
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0.to_hex()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Rotation around the X axis, in radians. Negative values look down.
    pub pitch: f32,
    /// Vertical field of view.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.7, 5.0),
            pitch: -0.1,
            fov_degrees: 30.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: HexColor,
    pub ambient_brightness: f32,
    /// A soft light from straight above, standing in for a sky/ground hemisphere light.
    pub sky_color: HexColor,
    pub sky_illuminance: f32,
    pub sun_color: HexColor,
    pub sun_illuminance: f32,
    pub sun_position: Vec3,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: HexColor::rgb(0x404040),
            ambient_brightness: 400.0,
            sky_color: HexColor::rgb(0xffffff),
            sky_illuminance: 2_000.0,
            sun_color: HexColor::rgb(0xffffff),
            sun_illuminance: 8_000.0,
            sun_position: Vec3::new(5.0, 10.0, 5.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraggableConfig {
    /// Size of the plain box shown when there is no model. It rests on its base, its anchor at
    /// the base center.
    pub size: Vec3,
    pub position: Vec3,
    pub color: HexColor,
    /// glTF/GLB scene shown instead of a plain box.
    pub model: Option<String>,
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for DraggableConfig {
    fn default() -> Self {
        Self {
            size: Vec3::new(0.6, 0.8, 0.4),
            position: Vec3::ZERO,
            color: HexColor::rgb(0x8b5a2b),
            model: None,
            roughness: 0.1,
            metalness: 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentMapConfig {
    pub diffuse: String,
    pub specular: String,
    #[serde(default = "default_environment_intensity")]
    pub intensity: f32,
}

fn default_environment_intensity() -> f32 {
    900.0
}

/// Static description of the room, read once at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct RoomConfig {
    /// Half of the floor side length. The room spans `[-half_size, half_size]` on X and Z.
    pub half_size: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    /// Gap kept between the walls and the dragged object.
    pub wall_margin: f32,
    pub ceiling: bool,
    pub background_color: HexColor,
    pub floor_color: HexColor,
    pub wall_color: HexColor,
    pub ceiling_color: HexColor,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub draggable: DraggableConfig,
    pub environment_map: Option<EnvironmentMapConfig>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            half_size: 2.5,
            wall_height: 2.5,
            wall_thickness: 0.05,
            wall_margin: 0.05,
            ceiling: true,
            background_color: HexColor::rgb(0xbfd1e5),
            floor_color: HexColor::rgb(0xffffff),
            wall_color: HexColor::rgb(0xe0e0e0),
            ceiling_color: HexColor::rgb(0xffffff),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            draggable: DraggableConfig::default(),
            environment_map: None,
        }
    }
}

impl RoomConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("Malformed room config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read room config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("In {}", path.display()))
    }

    /// Builds the config from the CLI: the config file if any, then the flag overrides.
    pub fn from_cli(args: &CliArgs) -> anyhow::Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(margin) = args.wall_margin {
            config.wall_margin = margin;
        }
        if let Some(model) = &args.model {
            config.draggable.model = Some(model.clone());
        }
        if args.no_ceiling {
            config.ceiling = false;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let positive = |value: f32| value.is_finite() && value > 0.0;

        ensure!(positive(self.half_size), "half_size must be positive");
        ensure!(positive(self.wall_height), "wall_height must be positive");
        ensure!(positive(self.wall_thickness), "wall_thickness must be positive");
        ensure!(
            self.wall_margin.is_finite()
                && self.wall_margin >= 0.0
                && self.wall_margin < self.half_size,
            "wall_margin must be in [0, half_size), got {}",
            self.wall_margin
        );
        ensure!(
            self.draggable.size.cmpgt(Vec3::ZERO).all() && self.draggable.size.is_finite(),
            "draggable size must be positive, got {}",
            self.draggable.size
        );
        ensure!(
            positive(self.camera.fov_degrees) && self.camera.fov_degrees < 180.0,
            "camera fov must be in (0, 180) degrees"
        );
        ensure!(
            positive(self.camera.near) && self.camera.far > self.camera.near,
            "camera clip planes must satisfy 0 < near < far"
        );
        Ok(())
    }

    /// Where the dragged object's footprint may go.
    pub fn bounds(&self) -> RoomBounds {
        RoomBounds::symmetric(self.half_size).inset(self.wall_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_match_a_five_meter_room() {
        let bounds = RoomConfig::default().bounds();
        assert!((bounds.min - bevy::math::Vec2::splat(-2.45)).length() < 1.0e-6);
        assert!((bounds.max - bevy::math::Vec2::splat(2.45)).length() < 1.0e-6);
    }

    #[test]
    fn default_is_valid() {
        RoomConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = RoomConfig::from_json(
            r##"{
                "half_size": 4.0,
                "wall_color": "#102030",
                "draggable": { "model": "models/drawer.glb" }
            }"##,
        )
        .unwrap();

        assert_eq!(config.half_size, 4.0);
        assert_eq!(config.wall_color, HexColor::rgb(0x102030));
        assert_eq!(config.draggable.model.as_deref(), Some("models/drawer.glb"));
        assert_eq!(config.draggable.size, DraggableConfig::default().size);
        assert_eq!(config.camera, CameraConfig::default());
        assert!(config.ceiling);
    }

    #[test]
    fn environment_map_intensity_defaults() {
        let config = RoomConfig::from_json(
            r#"{ "environment_map": { "diffuse": "d.ktx2", "specular": "s.ktx2" } }"#,
        )
        .unwrap();
        let env = config.environment_map.unwrap();
        assert_eq!(env.diffuse, "d.ktx2");
        assert_eq!(env.intensity, default_environment_intensity());
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(RoomConfig::from_json(r#"{ "floor_color": "not a color" }"#).is_err());
    }

    #[test]
    fn margin_wider_than_room_is_rejected() {
        let err = RoomConfig::from_json(r#"{ "half_size": 1.0, "wall_margin": 1.5 }"#);
        assert!(err.is_err());
        assert!(RoomConfig::from_json(r#"{ "wall_margin": -0.1 }"#).is_err());
    }

    #[test]
    fn flat_object_is_rejected() {
        assert!(RoomConfig::from_json(r#"{ "draggable": { "size": [1.0, 0.0, 1.0] } }"#).is_err());
    }

    #[test]
    fn cli_flags_override_defaults() {
        let args = CliArgs {
            wall_margin: Some(0.0),
            model: Some("chair.glb".to_string()),
            no_ceiling: true,
            ..CliArgs::default()
        };
        let config = RoomConfig::from_cli(&args).unwrap();
        assert_eq!(config.bounds(), RoomBounds::symmetric(2.5));
        assert_eq!(config.draggable.model.as_deref(), Some("chair.glb"));
        assert!(!config.ceiling);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = CliArgs {
            config: Some("/nonexistent/room.json".into()),
            ..CliArgs::default()
        };
        assert!(RoomConfig::from_cli(&args).is_err());
    }

    #[test]
    fn colors_parse_with_or_without_hash() {
        let with: HexColor = serde_json::from_str("\"#bfd1e5\"").unwrap();
        let without: HexColor = serde_json::from_str("\"bfd1e5\"").unwrap();
        assert_eq!(with, HexColor::rgb(0xbfd1e5));
        assert_eq!(without, with);
    }
}
