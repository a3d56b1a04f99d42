use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default, Resource)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// JSON file describing the room. Missing fields keep their default value.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Distance kept between the walls and the dragged object's bounding box.
    #[arg(long)]
    pub wall_margin: Option<f32>,
    /// glTF/GLB model displayed for the draggable object.
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long, default_value_t = false)]
    pub no_ceiling: bool,
}
