pub mod camera;
pub mod config;
pub mod contact;
pub mod effects;
pub mod input;
pub mod trail;

use bevy::prelude::*;

use camera::CameraPlugin;
use config::ConfigPlugin;
use effects::EffectsPlugin;
use input::InputPlugin;
use trail::TrailPlugin;

/// Every decorative effect of the portfolio page
pub struct PortfolioFxPlugin;

impl Plugin for PortfolioFxPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ConfigPlugin)
            .add_plugins(CameraPlugin)
            .add_plugins(InputPlugin)
            .add_plugins(EffectsPlugin)
            .add_plugins(TrailPlugin);
    }
}
