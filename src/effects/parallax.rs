use bevy::prelude::*;

use crate::{
    camera::ViewportBounds,
    config::{EffectsConfig, LayerConfig, parse_color},
    input::ScrollState,
};

/// Per-frame pose of a hero layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerPose {
    /// Downward travel in viewport pixels
    pub translate_y: f32,
    pub opacity: f32,
}

/// Pose for a layer scrolled `scrolled` pixels into a hero of height `hero_height`.
/// `None` once the hero is out of view, in which case the layer keeps its last pose.
pub fn layer_pose(
    scrolled: f32,
    hero_height: f32,
    speed: f32,
    fade: Option<f32>,
) -> Option<LayerPose> {
    if hero_height <= 0.0 || scrolled >= hero_height {
        return None;
    }

    let opacity = match fade {
        Some(fade) => (1.0 - (scrolled / hero_height) * fade).clamp(0.0, 1.0),
        None => 1.0,
    };

    Some(LayerPose {
        translate_y: scrolled * speed,
        opacity,
    })
}

#[derive(Component, Debug, Clone)]
pub struct ParallaxLayer {
    pub speed: f32,
    pub fade: Option<f32>,
    /// Resting center as fractions of the viewport
    pub anchor: Vec2,
    pub translate_y: f32,
}

impl ParallaxLayer {
    pub fn from_config(config: &LayerConfig) -> Self {
        Self {
            speed: config.speed,
            fade: config.fade,
            anchor: Vec2::from(config.anchor),
            translate_y: 0.0,
        }
    }

    /// Current center in viewport pixels
    pub fn viewport_center(&self, bounds: &ViewportBounds) -> Vec2 {
        self.anchor * Vec2::new(bounds.width, bounds.height) + Vec2::new(0.0, self.translate_y)
    }
}

/// System: spawn the hero layers back to front
pub fn spawn_parallax_layers(mut commands: Commands, config: Res<EffectsConfig>) {
    for (depth, layer) in config.parallax.layers.iter().enumerate() {
        let color = match parse_color(&layer.color) {
            Ok(color) => color,
            Err(err) => {
                warn!("Skipping parallax layer {}: {}", layer.name, err);
                continue;
            }
        };

        commands.spawn((
            Name::new(layer.name.clone()),
            Sprite::from_color(color, Vec2::from(layer.size)),
            Transform::from_xyz(0.0, 0.0, depth as f32),
            ParallaxLayer::from_config(layer),
        ));
    }
}

/// System: re-pose layers on frames where the scroll offset or viewport changed
pub fn update_parallax(
    scroll: Res<ScrollState>,
    bounds: Res<ViewportBounds>,
    config: Res<EffectsConfig>,
    mut layers: Query<(&mut ParallaxLayer, &mut Transform, &mut Sprite)>,
) {
    if !scroll.is_changed() && !bounds.is_changed() {
        return;
    }

    for (mut layer, mut transform, mut sprite) in &mut layers {
        if let Some(pose) = layer_pose(
            scroll.offset,
            config.parallax.hero_height,
            layer.speed,
            layer.fade,
        ) {
            layer.translate_y = pose.translate_y;
            sprite.color = sprite.color.with_alpha(pose.opacity);
        }

        let world = bounds.viewport_to_world(layer.viewport_center(&bounds));
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}
