use bevy::prelude::*;

use crate::{
    camera::ViewportBounds,
    config::{ConfigError, EffectsConfig, TrailConfig},
    input::PointerState,
    trail::{MarkerPlacement, TrailError, TrailFollower},
};

/// Markers draw above every other effect, head first
const TRAIL_Z: f32 = 100.0;

pub struct TrailPlugin;

impl Plugin for TrailPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_trail)
            // Pointer sample is refreshed before the step reads it
            .add_systems(Update, (sync_pointer, animate_trail).chain());
    }
}

/// The running follower. Absent when the trail is disabled.
#[derive(Resource, Debug)]
pub struct Trail(pub TrailFollower<Color>);

#[derive(Component, Debug)]
pub struct TrailMarker {
    pub index: usize,
}

#[derive(Debug, thiserror::Error)]
enum TrailSetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Trail(#[from] TrailError),
}

fn build_follower(config: &TrailConfig) -> Result<TrailFollower<Color>, TrailSetupError> {
    let palette = config.colors()?;
    let follower = TrailFollower::initialize(config.marker_count, &palette)?
        .with_easing(config.easing)?
        .with_marker_size(config.marker_size);
    Ok(follower)
}

/// System: spawn one sprite per marker, or disable the trail on bad config
fn setup_trail(mut commands: Commands, config: Res<EffectsConfig>) {
    let follower = match build_follower(&config.trail) {
        Ok(follower) => follower,
        Err(err) => {
            warn!("Cursor trail disabled: {}", err);
            return;
        }
    };

    let size = Vec2::splat(follower.marker_size());
    for (index, marker) in follower.markers().iter().enumerate() {
        commands.spawn((
            Sprite::from_color(marker.color, size),
            // Later markers sit behind earlier ones
            Transform::from_xyz(0.0, 0.0, TRAIL_Z - index as f32 * 0.01),
            TrailMarker { index },
        ));
    }

    info!("Cursor trail ready with {} markers", follower.len());
    commands.insert_resource(Trail(follower));
}

/// System: forward the latest pointer sample to the follower
fn sync_pointer(pointer: Res<PointerState>, trail: Option<ResMut<Trail>>) {
    let Some(mut trail) = trail else {
        return;
    };
    if !pointer.is_changed() {
        return;
    }

    // A pointer that left the window keeps its last sample
    if let Some(position) = pointer.position {
        trail.0.on_pointer_move(position.x, position.y);
    }
}

/// System: one animation step per frame, written into marker transforms
fn animate_trail(
    trail: Option<ResMut<Trail>>,
    bounds: Res<ViewportBounds>,
    mut placements: Local<Vec<MarkerPlacement>>,
    mut markers: Query<(&TrailMarker, &mut Transform)>,
) {
    let Some(mut trail) = trail else {
        return;
    };

    trail.0.animation_step(&mut *placements);

    for (marker, mut transform) in &mut markers {
        let Some(placement) = placements.get(marker.index) else {
            continue;
        };
        let world = bounds.viewport_to_world(placement.center());
        transform.translation.x = world.x;
        transform.translation.y = world.y;
        transform.scale = Vec3::splat(placement.scale);
    }
}
