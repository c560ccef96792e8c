use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::{
    camera::ViewportBounds,
    config::{EffectsConfig, PreloaderConfig},
};

const BAR_WIDTH: f32 = 240.0;
const BAR_HEIGHT: f32 = 4.0;
const PRELOADER_Z: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreloaderPhase {
    Loading,
    Fading { elapsed: f32 },
    Gone,
}

/// Progress overlay shown while the page settles
#[derive(Resource, Debug)]
pub struct Preloader {
    progress: f32,
    phase: PreloaderPhase,
    tick: Timer,
    elapsed: f32,
    load_timeout: f32,
    max_increment: f32,
    fade_secs: f32,
}

impl Preloader {
    pub fn from_config(config: &PreloaderConfig) -> Self {
        Self {
            progress: 0.0,
            phase: PreloaderPhase::Loading,
            tick: Timer::from_seconds(config.tick_secs.max(0.001), TimerMode::Repeating),
            elapsed: 0.0,
            load_timeout: config.load_timeout_secs,
            max_increment: config.max_increment,
            fade_secs: config.fade_secs,
        }
    }

    /// Progress in percent, 0..=100
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn phase(&self) -> PreloaderPhase {
        self.phase
    }

    /// Jump to 100%, as when the page finishes loading
    pub fn finish_loading(&mut self) {
        self.progress = 100.0;
    }

    pub fn opacity(&self) -> f32 {
        match self.phase {
            PreloaderPhase::Loading => 1.0,
            PreloaderPhase::Fading { elapsed } if self.fade_secs > 0.0 => {
                (1.0 - elapsed / self.fade_secs).clamp(0.0, 1.0)
            }
            PreloaderPhase::Fading { .. } | PreloaderPhase::Gone => 0.0,
        }
    }

    pub fn update(&mut self, delta: Duration, rng: &mut impl Rng) {
        let dt = delta.as_secs_f32();

        match self.phase {
            PreloaderPhase::Loading => {
                self.elapsed += dt;
                self.tick.tick(delta);

                for _ in 0..self.tick.times_finished_this_tick() {
                    let increment = if self.max_increment > 0.0 {
                        rng.random_range(0.0..self.max_increment)
                    } else {
                        0.0
                    };
                    self.progress = (self.progress + increment).min(100.0);
                }

                if self.elapsed >= self.load_timeout {
                    self.finish_loading();
                }
                if self.progress >= 100.0 {
                    self.phase = PreloaderPhase::Fading { elapsed: 0.0 };
                }
            }
            PreloaderPhase::Fading { elapsed } => {
                let elapsed = elapsed + dt;
                self.phase = if elapsed >= self.fade_secs {
                    PreloaderPhase::Gone
                } else {
                    PreloaderPhase::Fading { elapsed }
                };
            }
            PreloaderPhase::Gone => {}
        }
    }
}

#[derive(Component, Debug)]
pub struct PreloaderOverlay;

#[derive(Component, Debug)]
pub struct PreloaderBar;

/// System: cover the viewport and start the progress bar
pub fn spawn_preloader(
    mut commands: Commands,
    config: Res<EffectsConfig>,
    bounds: Res<ViewportBounds>,
) {
    commands.insert_resource(Preloader::from_config(&config.preloader));

    commands.spawn((
        Name::new("preloader"),
        Sprite::from_color(
            Color::srgb_u8(0x04, 0x0b, 0x14),
            Vec2::new(bounds.width, bounds.height),
        ),
        Transform::from_xyz(0.0, 0.0, PRELOADER_Z),
        PreloaderOverlay,
    ));
    commands.spawn((
        Name::new("preloader-bar"),
        Sprite::from_color(
            Color::srgb_u8(0x87, 0xce, 0xfa),
            Vec2::new(BAR_WIDTH, BAR_HEIGHT),
        ),
        Transform::from_xyz(-BAR_WIDTH * 0.5, 0.0, PRELOADER_Z + 1.0)
            .with_scale(Vec3::new(0.0, 1.0, 1.0)),
        PreloaderBar,
    ));
}

/// System: advance progress, fade the overlay, then remove it
pub fn update_preloader(
    mut commands: Commands,
    time: Res<Time>,
    bounds: Res<ViewportBounds>,
    preloader: Option<ResMut<Preloader>>,
    mut bars: Query<
        (&mut Transform, &mut Sprite),
        (With<PreloaderBar>, Without<PreloaderOverlay>),
    >,
    mut overlays: Query<&mut Sprite, With<PreloaderOverlay>>,
    parts: Query<Entity, Or<(With<PreloaderBar>, With<PreloaderOverlay>)>>,
) {
    let Some(mut preloader) = preloader else {
        return;
    };

    preloader.update(time.delta(), &mut rand::rng());

    if preloader.phase() == PreloaderPhase::Gone {
        for entity in &parts {
            commands.entity(entity).despawn();
        }
        commands.remove_resource::<Preloader>();
        info!("Preloader removed");
        return;
    }

    let fraction = preloader.progress() / 100.0;
    let opacity = preloader.opacity();

    for (mut transform, mut sprite) in &mut bars {
        // Grow from the left edge
        transform.scale.x = fraction;
        transform.translation.x = -BAR_WIDTH * 0.5 + BAR_WIDTH * fraction * 0.5;
        sprite.color = sprite.color.with_alpha(opacity);
    }
    for mut sprite in &mut overlays {
        sprite.color = sprite.color.with_alpha(opacity);
        sprite.custom_size = Some(Vec2::new(bounds.width, bounds.height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_progress_only_moves_on_ticks() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut preloader = Preloader::from_config(&PreloaderConfig::default());

        preloader.update(millis(50), &mut rng);
        assert_eq!(preloader.progress(), 0.0);

        preloader.update(millis(50), &mut rng);
        assert!(preloader.progress() < 30.0);
    }

    #[test]
    fn test_progress_clamps_at_hundred() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut preloader = Preloader::from_config(&PreloaderConfig {
            load_timeout_secs: 1000.0,
            ..default()
        });

        let mut frames = 0;
        while preloader.phase() == PreloaderPhase::Loading {
            preloader.update(millis(100), &mut rng);
            assert!(preloader.progress() <= 100.0);
            frames += 1;
            assert!(frames < 10_000, "random progress should eventually complete");
        }
        assert_eq!(preloader.progress(), 100.0);
    }

    #[test]
    fn test_load_timeout_forces_completion() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut preloader = Preloader::from_config(&PreloaderConfig {
            max_increment: 0.0,
            ..default()
        });

        preloader.update(millis(1000), &mut rng);
        assert_eq!(preloader.phase(), PreloaderPhase::Loading);

        preloader.update(millis(600), &mut rng);
        assert_eq!(preloader.progress(), 100.0);
        assert_eq!(preloader.phase(), PreloaderPhase::Fading { elapsed: 0.0 });
    }

    #[test]
    fn test_fade_then_gone() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut preloader = Preloader::from_config(&PreloaderConfig::default());
        preloader.finish_loading();

        preloader.update(millis(16), &mut rng);
        assert_eq!(preloader.opacity(), 1.0);

        preloader.update(millis(100), &mut rng);
        assert!((preloader.opacity() - 0.5).abs() < 1e-4);

        preloader.update(millis(150), &mut rng);
        assert_eq!(preloader.phase(), PreloaderPhase::Gone);
        assert_eq!(preloader.opacity(), 0.0);
    }
}
