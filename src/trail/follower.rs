// trail/follower.rs

use bevy::math::Vec2;
use thiserror::Error;

/// Fraction of the remaining distance a marker covers each frame
pub const EASING_FACTOR: f32 = 0.3;

/// Rendered edge length of a marker in viewport pixels
pub const DEFAULT_MARKER_SIZE: f32 = 24.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrailError {
    #[error("trail needs at least one marker")]
    NoMarkers,
    #[error("trail palette is empty")]
    EmptyPalette,
    #[error("easing factor must be in (0, 1], got {0}")]
    InvalidEasing(f32),
}

/// One element of the trailing chain
#[derive(Debug, Clone, PartialEq)]
pub struct Marker<C> {
    /// Last-known position in viewport pixels (top-left origin)
    pub position: Vec2,
    pub color: C,
}

/// Where a marker should be drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPlacement {
    /// Top-left corner in viewport pixels
    pub top_left: Vec2,
    /// Edge length before scaling
    pub size: f32,
    pub scale: f32,
}

impl MarkerPlacement {
    /// Center of the marker in viewport pixels
    pub fn center(&self) -> Vec2 {
        self.top_left + Vec2::splat(self.size * 0.5)
    }
}

/// Receives marker placements; the return value is never consulted
pub trait MarkerSink {
    fn place(&mut self, index: usize, placement: MarkerPlacement);
}

impl MarkerSink for Vec<MarkerPlacement> {
    fn place(&mut self, index: usize, placement: MarkerPlacement) {
        if index >= self.len() {
            self.resize(
                index + 1,
                MarkerPlacement {
                    top_left: Vec2::ZERO,
                    size: 0.0,
                    scale: 0.0,
                },
            );
        }
        self[index] = placement;
    }
}

/// Chain of markers easing after the pointer ("comet tail")
///
/// Marker 0 sits on the raw pointer sample; every other marker is seeded from
/// the one ahead of it, pulled toward its own previous-frame position. The
/// last marker's follow target wraps to marker 0.
#[derive(Debug, Clone)]
pub struct TrailFollower<C> {
    pointer: Vec2,
    markers: Vec<Marker<C>>,
    easing: f32,
    marker_size: f32,
}

impl<C: Clone> TrailFollower<C> {
    /// Build `marker_count` markers at the origin, coloured cyclically from `palette`
    pub fn initialize(marker_count: usize, palette: &[C]) -> Result<Self, TrailError> {
        if marker_count == 0 {
            return Err(TrailError::NoMarkers);
        }
        if palette.is_empty() {
            return Err(TrailError::EmptyPalette);
        }

        let markers = (0..marker_count)
            .map(|index| Marker {
                position: Vec2::ZERO,
                color: palette[index % palette.len()].clone(),
            })
            .collect();

        Ok(TrailFollower {
            pointer: Vec2::ZERO,
            markers,
            easing: EASING_FACTOR,
            marker_size: DEFAULT_MARKER_SIZE,
        })
    }
}

impl<C> TrailFollower<C> {
    pub fn with_easing(mut self, easing: f32) -> Result<Self, TrailError> {
        if !(easing > 0.0 && easing <= 1.0) {
            return Err(TrailError::InvalidEasing(easing));
        }
        self.easing = easing;
        Ok(self)
    }

    pub fn with_marker_size(mut self, marker_size: f32) -> Self {
        self.marker_size = marker_size.max(0.0);
        self
    }

    /// Record the latest pointer sample. Off-screen values are accepted as-is.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn markers(&self) -> &[Marker<C>] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn easing(&self) -> f32 {
        self.easing
    }

    pub fn marker_size(&self) -> f32 {
        self.marker_size
    }

    /// Scale for the marker at `index`: (N - i) / N
    pub fn scale_for(&self, index: usize) -> f32 {
        let count = self.markers.len() as f32;
        (count - index as f32) / count
    }

    /// Index whose previous position the marker at `index` eases toward
    pub fn follow_target(&self, index: usize) -> usize {
        if index + 1 < self.markers.len() {
            index + 1
        } else {
            0
        }
    }

    /// Advance every marker by one frame
    pub fn animation_step(&mut self, sink: &mut impl MarkerSink) {
        let offset = self.marker_size * 0.5;
        let mut current = self.pointer;

        for index in 0..self.markers.len() {
            sink.place(
                index,
                MarkerPlacement {
                    top_left: current - Vec2::splat(offset),
                    size: self.marker_size,
                    scale: self.scale_for(index),
                },
            );

            self.markers[index].position = current;

            // Markers ahead of the last one still hold last frame's position here
            let target = self.markers[self.follow_target(index)].position;
            current += (target - current) * self.easing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn rgb() -> TrailFollower<&'static str> {
        TrailFollower::initialize(3, &["red", "green", "blue"]).unwrap()
    }

    fn assert_close(actual: Vec2, expected: Vec2) {
        assert!(
            actual.abs_diff_eq(expected, EPSILON),
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_initialize_creates_markers_at_origin() {
        let trail = rgb();

        assert_eq!(trail.len(), 3);
        for marker in trail.markers() {
            assert_eq!(marker.position, Vec2::ZERO);
        }
        assert_eq!(trail.pointer(), Vec2::ZERO);
    }

    #[test]
    fn test_colors_cycle_through_short_palette() {
        let trail = TrailFollower::initialize(7, &["red", "green", "blue"]).unwrap();
        let colors: Vec<_> = trail.markers().iter().map(|m| m.color).collect();

        assert_eq!(
            colors,
            vec!["red", "green", "blue", "red", "green", "blue", "red"]
        );
    }

    #[test]
    fn test_initialize_rejects_empty_configuration() {
        assert_eq!(
            TrailFollower::initialize(0, &["red"]).unwrap_err(),
            TrailError::NoMarkers
        );
        assert_eq!(
            TrailFollower::<&str>::initialize(4, &[]).unwrap_err(),
            TrailError::EmptyPalette
        );
    }

    #[test]
    fn test_easing_must_be_a_fraction() {
        assert!(rgb().with_easing(0.0).is_err());
        assert!(rgb().with_easing(1.5).is_err());
        assert!(rgb().with_easing(f32::NAN).is_err());
        assert_eq!(rgb().with_easing(1.0).unwrap().easing(), 1.0);
    }

    #[test]
    fn test_scale_decreases_with_index() {
        let trail = TrailFollower::initialize(4, &["red"]).unwrap();

        assert_eq!(trail.scale_for(0), 1.0);
        assert_eq!(trail.scale_for(1), 0.75);
        assert_eq!(trail.scale_for(2), 0.5);
        assert_eq!(trail.scale_for(3), 0.25);
    }

    #[test]
    fn test_scale_is_independent_of_elapsed_frames() {
        let mut trail = TrailFollower::initialize(5, &["red"]).unwrap();
        let mut first = Vec::new();
        trail.animation_step(&mut first);

        trail.on_pointer_move(300.0, -40.0);
        let mut later = Vec::new();
        for _ in 0..10 {
            trail.animation_step(&mut later);
        }

        for index in 0..5 {
            assert_eq!(first[index].scale, later[index].scale);
            assert_eq!(later[index].scale, (5 - index) as f32 / 5.0);
        }
    }

    #[test]
    fn test_last_marker_follows_head() {
        let trail = rgb();

        assert_eq!(trail.follow_target(0), 1);
        assert_eq!(trail.follow_target(1), 2);
        assert_eq!(trail.follow_target(2), 0);

        let single = TrailFollower::initialize(1, &["red"]).unwrap();
        assert_eq!(single.follow_target(0), 0);
    }

    #[test]
    fn test_single_step_from_rest() {
        let mut trail = rgb();
        trail.on_pointer_move(100.0, 100.0);

        let mut placements = Vec::new();
        trail.animation_step(&mut placements);

        // Head sits on the pointer, then each seed eases 30% toward a stale (0, 0)
        assert_close(trail.markers()[0].position, Vec2::new(100.0, 100.0));
        assert_close(trail.markers()[1].position, Vec2::new(70.0, 70.0));
        assert_close(trail.markers()[2].position, Vec2::new(49.0, 49.0));

        assert_eq!(placements.len(), 3);
        assert_close(placements[0].top_left, Vec2::new(88.0, 88.0));
        assert_close(placements[1].top_left, Vec2::new(58.0, 58.0));
        assert_close(placements[2].top_left, Vec2::new(37.0, 37.0));
        assert_close(placements[0].center(), Vec2::new(100.0, 100.0));

        assert!((placements[1].scale - 2.0 / 3.0).abs() < EPSILON);
        assert!((placements[2].scale - 1.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_second_step_uses_previous_frame_positions() {
        let mut trail = rgb();
        trail.on_pointer_move(100.0, 100.0);

        let mut placements = Vec::new();
        trail.animation_step(&mut placements);
        trail.animation_step(&mut placements);

        // 100 + (70 - 100) * 0.3 = 91, then 91 + (49 - 91) * 0.3 = 78.4
        assert_close(trail.markers()[0].position, Vec2::new(100.0, 100.0));
        assert_close(trail.markers()[1].position, Vec2::new(91.0, 91.0));
        assert_close(trail.markers()[2].position, Vec2::new(78.4, 78.4));
    }

    #[test]
    fn test_markers_converge_on_stationary_pointer() {
        let mut trail = TrailFollower::initialize(12, &["red", "blue"]).unwrap();
        trail.on_pointer_move(640.0, 360.0);

        let mut placements = Vec::new();
        for _ in 0..200 {
            trail.animation_step(&mut placements);
        }

        for marker in trail.markers() {
            assert_close(marker.position, Vec2::new(640.0, 360.0));
        }
    }

    #[test]
    fn test_pointer_accepts_offscreen_coordinates() {
        let mut trail = rgb();
        trail.on_pointer_move(-5000.0, f32::MAX);

        let mut placements = Vec::new();
        trail.animation_step(&mut placements);

        assert_eq!(trail.markers()[0].position.x, -5000.0);
        assert_eq!(placements.len(), 3);
    }

    #[test]
    fn test_marker_size_sets_offset() {
        let mut trail = rgb().with_marker_size(10.0);
        trail.on_pointer_move(50.0, 20.0);

        let mut placements = Vec::new();
        trail.animation_step(&mut placements);

        assert_close(placements[0].top_left, Vec2::new(45.0, 15.0));
    }
}
