use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::{CursorLeft, CursorMoved};

use crate::{camera::ViewportBounds, config::EffectsConfig};

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>()
            .init_resource::<ScrollState>()
            .add_systems(PreUpdate, (track_pointer, track_scroll));
    }
}

/// Latest pointer sample in viewport pixels (top-left origin)
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// `None` until the first move, and again after the pointer leaves the window
    pub position: Option<Vec2>,
}

/// Page scroll offset in pixels, the distance from the top of the page to the
/// top of the viewport
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset: f32,
}

impl ScrollState {
    /// Apply one wheel notch. Wheel "down" (negative y) scrolls the page down.
    /// The offset stops once the page's bottom edge reaches the viewport's.
    pub fn scroll_by(&mut self, delta_px: f32, page_height: f32, viewport_height: f32) {
        self.offset = (self.offset - delta_px).clamp(0.0, max_offset(page_height, viewport_height));
    }
}

/// Furthest the page can scroll; zero when it fits in the viewport
pub fn max_offset(page_height: f32, viewport_height: f32) -> f32 {
    (page_height - viewport_height).max(0.0)
}

fn track_pointer(
    mut ev_cursor: MessageReader<CursorMoved>,
    mut ev_left: MessageReader<CursorLeft>,
    mut touch_events: MessageReader<TouchInput>,
    mut pointer: ResMut<PointerState>,
) {
    let mut latest = None;

    for e in ev_cursor.read() {
        // last event wins
        latest = Some(e.position);
    }
    for ev in touch_events.read() {
        match ev.phase {
            TouchPhase::Started | TouchPhase::Moved => latest = Some(ev.position),
            TouchPhase::Ended | TouchPhase::Canceled => {}
        }
    }
    let left = ev_left.read().count() > 0;

    if let Some(position) = latest {
        pointer.position = Some(position);
    } else if left && pointer.position.is_some() {
        pointer.position = None;
    }
}

fn track_scroll(
    mut ev_wheel: MessageReader<MouseWheel>,
    config: Res<EffectsConfig>,
    bounds: Res<ViewportBounds>,
    mut scroll: ResMut<ScrollState>,
) {
    let settings = &config.scroll;
    let mut delta = 0.0;

    for ev in ev_wheel.read() {
        delta += match ev.unit {
            MouseScrollUnit::Line => ev.y * settings.line_height,
            MouseScrollUnit::Pixel => ev.y,
        };
    }

    if delta != 0.0 {
        scroll.scroll_by(delta, settings.page_height, bounds.height);
    }
}
