use bevy::prelude::*;

use crate::{
    camera::ViewportBounds,
    config::EffectsConfig,
    effects::resize::Header,
    input::{PointerState, ScrollState},
};

const BUTTON_SIZE: f32 = 44.0;
const BUTTON_MARGIN: f32 = 15.0;

/// "Back to top" button, shown once the page is scrolled past the threshold
#[derive(Component, Debug)]
pub struct ScrollTopButton;

/// Smooth return to the top, started by clicking the button
#[derive(Resource, Default, Debug)]
pub struct ScrollReturn {
    pub active: bool,
}

/// Set once the page is scrolled past the header threshold; the header
/// switches to its scrolled colour while it holds
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageScrolled(pub bool);

pub fn past_threshold(offset: f32, threshold: f32) -> bool {
    offset > threshold
}

/// Ease an offset toward zero; snaps once under half a pixel
pub fn ease_toward_top(offset: f32, dt: f32) -> f32 {
    let next = offset * (1.0 - (dt * 10.0).min(1.0));
    if next < 0.5 { 0.0 } else { next }
}

/// Button center in viewport pixels, pinned to the bottom-right corner
fn button_center(bounds: &ViewportBounds) -> Vec2 {
    let inset = BUTTON_MARGIN + BUTTON_SIZE * 0.5;
    Vec2::new(bounds.width - inset, bounds.height - inset)
}

fn button_hit(pointer: Vec2, bounds: &ViewportBounds) -> bool {
    let delta = (pointer - button_center(bounds)).abs();
    delta.x <= BUTTON_SIZE * 0.5 && delta.y <= BUTTON_SIZE * 0.5
}

/// System: spawn the hidden button
pub fn spawn_scroll_top_button(mut commands: Commands) {
    commands.spawn((
        Name::new("scroll-top"),
        Sprite::from_color(Color::srgb_u8(0x87, 0xce, 0xfa), Vec2::splat(BUTTON_SIZE)),
        Transform::from_xyz(0.0, 0.0, 50.0),
        Visibility::Hidden,
        ScrollTopButton,
    ));
}

/// System: show the button past the threshold and keep it pinned
pub fn update_scroll_top_button(
    scroll: Res<ScrollState>,
    bounds: Res<ViewportBounds>,
    config: Res<EffectsConfig>,
    mut buttons: Query<(&mut Visibility, &mut Transform), With<ScrollTopButton>>,
) {
    if !scroll.is_changed() && !bounds.is_changed() {
        return;
    }

    let visible = past_threshold(scroll.offset, config.scroll.top_button_threshold);
    for (mut visibility, mut transform) in &mut buttons {
        *visibility = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };

        let world = bounds.viewport_to_world(button_center(&bounds));
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}

/// System: flip the scrolled flag and restyle the header when it changes
pub fn update_page_scrolled(
    scroll: Res<ScrollState>,
    config: Res<EffectsConfig>,
    mut scrolled: ResMut<PageScrolled>,
    mut headers: Query<(&Header, &mut Sprite)>,
) {
    if !scroll.is_changed() {
        return;
    }

    let now = PageScrolled(past_threshold(scroll.offset, config.scroll.scrolled_threshold));
    if !scrolled.set_if_neq(now) {
        return;
    }

    debug!("Page scrolled: {}", now.0);
    for (header, mut sprite) in &mut headers {
        sprite.color = if now.0 {
            header.scrolled_color
        } else {
            header.color
        };
    }
}

/// System: clicking a visible button scrolls smoothly back to the top
pub fn handle_scroll_top_click(
    time: Res<Time>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerState>,
    bounds: Res<ViewportBounds>,
    config: Res<EffectsConfig>,
    mut scroll: ResMut<ScrollState>,
    mut scroll_return: ResMut<ScrollReturn>,
) {
    let visible = past_threshold(scroll.offset, config.scroll.top_button_threshold);

    if visible && mouse_buttons.just_pressed(MouseButton::Left) {
        if let Some(position) = pointer.position {
            if button_hit(position, &bounds) {
                info!("Scrolling back to top from {:.0}px", scroll.offset);
                scroll_return.active = true;
            }
        }
    }

    if scroll_return.active {
        scroll.offset = ease_toward_top(scroll.offset, time.delta_secs());
        if scroll.offset == 0.0 {
            scroll_return.active = false;
        }
    }
}
