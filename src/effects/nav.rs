use bevy::prelude::*;

use crate::{
    camera::ViewportBounds,
    config::{EffectsConfig, NavConfig, SectionConfig, parse_color},
    effects::resize::{Header, ProfileImage},
    input::ScrollState,
};

const LINK_HEIGHT: f32 = 24.0;
const LINK_GAP: f32 = 12.0;
const LINK_INSET: f32 = 20.0;
const NAV_Z: f32 = 22.0;

/// Section whose link is highlighted; keeps its last value while no section
/// crosses the band
#[derive(Resource, Default, Debug, Clone, PartialEq, Eq)]
pub struct ActiveSection {
    pub id: Option<String>,
}

/// A menu entry pointing at one page section
#[derive(Component, Debug, Clone)]
pub struct NavLink {
    pub section: String,
    pub order: usize,
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct NavColors {
    pub link: Color,
    pub active: Color,
}

/// Viewport rows `[top, bottom)` a section must cross to become active.
/// The insets are fractions of the viewport height cut from each edge.
pub fn observer_band(viewport_height: f32, nav: &NavConfig) -> (f32, f32) {
    let top = viewport_height * nav.band_top;
    let bottom = viewport_height * (1.0 - nav.band_bottom);
    (top, bottom.max(top))
}

pub fn section_intersects(section: &SectionConfig, scroll: f32, band: (f32, f32)) -> bool {
    let top = section.top - scroll;
    let bottom = top + section.height;
    top < band.1 && bottom > band.0
}

/// Last section in document order that crosses the band
pub fn active_section(sections: &[SectionConfig], scroll: f32, band: (f32, f32)) -> Option<usize> {
    sections
        .iter()
        .rposition(|section| section_intersects(section, scroll, band))
}

/// System: one link per configured section
pub fn spawn_nav_links(mut commands: Commands, config: Res<EffectsConfig>) {
    let nav = &config.nav;
    let (Ok(link), Ok(active)) = (parse_color(&nav.link_color), parse_color(&nav.active_color))
    else {
        warn!("Nav colours are invalid, menu not shown");
        return;
    };
    commands.insert_resource(NavColors { link, active });

    for (order, section) in nav.sections.iter().enumerate() {
        commands.spawn((
            Name::new(format!("nav-{}", section.id)),
            Sprite::from_color(link, Vec2::new(1.0, LINK_HEIGHT)),
            Transform::from_xyz(0.0, 0.0, NAV_Z),
            NavLink {
                section: section.id.clone(),
                order,
            },
        ));
    }
}

/// System: pick the section crossing the band after a scroll or resize
pub fn update_active_section(
    scroll: Res<ScrollState>,
    bounds: Res<ViewportBounds>,
    config: Res<EffectsConfig>,
    mut active: ResMut<ActiveSection>,
) {
    if !scroll.is_changed() && !bounds.is_changed() {
        return;
    }

    let nav = &config.nav;
    let band = observer_band(bounds.height, nav);
    let Some(index) = active_section(&nav.sections, scroll.offset, band) else {
        return;
    };

    let id = &nav.sections[index].id;
    if active.id.as_ref() != Some(id) {
        debug!("Active section: {}", id);
        active.id = Some(id.clone());
    }
}

/// System: stack the links under the profile image and colour the active one
pub fn update_nav_links(
    active: Res<ActiveSection>,
    colors: Option<Res<NavColors>>,
    bounds: Res<ViewportBounds>,
    headers: Query<Ref<Header>>,
    profiles: Query<Ref<ProfileImage>>,
    mut links: Query<(&NavLink, &mut Sprite, &mut Transform)>,
) {
    let Some(colors) = colors else {
        return;
    };
    let Ok(header) = headers.single() else {
        return;
    };
    let profile = profiles.single().ok();

    let layout_changed = header.is_changed()
        || bounds.is_changed()
        || profile.as_ref().is_some_and(|p| p.is_changed());
    if !layout_changed && !active.is_changed() {
        return;
    }

    let first_row = profile
        .map(|p| p.top_left().y + p.size.y)
        .unwrap_or(0.0)
        + LINK_INSET;
    let width = (header.width - LINK_INSET * 2.0).max(1.0);

    for (link, mut sprite, mut transform) in &mut links {
        let row = first_row + link.order as f32 * (LINK_HEIGHT + LINK_GAP);
        let center = Vec2::new(header.width * 0.5, row + LINK_HEIGHT * 0.5);
        let world = bounds.viewport_to_world(center);

        sprite.custom_size = Some(Vec2::new(width, LINK_HEIGHT));
        sprite.color = if active.id.as_deref() == Some(link.section.as_str()) {
            colors.active
        } else {
            colors.link
        };
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}
