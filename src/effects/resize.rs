use bevy::prelude::*;

use crate::{
    camera::ViewportBounds,
    config::{EffectsConfig, HeaderConfig, parse_color},
    input::PointerState,
};

const HEADER_Z: f32 = 20.0;
/// The header is pinned to the left edge of the viewport
const HEADER_LEFT: f32 = 0.0;

/// Side header; its width follows drags on the header body
#[derive(Component, Debug, Clone)]
pub struct Header {
    pub width: f32,
    pub color: Color,
    pub scrolled_color: Color,
}

/// Profile image inside the header; its size follows drags that start on it
#[derive(Component, Debug, Clone)]
pub struct ProfileImage {
    /// Top-left relative to the header's top-left
    pub offset: Vec2,
    pub size: Vec2,
}

impl ProfileImage {
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(HEADER_LEFT, 0.0) + self.offset
    }

    pub fn contains(&self, pointer: Vec2) -> bool {
        let local = pointer - self.top_left();
        local.x >= 0.0 && local.y >= 0.0 && local.x <= self.size.x && local.y <= self.size.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Header,
    ProfileImage,
}

/// What the held left button is resizing, if anything
#[derive(Resource, Default, Debug)]
pub struct ResizeDrag {
    pub target: Option<DragTarget>,
}

/// New header width for a pointer at `pointer_x`; only widths strictly
/// between the limits are taken
pub fn header_width_for(pointer_x: f32, header_left: f32, config: &HeaderConfig) -> Option<f32> {
    let width = pointer_x - header_left;
    (width > config.min_width && width < config.max_width).then_some(width)
}

/// New profile image size for a pointer at `pointer`; both edges must exceed
/// the minimum
pub fn profile_size_for(pointer: Vec2, top_left: Vec2, min_edge: f32) -> Option<Vec2> {
    let size = pointer - top_left;
    (size.x > min_edge && size.y > min_edge).then_some(size)
}

/// Innermost element under a press
fn drag_target(
    pointer: Vec2,
    header: &Header,
    profile: Option<&ProfileImage>,
) -> Option<DragTarget> {
    if profile.is_some_and(|p| p.contains(pointer)) {
        Some(DragTarget::ProfileImage)
    } else if pointer.x >= HEADER_LEFT && pointer.x <= HEADER_LEFT + header.width {
        Some(DragTarget::Header)
    } else {
        None
    }
}

/// System: spawn the header and its profile image
pub fn spawn_header(mut commands: Commands, config: Res<EffectsConfig>) {
    let settings = &config.header;
    let colors = (
        parse_color(&settings.color),
        parse_color(&settings.scrolled_color),
        parse_color(&settings.profile_color),
    );
    let (Ok(color), Ok(scrolled_color), Ok(profile_color)) = colors else {
        warn!("Header colours are invalid, header not shown");
        return;
    };

    commands.spawn((
        Name::new("header"),
        Sprite::from_color(color, Vec2::new(settings.width, 1.0)),
        Transform::from_xyz(0.0, 0.0, HEADER_Z),
        Header {
            width: settings.width,
            color,
            scrolled_color,
        },
    ));
    commands.spawn((
        Name::new("profile-img"),
        Sprite::from_color(profile_color, Vec2::from(settings.profile_size)),
        Transform::from_xyz(0.0, 0.0, HEADER_Z + 1.0),
        ProfileImage {
            offset: Vec2::from(settings.profile_offset),
            size: Vec2::from(settings.profile_size),
        },
    ));
}

/// System: press on the header or profile image, drag to resize, release to stop
pub fn drag_resize(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerState>,
    config: Res<EffectsConfig>,
    mut drag: ResMut<ResizeDrag>,
    mut headers: Query<&mut Header>,
    mut profiles: Query<&mut ProfileImage>,
) {
    if !mouse_buttons.pressed(MouseButton::Left) {
        if let Some(target) = drag.target {
            debug!("Finished resizing {:?}", target);
            drag.target = None;
        }
        return;
    }
    let Some(position) = pointer.position else {
        return;
    };
    let Ok(mut header) = headers.single_mut() else {
        return;
    };
    let mut profile = profiles.single_mut().ok();

    if mouse_buttons.just_pressed(MouseButton::Left) {
        drag.target = drag_target(position, &header, profile.as_deref());
        if let Some(target) = drag.target {
            debug!("Resizing {:?}", target);
        }
        // Sizes follow the next pointer move, not the press itself
        return;
    }

    match drag.target {
        Some(DragTarget::Header) => {
            if let Some(width) = header_width_for(position.x, HEADER_LEFT, &config.header) {
                header.width = width;
            }
        }
        Some(DragTarget::ProfileImage) => {
            if let Some(profile) = profile.as_mut() {
                let min_edge = config.header.min_profile_edge;
                if let Some(size) = profile_size_for(position, profile.top_left(), min_edge) {
                    profile.size = size;
                }
            }
        }
        None => {}
    }
}

/// System: keep the header full height and the sprites matching their sizes
pub fn sync_header_layout(
    bounds: Res<ViewportBounds>,
    mut headers: Query<(Ref<Header>, &mut Sprite, &mut Transform), Without<ProfileImage>>,
    mut profiles: Query<(Ref<ProfileImage>, &mut Sprite, &mut Transform), Without<Header>>,
) {
    for (header, mut sprite, mut transform) in &mut headers {
        if !header.is_changed() && !bounds.is_changed() {
            continue;
        }
        let size = Vec2::new(header.width, bounds.height);
        let world = bounds.viewport_to_world(Vec2::new(HEADER_LEFT, 0.0) + size * 0.5);

        sprite.custom_size = Some(size);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }

    for (profile, mut sprite, mut transform) in &mut profiles {
        if !profile.is_changed() && !bounds.is_changed() {
            continue;
        }
        let world = bounds.viewport_to_world(profile.top_left() + profile.size * 0.5);

        sprite.custom_size = Some(profile.size);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: f32) -> Header {
        Header {
            width,
            color: Color::BLACK,
            scrolled_color: Color::WHITE,
        }
    }

    fn profile() -> ProfileImage {
        ProfileImage {
            offset: Vec2::new(20.0, 20.0),
            size: Vec2::new(120.0, 120.0),
        }
    }

    #[test]
    fn test_header_width_limits_are_exclusive() {
        let config = HeaderConfig::default();

        assert_eq!(header_width_for(350.0, 0.0, &config), Some(350.0));
        assert_eq!(header_width_for(200.0, 0.0, &config), None);
        assert_eq!(header_width_for(500.0, 0.0, &config), None);
        assert_eq!(header_width_for(201.0, 0.0, &config), Some(201.0));
        assert_eq!(header_width_for(460.0, 100.0, &config), Some(360.0));
    }

    #[test]
    fn test_profile_needs_both_edges_over_minimum() {
        let top_left = Vec2::new(20.0, 20.0);

        assert_eq!(
            profile_size_for(Vec2::new(100.0, 90.0), top_left, 50.0),
            Some(Vec2::new(80.0, 70.0))
        );
        assert_eq!(profile_size_for(Vec2::new(70.0, 200.0), top_left, 50.0), None);
        assert_eq!(profile_size_for(Vec2::new(200.0, 60.0), top_left, 50.0), None);
    }

    #[test]
    fn test_press_on_profile_takes_precedence() {
        let header = header(300.0);
        let profile = profile();

        assert_eq!(
            drag_target(Vec2::new(50.0, 50.0), &header, Some(&profile)),
            Some(DragTarget::ProfileImage)
        );
        assert_eq!(
            drag_target(Vec2::new(250.0, 500.0), &header, Some(&profile)),
            Some(DragTarget::Header)
        );
        assert_eq!(drag_target(Vec2::new(301.0, 50.0), &header, Some(&profile)), None);
    }

    fn resize_app() -> App {
        let mut app = App::new();
        app.insert_resource(EffectsConfig::default())
            .insert_resource(ViewportBounds::new(1280.0, 800.0))
            .init_resource::<PointerState>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ResizeDrag>()
            .add_systems(Startup, spawn_header)
            .add_systems(Update, (drag_resize, sync_header_layout).chain());
        app.update();
        app
    }

    fn move_pointer(app: &mut App, x: f32, y: f32) {
        app.world_mut().resource_mut::<PointerState>().position = Some(Vec2::new(x, y));
    }

    fn header_width(app: &mut App) -> f32 {
        let world = app.world_mut();
        world.query::<&Header>().single(world).unwrap().width
    }

    #[test]
    fn test_drag_resizes_header() {
        let mut app = resize_app();

        move_pointer(&mut app, 290.0, 400.0);
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        assert_eq!(
            app.world().resource::<ResizeDrag>().target,
            Some(DragTarget::Header)
        );
        assert_eq!(header_width(&mut app), 300.0);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .clear();
        move_pointer(&mut app, 420.0, 400.0);
        app.update();
        assert_eq!(header_width(&mut app), 420.0);

        // Past the maximum the last accepted width stays
        move_pointer(&mut app, 640.0, 400.0);
        app.update();
        assert_eq!(header_width(&mut app), 420.0);

        let world = app.world_mut();
        let sprite = world
            .query_filtered::<&Sprite, With<Header>>()
            .single(world)
            .unwrap();
        assert_eq!(sprite.custom_size, Some(Vec2::new(420.0, 800.0)));

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
        app.update();
        assert_eq!(app.world().resource::<ResizeDrag>().target, None);

        move_pointer(&mut app, 250.0, 400.0);
        app.update();
        assert_eq!(header_width(&mut app), 420.0);
    }

    #[test]
    fn test_drag_resizes_profile_image() {
        let mut app = resize_app();

        move_pointer(&mut app, 100.0, 100.0);
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .clear();

        move_pointer(&mut app, 180.0, 160.0);
        app.update();

        move_pointer(&mut app, 60.0, 300.0);
        app.update();

        let world = app.world_mut();
        let size = world.query::<&ProfileImage>().single(world).unwrap().size;
        assert_eq!(size, Vec2::new(160.0, 140.0));
        assert_eq!(header_width(&mut app), 300.0);
    }
}
