use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportBounds>()
            .insert_resource(ClearColor(Color::NONE))
            .add_systems(Startup, setup_camera)
            .add_systems(PreUpdate, update_viewport_bounds);
    }
}

/// Logical size of the window, used to map page pixels into world space
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportBounds {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl ViewportBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Viewport pixels (top-left origin, y down) to 2D world (center origin, y up)
    pub fn viewport_to_world(&self, viewport: Vec2) -> Vec2 {
        Vec2::new(viewport.x - self.width * 0.5, self.height * 0.5 - viewport.y)
    }

    pub fn world_to_viewport(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.width * 0.5, self.height * 0.5 - world.y)
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Default 2D camera: one world unit per logical pixel, origin at the window center
fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Track window size so viewport coordinates stay aligned after a resize
fn update_viewport_bounds(mut bounds: ResMut<ViewportBounds>, windows: Query<&Window>) {
    if let Ok(window) = windows.single() {
        let size = ViewportBounds::new(window.width(), window.height());

        // Only write on change so downstream change detection stays quiet
        if size != *bounds {
            *bounds = size;
            debug!("Viewport resized: {}x{}", size.width, size.height);
        }
    }
}
