use bevy::prelude::*;

use crate::{
    camera::ViewportBounds,
    config::{EffectsConfig, TiltConfig, parse_color},
    input::PointerState,
};

/// Rotation and lift applied to a surface under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltPose {
    pub rotate_x_deg: f32,
    pub rotate_y_deg: f32,
    pub scale: f32,
}

impl TiltPose {
    pub const REST: TiltPose = TiltPose {
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
        scale: 1.0,
    };

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotate_x_deg.to_radians(),
            self.rotate_y_deg.to_radians(),
            0.0,
        )
    }
}

/// A card or panel that leans toward the pointer while hovered
#[derive(Component, Debug, Clone)]
pub struct TiltSurface {
    /// Center as fractions of the viewport
    pub anchor: Vec2,
    pub size: Vec2,
    pub max_degrees: f32,
    pub hover_scale: f32,
    pub mirror_y: bool,
}

impl TiltSurface {
    pub fn from_config(config: &TiltConfig) -> Self {
        Self {
            anchor: Vec2::from(config.anchor),
            size: Vec2::from(config.size),
            max_degrees: config.max_degrees,
            hover_scale: config.hover_scale,
            mirror_y: config.mirror_y,
        }
    }

    pub fn viewport_center(&self, bounds: &ViewportBounds) -> Vec2 {
        self.anchor * Vec2::new(bounds.width, bounds.height)
    }

    /// Pointer relative to the surface's top-left corner, if it is over the surface
    pub fn local_pointer(&self, pointer: Vec2, bounds: &ViewportBounds) -> Option<Vec2> {
        let top_left = self.viewport_center(bounds) - self.size * 0.5;
        let local = pointer - top_left;

        let inside = local.x >= 0.0
            && local.y >= 0.0
            && local.x <= self.size.x
            && local.y <= self.size.y;
        inside.then_some(local)
    }

    /// Pose for a pointer at `local` (surface coordinates)
    pub fn pose(&self, local: Vec2) -> TiltPose {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return TiltPose::REST;
        }

        let rotate_x = ((local.y - self.size.y / 2.0) / self.size.y) * self.max_degrees;
        let rotate_y = ((local.x - self.size.x / 2.0) / self.size.x) * self.max_degrees;

        TiltPose {
            rotate_x_deg: rotate_x,
            rotate_y_deg: if self.mirror_y { -rotate_y } else { rotate_y },
            scale: self.hover_scale,
        }
    }

    /// Pose for the current pointer sample; rest when the pointer is elsewhere
    pub fn pose_for(&self, pointer: Option<Vec2>, bounds: &ViewportBounds) -> TiltPose {
        pointer
            .and_then(|p| self.local_pointer(p, bounds))
            .map(|local| self.pose(local))
            .unwrap_or(TiltPose::REST)
    }
}

/// System: spawn the configured tilt surfaces
pub fn spawn_tilt_surfaces(mut commands: Commands, config: Res<EffectsConfig>) {
    for surface in &config.tilt {
        let color = match parse_color(&surface.color) {
            Ok(color) => color,
            Err(err) => {
                warn!("Skipping tilt surface {}: {}", surface.name, err);
                continue;
            }
        };

        commands.spawn((
            Name::new(surface.name.clone()),
            Sprite::from_color(color, Vec2::from(surface.size)),
            Transform::from_xyz(0.0, 0.0, 10.0),
            TiltSurface::from_config(surface),
        ));
    }
}

/// System: lean each surface toward the pointer, or settle it when the pointer leaves
pub fn update_tilt(
    pointer: Res<PointerState>,
    bounds: Res<ViewportBounds>,
    mut surfaces: Query<(&TiltSurface, &mut Transform)>,
) {
    if !pointer.is_changed() && !bounds.is_changed() {
        return;
    }

    for (surface, mut transform) in &mut surfaces {
        let pose = surface.pose_for(pointer.position, &bounds);
        let world = bounds.viewport_to_world(surface.viewport_center(&bounds));

        transform.translation.x = world.x;
        transform.translation.y = world.y;
        transform.rotation = pose.rotation();
        transform.scale = Vec3::splat(pose.scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> TiltSurface {
        TiltSurface {
            anchor: Vec2::new(0.5, 0.5),
            size: Vec2::new(200.0, 100.0),
            max_degrees: 15.0,
            hover_scale: 1.02,
            mirror_y: false,
        }
    }

    #[test]
    fn test_center_is_flat() {
        let pose = card().pose(Vec2::new(100.0, 50.0));

        assert_eq!(pose.rotate_x_deg, 0.0);
        assert_eq!(pose.rotate_y_deg, 0.0);
        assert_eq!(pose.scale, 1.02);
    }

    #[test]
    fn test_corners_reach_half_max_angle() {
        let surface = card();

        let bottom_right = surface.pose(Vec2::new(200.0, 100.0));
        assert_eq!(bottom_right.rotate_x_deg, 7.5);
        assert_eq!(bottom_right.rotate_y_deg, 7.5);

        let top_left = surface.pose(Vec2::ZERO);
        assert_eq!(top_left.rotate_x_deg, -7.5);
        assert_eq!(top_left.rotate_y_deg, -7.5);
    }

    #[test]
    fn test_mirrored_surface_flips_y_rotation() {
        let form = TiltSurface {
            max_degrees: 8.0,
            hover_scale: 1.0,
            mirror_y: true,
            ..card()
        };

        let pose = form.pose(Vec2::new(200.0, 0.0));
        assert_eq!(pose.rotate_x_deg, -4.0);
        assert_eq!(pose.rotate_y_deg, -4.0);
    }

    #[test]
    fn test_local_pointer_inside_and_outside() {
        let bounds = ViewportBounds::new(800.0, 600.0);
        let surface = card();

        // Surface spans x 300..500, y 250..350
        assert_eq!(
            surface.local_pointer(Vec2::new(310.0, 260.0), &bounds),
            Some(Vec2::new(10.0, 10.0))
        );
        assert_eq!(surface.local_pointer(Vec2::new(299.0, 300.0), &bounds), None);
        assert_eq!(surface.local_pointer(Vec2::new(400.0, 351.0), &bounds), None);
    }

    #[test]
    fn test_leaving_surface_resets_pose() {
        let bounds = ViewportBounds::new(800.0, 600.0);
        let surface = card();

        assert_eq!(surface.pose_for(None, &bounds), TiltPose::REST);
        assert_eq!(
            surface.pose_for(Some(Vec2::new(10.0, 10.0)), &bounds),
            TiltPose::REST
        );
        assert_ne!(
            surface.pose_for(Some(Vec2::new(310.0, 260.0)), &bounds),
            TiltPose::REST
        );
    }

    #[test]
    fn test_degenerate_surface_stays_flat() {
        let surface = TiltSurface {
            size: Vec2::ZERO,
            ..card()
        };
        assert_eq!(surface.pose(Vec2::ZERO), TiltPose::REST);
    }

    #[test]
    fn test_rest_rotation_is_identity() {
        assert_eq!(TiltPose::REST.rotation(), Quat::IDENTITY);
    }
}
