pub mod follower;
pub mod plugin;

pub use follower::{
    DEFAULT_MARKER_SIZE, EASING_FACTOR, Marker, MarkerPlacement, MarkerSink, TrailError,
    TrailFollower,
};
pub use plugin::{Trail, TrailMarker, TrailPlugin};
