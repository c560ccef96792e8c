pub mod nav;
pub mod parallax;
pub mod plugin;
pub mod preloader;
pub mod resize;
pub mod scroll;
pub mod tilt;

pub use nav::{ActiveSection, NavLink, active_section, observer_band};
pub use parallax::{LayerPose, ParallaxLayer, layer_pose};
pub use plugin::EffectsPlugin;
pub use preloader::{Preloader, PreloaderPhase};
pub use resize::{DragTarget, Header, ProfileImage, ResizeDrag, header_width_for, profile_size_for};
pub use scroll::{PageScrolled, ScrollReturn, ScrollTopButton, past_threshold};
pub use tilt::{TiltPose, TiltSurface};
