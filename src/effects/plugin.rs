use bevy::prelude::*;

use crate::effects::{
    nav::{ActiveSection, spawn_nav_links, update_active_section, update_nav_links},
    parallax::{spawn_parallax_layers, update_parallax},
    preloader::{spawn_preloader, update_preloader},
    resize::{ResizeDrag, drag_resize, spawn_header, sync_header_layout},
    scroll::{
        PageScrolled, ScrollReturn, handle_scroll_top_click, spawn_scroll_top_button,
        update_page_scrolled, update_scroll_top_button,
    },
    tilt::{spawn_tilt_surfaces, update_tilt},
};

/// Page effects other than the cursor trail
pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScrollReturn>()
            .init_resource::<PageScrolled>()
            .init_resource::<ActiveSection>()
            .init_resource::<ResizeDrag>()
            .add_systems(
                Startup,
                (
                    spawn_parallax_layers,
                    spawn_tilt_surfaces,
                    spawn_header,
                    spawn_nav_links,
                    spawn_scroll_top_button,
                    spawn_preloader,
                ),
            )
            .add_systems(
                Update,
                (
                    // Scroll input first so this frame's offset is used everywhere
                    handle_scroll_top_click,
                    update_parallax,
                    update_scroll_top_button,
                    update_page_scrolled,
                    update_active_section,
                    drag_resize,
                    sync_header_layout,
                    update_nav_links,
                    update_tilt,
                    update_preloader,
                )
                    .chain(),
            );
    }
}
