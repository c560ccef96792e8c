use bevy::prelude::*;
use bevy::window::WindowResolution;

use portfolio_fx::PortfolioFxPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Portfolio FX".into(),
            resolution: WindowResolution::new(1280, 800),
            resizable: true,
            transparent: true,
            // Web: stretch the generated canvas over the page
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PortfolioFxPlugin);

    app.run();
}
