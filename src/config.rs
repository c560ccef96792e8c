// config.rs

use bevy::color::HexColorError;
use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

const EFFECTS_JSON: &str = include_str!("../assets/effects.json");

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        match EffectsConfig::load() {
            Ok(config) => {
                app.insert_resource(config);
            }
            Err(err) => {
                app.insert_resource(EffectsConfig::default())
                    .insert_resource(ConfigFallback(err.to_string()));
            }
        }
        app.add_systems(Startup, report_config_fallback);
    }
}

/// Present when the embedded config failed to parse and defaults are in use
#[derive(Resource, Debug)]
pub struct ConfigFallback(pub String);

fn report_config_fallback(fallback: Option<Res<ConfigFallback>>) {
    if let Some(fallback) = fallback {
        warn!("Effects config rejected, using defaults: {}", fallback.0);
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed effects config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid color {value:?}: {source}")]
    InvalidColor {
        value: String,
        #[source]
        source: HexColorError,
    },
}

/// Parse a CSS-style hex color ("#add8e6", "add8e6", "#fff")
pub fn parse_color(value: &str) -> Result<Color, ConfigError> {
    Srgba::hex(value)
        .map(Color::from)
        .map_err(|source| ConfigError::InvalidColor {
            value: value.to_string(),
            source,
        })
}

/// Every tunable of the decorative layer
#[derive(Resource, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EffectsConfig {
    pub trail: TrailConfig,
    pub parallax: ParallaxConfig,
    pub tilt: Vec<TiltConfig>,
    pub scroll: ScrollConfig,
    pub header: HeaderConfig,
    pub nav: NavConfig,
    pub preloader: PreloaderConfig,
    pub contact: ContactConfig,
}

impl EffectsConfig {
    /// Load the config embedded at build time
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(EFFECTS_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TrailConfig {
    pub marker_count: usize,
    /// Edge length in viewport pixels
    pub marker_size: f32,
    pub easing: f32,
    pub palette: Vec<String>,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            marker_count: 21,
            marker_size: 24.0,
            easing: 0.3,
            palette: [
                "#add8e6", "#b0e0e6", "#afeeee", "#87ceeb", "#87cefa", "#b0c4de", "#d1e7f0",
                "#e0ffff", "#f0f8ff", "#c6e2ff", "#ccffff", "#99ccff", "#a2cffe", "#addfff",
                "#b7c9e2", "#cae1ff", "#e0ffff", "#afeeee", "#cce7ff", "#d3e9f3", "#cfe2f3",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl TrailConfig {
    pub fn colors(&self) -> Result<Vec<Color>, ConfigError> {
        self.palette.iter().map(|c| parse_color(c)).collect()
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Scroll distance over which the hero section is in view
    pub hero_height: f32,
    pub layers: Vec<LayerConfig>,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        let layer = |name: &str,
                     speed: f32,
                     fade: Option<f32>,
                     anchor: [f32; 2],
                     size: [f32; 2],
                     color: &str| LayerConfig {
            name: name.to_string(),
            speed,
            fade,
            anchor,
            size,
            color: color.to_string(),
        };

        Self {
            hero_height: 800.0,
            layers: vec![
                layer("hero-image", 0.5, None, [0.5, 0.5], [1280.0, 800.0], "#0b1d2a"),
                layer("hero-title", 0.3 * 0.8, Some(0.8), [0.5, 0.38], [520.0, 64.0], "#e0ffff"),
                layer("hero-text", 0.3 * 1.2, Some(1.0), [0.5, 0.48], [420.0, 28.0], "#b0c4de"),
                layer("hero-social", 0.3 * 1.5, Some(1.2), [0.5, 0.57], [220.0, 32.0], "#87cefa"),
                layer("hero-cta", 0.3 * 1.8, Some(1.5), [0.5, 0.66], [180.0, 48.0], "#99ccff"),
            ],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LayerConfig {
    pub name: String,
    /// Pixels of downward travel per pixel scrolled
    pub speed: f32,
    /// Opacity lost per hero-height scrolled; `None` keeps the layer opaque
    #[serde(default)]
    pub fade: Option<f32>,
    /// Center as fractions of the viewport (0 = left/top, 1 = right/bottom)
    pub anchor: [f32; 2],
    pub size: [f32; 2],
    pub color: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TiltConfig {
    pub name: String,
    /// Center as fractions of the viewport
    pub anchor: [f32; 2],
    pub size: [f32; 2],
    pub max_degrees: f32,
    #[serde(default = "unit_scale")]
    pub hover_scale: f32,
    /// Flip the sign of the Y rotation
    #[serde(default)]
    pub mirror_y: bool,
    pub color: String,
}

fn unit_scale() -> f32 {
    1.0
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ScrollConfig {
    pub top_button_threshold: f32,
    /// Offset past which the header switches to its scrolled style
    pub scrolled_threshold: f32,
    /// Full document height; the furthest scroll is this minus the viewport height
    pub page_height: f32,
    /// Pixels per wheel line
    pub line_height: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            top_button_threshold: 100.0,
            scrolled_threshold: 100.0,
            page_height: 4000.0,
            line_height: 40.0,
        }
    }
}

/// Side header holding the profile image and the nav menu
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct HeaderConfig {
    pub width: f32,
    /// Drag-resized widths must lie strictly between these
    pub min_width: f32,
    pub max_width: f32,
    /// Profile image top-left, relative to the header's top-left
    pub profile_offset: [f32; 2],
    pub profile_size: [f32; 2],
    /// Drag-resized profile edges must exceed this
    pub min_profile_edge: f32,
    pub color: String,
    pub scrolled_color: String,
    pub profile_color: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            min_width: 200.0,
            max_width: 500.0,
            profile_offset: [20.0, 20.0],
            profile_size: [120.0, 120.0],
            min_profile_edge: 50.0,
            color: "#0d2233".to_string(),
            scrolled_color: "#07141f".to_string(),
            profile_color: "#87ceeb".to_string(),
        }
    }
}

/// Page sections tracked by the nav menu, in document order
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct NavConfig {
    pub sections: Vec<SectionConfig>,
    /// Observer band insets as fractions of the viewport height
    pub band_top: f32,
    pub band_bottom: f32,
    pub link_color: String,
    pub active_color: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        let section = |id: &str, top: f32, height: f32| SectionConfig {
            id: id.to_string(),
            top,
            height,
        };

        Self {
            sections: vec![
                section("hero", 0.0, 800.0),
                section("about", 800.0, 700.0),
                section("resume", 1500.0, 900.0),
                section("portfolio", 2400.0, 900.0),
                section("contact", 3300.0, 700.0),
            ],
            band_top: 0.2,
            band_bottom: 0.7,
            link_color: "#b0c4de".to_string(),
            active_color: "#87cefa".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct SectionConfig {
    pub id: String,
    /// Document offset of the section's top edge
    pub top: f32,
    pub height: f32,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PreloaderConfig {
    pub tick_secs: f32,
    pub max_increment: f32,
    /// Forces completion, standing in for the page load signal
    pub load_timeout_secs: f32,
    pub fade_secs: f32,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            tick_secs: 0.1,
            max_increment: 30.0,
            load_timeout_secs: 1.5,
            fade_secs: 0.2,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ContactConfig {
    pub endpoint: String,
    pub recipient: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://formspree.io/f/your-form-id".to_string(),
            recipient: "hello@example.com".to_string(),
        }
    }
}
