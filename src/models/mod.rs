pub mod config;

pub use config::{DitherConfig, PaletteConfig, RenderSettings, ToneConfig, CONFIG_ENV_VAR};
