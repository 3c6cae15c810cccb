use std::path::Path;

use bitmap_dither::{
    AlphaPolicy, DitherMethod, Ditherer, OutputMode, Rgb, ToneParameters, TwoColorPalette,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rendering::UpscalePolicy;

/// Environment variable naming a default preset file.
pub const CONFIG_ENV_VAR: &str = "DITHERLAB_CONFIG";

/// Parameter preset as written in a YAML file or given on the command line.
///
/// Every key is optional. Presets are layered with [`DitherConfig::merged_with`]
/// and then resolved once into a [`RenderSettings`] snapshot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DitherConfig {
    /// ordered, floyd-steinberg, atkinson, sierra-lite or burkes
    pub method: Option<String>,

    /// mono, gray, palette or rgb
    pub mode: Option<String>,

    /// Working resolution in percent of the source
    pub scale: Option<f32>,

    pub tone: ToneConfig,

    /// Multiplier on carried error (0 = plain threshold)
    pub dither_strength: Option<f32>,

    /// Noise intensity, 0..=100
    pub glitch: Option<f32>,

    pub palette: PaletteConfig,

    /// Keep source alpha in the gray preview
    pub preserve_alpha: Option<bool>,

    /// Seed for reproducible glitch noise
    pub seed: Option<u64>,

    /// source, none or an integer factor
    pub upscale: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToneConfig {
    pub brightness: Option<f32>,
    pub contrast: Option<f32>,
    pub gamma: Option<f32>,
    /// Additive threshold offset
    pub threshold: Option<f32>,
    pub black_point: Option<f32>,
    pub white_point: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    /// Hex color for bit 1
    pub foreground: Option<String>,
    /// Hex color for bit 0
    pub background: Option<String>,
}

impl ToneConfig {
    fn merged_with(self, o: ToneConfig) -> ToneConfig {
        ToneConfig {
            brightness: o.brightness.or(self.brightness),
            contrast: o.contrast.or(self.contrast),
            gamma: o.gamma.or(self.gamma),
            threshold: o.threshold.or(self.threshold),
            black_point: o.black_point.or(self.black_point),
            white_point: o.white_point.or(self.white_point),
        }
    }
}

impl PaletteConfig {
    fn merged_with(self, o: PaletteConfig) -> PaletteConfig {
        PaletteConfig {
            foreground: o.foreground.or(self.foreground),
            background: o.background.or(self.background),
        }
    }
}

impl DitherConfig {
    /// Parse a YAML preset. `origin` is only used for error messages.
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a YAML preset file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content, path)?;
        tracing::info!(path = %path.display(), "Loaded preset");
        Ok(config)
    }

    /// Load the base preset for a run.
    ///
    /// An explicit path must load. Without one, the file named by
    /// [`CONFIG_ENV_VAR`] is tried and a broken file only logs a warning.
    pub fn load_preset(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => match Self::from_file(Path::new(&path)) {
                Ok(config) => Ok(config),
                Err(e) => {
                    tracing::warn!(%e, "Failed to load {CONFIG_ENV_VAR} preset, using defaults");
                    Ok(Self::default())
                }
            },
            None => Ok(Self::default()),
        }
    }

    /// Layer `overrides` on top of `self`; any key set in `overrides` wins.
    pub fn merged_with(self, overrides: DitherConfig) -> DitherConfig {
        DitherConfig {
            method: overrides.method.or(self.method),
            mode: overrides.mode.or(self.mode),
            scale: overrides.scale.or(self.scale),
            tone: self.tone.merged_with(overrides.tone),
            dither_strength: overrides.dither_strength.or(self.dither_strength),
            glitch: overrides.glitch.or(self.glitch),
            palette: self.palette.merged_with(overrides.palette),
            preserve_alpha: overrides.preserve_alpha.or(self.preserve_alpha),
            seed: overrides.seed.or(self.seed),
            upscale: overrides.upscale.or(self.upscale),
        }
    }
}

/// Immutable, fully typed parameter snapshot for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub method: DitherMethod,
    pub mode: OutputMode,
    pub scale_percent: f32,
    pub tone: ToneParameters,
    pub dither_strength: f32,
    pub glitch: f32,
    pub palette: TwoColorPalette,
    pub alpha: AlphaPolicy,
    pub seed: Option<u64>,
    pub upscale: UpscalePolicy,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            method: DitherMethod::default(),
            mode: OutputMode::default(),
            scale_percent: 100.0,
            tone: ToneParameters::default(),
            dither_strength: 1.0,
            glitch: 0.0,
            palette: TwoColorPalette::default(),
            alpha: AlphaPolicy::default(),
            seed: None,
            upscale: UpscalePolicy::default(),
        }
    }
}

fn parse_color(key: &'static str, value: &str) -> Result<Rgb, ConfigError> {
    value.parse().map_err(|e| ConfigError::InvalidValue {
        key,
        message: format!("'{value}': {e}"),
    })
}

impl RenderSettings {
    /// Resolve a layered preset, filling unset keys with defaults.
    ///
    /// Names and colors must parse. Numbers are taken as given; the pipeline
    /// clamps out-of-range values itself.
    pub fn resolve(config: &DitherConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let method = match config.method.as_deref() {
            Some(name) => name.parse::<DitherMethod>().map_err(|e| ConfigError::InvalidValue {
                key: "method",
                message: e.to_string(),
            })?,
            None => defaults.method,
        };
        let mode = match config.mode.as_deref() {
            Some(name) => name.parse::<OutputMode>().map_err(|e| ConfigError::InvalidValue {
                key: "mode",
                message: e.to_string(),
            })?,
            None => defaults.mode,
        };

        let t = &config.tone;
        let tone = ToneParameters::new()
            .brightness(t.brightness.unwrap_or(defaults.tone.brightness))
            .contrast(t.contrast.unwrap_or(defaults.tone.contrast))
            .gamma(t.gamma.unwrap_or(defaults.tone.gamma))
            .threshold_offset(t.threshold.unwrap_or(defaults.tone.threshold_offset))
            .levels(
                t.black_point.unwrap_or(defaults.tone.black_point),
                t.white_point.unwrap_or(defaults.tone.white_point),
            );

        let foreground = match config.palette.foreground.as_deref() {
            Some(hex) => parse_color("palette.foreground", hex)?,
            None => defaults.palette.foreground,
        };
        let background = match config.palette.background.as_deref() {
            Some(hex) => parse_color("palette.background", hex)?,
            None => defaults.palette.background,
        };

        let alpha = if config.preserve_alpha.unwrap_or(false) {
            AlphaPolicy::PreserveSource
        } else {
            AlphaPolicy::Opaque
        };

        let upscale = match config.upscale.as_deref() {
            Some(policy) => policy.parse::<UpscalePolicy>()?,
            None => defaults.upscale,
        };

        Ok(Self {
            method,
            mode,
            scale_percent: config.scale.unwrap_or(defaults.scale_percent),
            tone,
            dither_strength: config.dither_strength.unwrap_or(defaults.dither_strength),
            glitch: config.glitch.unwrap_or(defaults.glitch),
            palette: TwoColorPalette::new(foreground, background),
            alpha,
            seed: config.seed.or(defaults.seed),
            upscale,
        })
    }

    /// Build the pipeline for this snapshot.
    pub fn ditherer(&self) -> Ditherer {
        let ditherer = Ditherer::new()
            .method(self.method)
            .mode(self.mode)
            .scale(self.scale_percent)
            .tone(self.tone)
            .dither_strength(self.dither_strength)
            .glitch(self.glitch)
            .palette(self.palette)
            .alpha(self.alpha);
        match self.seed {
            Some(seed) => ditherer.seed(seed),
            None => ditherer,
        }
    }

    /// Fully populated preset describing this snapshot.
    pub fn to_config(&self) -> DitherConfig {
        DitherConfig {
            method: Some(self.method.to_string()),
            mode: Some(self.mode.to_string()),
            scale: Some(self.scale_percent),
            tone: ToneConfig {
                brightness: Some(self.tone.brightness),
                contrast: Some(self.tone.contrast),
                gamma: Some(self.tone.gamma),
                threshold: Some(self.tone.threshold_offset),
                black_point: Some(self.tone.black_point),
                white_point: Some(self.tone.white_point),
            },
            dither_strength: Some(self.dither_strength),
            glitch: Some(self.glitch),
            palette: PaletteConfig {
                foreground: Some(self.palette.foreground.to_hex()),
                background: Some(self.palette.background.to_hex()),
            },
            preserve_alpha: Some(self.alpha == AlphaPolicy::PreserveSource),
            seed: self.seed,
            upscale: Some(self.upscale.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = RenderSettings::resolve(&DitherConfig::default()).unwrap();
        assert_eq!(settings, RenderSettings::default());
        assert_eq!(settings.method, DitherMethod::FloydSteinberg);
        assert_eq!(settings.mode, OutputMode::Mono);
        assert_eq!(settings.scale_percent, 100.0);
        assert_eq!(settings.upscale, UpscalePolicy::Source);
        assert_eq!(settings.palette, TwoColorPalette::default());
    }

    #[test]
    fn test_deserialize_preset() {
        let yaml = r##"
method: atkinson
mode: palette
scale: 50
tone:
  brightness: 10
  contrast: 1.4
  gamma: 2.2
  threshold: -12
  black_point: 16
  white_point: 240
dither_strength: 0.8
glitch: 5
palette:
  foreground: "#ffcc00"
  background: "#102030"
preserve_alpha: true
seed: 42
upscale: 4x
"##;
        let config = DitherConfig::from_yaml(yaml, Path::new("preset.yaml")).unwrap();
        let settings = RenderSettings::resolve(&config).unwrap();

        assert_eq!(settings.method, DitherMethod::Atkinson);
        assert_eq!(settings.mode, OutputMode::Palette);
        assert_eq!(settings.scale_percent, 50.0);
        assert_eq!(settings.tone.brightness, 10.0);
        assert_eq!(settings.tone.contrast, 1.4);
        assert_eq!(settings.tone.gamma, 2.2);
        assert_eq!(settings.tone.threshold_offset, -12.0);
        assert_eq!(settings.tone.black_point, 16.0);
        assert_eq!(settings.tone.white_point, 240.0);
        assert_eq!(settings.dither_strength, 0.8);
        assert_eq!(settings.glitch, 5.0);
        assert_eq!(settings.palette.foreground, Rgb::new(0xff, 0xcc, 0x00));
        assert_eq!(settings.palette.background, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(settings.alpha, AlphaPolicy::PreserveSource);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.upscale, UpscalePolicy::Factor(4));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = DitherConfig::from_yaml("metod: bayer\n", Path::new("typo.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides_win() {
        let file = DitherConfig {
            method: Some("burkes".to_string()),
            scale: Some(25.0),
            tone: ToneConfig {
                gamma: Some(1.8),
                contrast: Some(2.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = DitherConfig {
            method: Some("ordered".to_string()),
            tone: ToneConfig {
                gamma: Some(0.9),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = file.merged_with(cli);
        assert_eq!(merged.method.as_deref(), Some("ordered"));
        assert_eq!(merged.scale, Some(25.0));
        assert_eq!(merged.tone.gamma, Some(0.9));
        assert_eq!(merged.tone.contrast, Some(2.0));
    }

    #[test]
    fn test_invalid_names_are_reported() {
        let config = DitherConfig {
            method: Some("stucki".to_string()),
            ..Default::default()
        };
        let err = RenderSettings::resolve(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "method", .. }));

        let config = DitherConfig {
            palette: PaletteConfig {
                foreground: Some("#12".to_string()),
                background: None,
            },
            ..Default::default()
        };
        let err = RenderSettings::resolve(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "palette.foreground",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_numbers_pass_through() {
        let config = DitherConfig {
            scale: Some(-5.0),
            tone: ToneConfig {
                gamma: Some(0.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let settings = RenderSettings::resolve(&config).unwrap();
        assert_eq!(settings.scale_percent, -5.0);
        assert_eq!(settings.tone.gamma, 0.0);
    }

    #[test]
    fn test_to_config_resolves_back() {
        let config = DitherConfig {
            method: Some("sierra".to_string()),
            mode: Some("rgb".to_string()),
            seed: Some(7),
            upscale: Some("none".to_string()),
            ..Default::default()
        };
        let settings = RenderSettings::resolve(&config).unwrap();
        let again = RenderSettings::resolve(&settings.to_config()).unwrap();
        assert_eq!(settings, again);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let err = DitherConfig::load_preset(Some(Path::new("/nonexistent/preset.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
