use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::consts::{
    BACKGROUND_COLOR, CEILING_COLOR, FIELD_OF_VIEW, FLOOR_COLOR, FOG_START, FONT_PATH, HEIGHT,
    MAX_DEPTH, MAX_SCREEN_DIMENSION, PLAYER_MOVE_SPEED, PLAYER_ROT_SPEED, PLAYER_SPRINT_SPEED_MULTIPLIER, WIDTH,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("screen size must be between 1x1 and {max}x{max}, got {width}x{height}", max = MAX_SCREEN_DIMENSION)]
    ScreenSize { width: usize, height: usize },
    #[error("field of view must lie in (0, pi), got {0}")]
    FieldOfView(f64),
    #[error("need depth > fog start >= 0, got depth {depth} and fog start {fog_start}")]
    FogRange { depth: f64, fog_start: f64 },
    #[error("{name} must be finite and non-negative, got {value}")]
    Speed { name: &'static str, value: f64 },
}

/// Settings as written in `raycaster.toml`. Anything left out falls back to
/// the built-in defaults.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub field_of_view: Option<f64>,
    pub depth: Option<f64>,
    pub fog_start: Option<f64>,
    pub darken_boundary: Option<bool>,
    pub ceiling_color: Option<[u8; 3]>,
    pub floor_color: Option<[u8; 3]>,
    pub background_color: Option<[u8; 3]>,
    pub move_speed: Option<f64>,
    pub rot_speed: Option<f64>,
    pub sprint_multiplier: Option<f64>,
    pub readout: Option<bool>,
    pub font_path: Option<String>,
    pub map: Option<String>,
}

impl Config {
    pub fn parse(contents: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Reads the config file. A missing file is not an error, the defaults
    /// are used instead.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::parse(&contents, &shown)?;
                info!(path = %shown, "loaded config");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %shown, "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io { path: shown, source }),
        }
    }

    pub fn render_params(&self) -> Result<RenderParams, ConfigError> {
        let params = RenderParams {
            width: self.width.unwrap_or(WIDTH),
            height: self.height.unwrap_or(HEIGHT),
            field_of_view: self.field_of_view.unwrap_or(FIELD_OF_VIEW),
            depth: self.depth.unwrap_or(MAX_DEPTH),
            fog_start: self.fog_start.unwrap_or(FOG_START),
            darken_boundary: self.darken_boundary.unwrap_or(false),
            ceiling_color: self.ceiling_color.map(rgb).unwrap_or(CEILING_COLOR),
            floor_color: self.floor_color.map(rgb).unwrap_or(FLOOR_COLOR),
            background_color: self.background_color.map(rgb).unwrap_or(BACKGROUND_COLOR),
        };
        params.validate()?;
        Ok(params)
    }

    pub fn movement_params(&self) -> Result<MovementParams, ConfigError> {
        let params = MovementParams {
            move_speed: self.move_speed.unwrap_or(PLAYER_MOVE_SPEED),
            rot_speed: self.rot_speed.unwrap_or(PLAYER_ROT_SPEED),
            sprint_multiplier: self
                .sprint_multiplier
                .unwrap_or(PLAYER_SPRINT_SPEED_MULTIPLIER),
        };
        params.validate()?;
        Ok(params)
    }

    pub fn font_path(&self) -> &str {
        self.font_path.as_deref().unwrap_or(FONT_PATH)
    }
}

fn rgb([red, green, blue]: [u8; 3]) -> Srgb<u8> {
    Srgb::new(red, green, blue)
}

/// Fixed for the lifetime of the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub width: usize,
    pub height: usize,
    pub field_of_view: f64,
    pub depth: f64,
    pub fog_start: f64,
    pub darken_boundary: bool,
    pub ceiling_color: Srgb<u8>,
    pub floor_color: Srgb<u8>,
    pub background_color: Srgb<u8>,
}

impl Default for RenderParams {
    fn default() -> Self {
        RenderParams {
            width: WIDTH,
            height: HEIGHT,
            field_of_view: FIELD_OF_VIEW,
            depth: MAX_DEPTH,
            fog_start: FOG_START,
            darken_boundary: false,
            ceiling_color: CEILING_COLOR,
            floor_color: FLOOR_COLOR,
            background_color: BACKGROUND_COLOR,
        }
    }
}

impl RenderParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fits = 1..=MAX_SCREEN_DIMENSION;
        if !fits.contains(&self.width) || !fits.contains(&self.height) {
            return Err(ConfigError::ScreenSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.field_of_view > 0.0 && self.field_of_view < PI) {
            return Err(ConfigError::FieldOfView(self.field_of_view));
        }
        if !(self.fog_start >= 0.0 && self.depth > self.fog_start && self.depth.is_finite()) {
            return Err(ConfigError::FogRange {
                depth: self.depth,
                fog_start: self.fog_start,
            });
        }
        Ok(())
    }

    /// Angle of the ray through screen column `x`.
    pub fn ray_angle(&self, heading: f64, x: usize) -> f64 {
        (heading - self.field_of_view / 2.0) + (x as f64 / self.width as f64) * self.field_of_view
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementParams {
    /// Cells per second.
    pub move_speed: f64,
    /// Radians per second.
    pub rot_speed: f64,
    pub sprint_multiplier: f64,
}

impl Default for MovementParams {
    fn default() -> Self {
        MovementParams {
            move_speed: PLAYER_MOVE_SPEED,
            rot_speed: PLAYER_ROT_SPEED,
            sprint_multiplier: PLAYER_SPRINT_SPEED_MULTIPLIER,
        }
    }
}

impl MovementParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("move_speed", self.move_speed),
            ("rot_speed", self.rot_speed),
            ("sprint_multiplier", self.sprint_multiplier),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Speed { name, value });
            }
        }
        Ok(())
    }
}
