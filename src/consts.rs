use palette::Srgb;

pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;
pub const MAX_SCREEN_DIMENSION: usize = 16384;
pub const FIELD_OF_VIEW: f64 = 0.75;
pub const MAX_DEPTH: f64 = 16.0;
pub const FOG_START: f64 = 8.0;

pub const CONFIG_PATH: &str = "raycaster.toml";
pub const FONT_PATH: &str = "assets/VT323-Regular.ttf";
pub const READOUT_FONT_SIZE: f32 = 24.0;
pub const READOUT_MARGIN: usize = 8;

pub const PLAYER_START_X: f64 = 8.0;
pub const PLAYER_START_Y: f64 = 10.5;
pub const PLAYER_START_ANGLE: f64 = 0.0;
pub const PLAYER_MOVE_SPEED: f64 = 1.5;
pub const PLAYER_ROT_SPEED: f64 = PLAYER_MOVE_SPEED * 0.75;
pub const PLAYER_SPRINT_SPEED_MULTIPLIER: f64 = 1.5;

/// Step length used for a ray component that is exactly zero.
pub const UNREACHABLE_STEP: f64 = 1e30;
/// Smallest wall distance the projection divides by.
pub const MIN_WALL_DISTANCE: f64 = 1e-4;

pub const FPS_SAMPLE_SECS: f64 = 1.0;

pub const BACKGROUND_COLOR: Srgb<u8> = Srgb::new(0, 0, 0);
pub const CEILING_COLOR: Srgb<u8> = Srgb::new(0, 0, 64);
pub const FLOOR_COLOR: Srgb<u8> = Srgb::new(64, 64, 64);
pub const READOUT_COLOR: [u8; 4] = [255, 255, 0, 255];
