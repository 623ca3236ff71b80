pub mod config;
pub mod consts;
pub mod gamestate;
pub mod input;
pub mod map;
pub mod player;
pub mod raycast;
pub mod renderer;
pub mod shading;
pub mod text;
pub mod timing;

pub use config::{Config, ConfigError, MovementParams, RenderParams};
pub use gamestate::{GameState, LoopState, SimError};
pub use input::{Action, Input, InputSource};
pub use map::{MapError, Tile, World};
pub use player::Player;
pub use raycast::{RayHit, Side};
pub use renderer::{ColumnSink, Renderer};
pub use shading::ColumnDraw;
