use thiserror::Error;
use tracing::{debug, info};

use crate::config::{MovementParams, RenderParams};
use crate::input::{Action, Input, InputSource};
use crate::map::World;
use crate::player::Player;
use crate::raycast::cast_view_ray;
use crate::renderer::ColumnSink;
use crate::shading::shade_column;
use crate::timing::{Clock, FpsCounter};

#[derive(Error, Debug, PartialEq)]
pub enum SimError {
    #[error("player starts inside a wall at ({x}, {y})")]
    StartInsideWall { x: f64, y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Everything that changes from frame to frame.
#[derive(Debug, Clone)]
pub struct GameState {
    pub player: Player,
    pub world: World,
    pub render: RenderParams,
    pub movement: MovementParams,
    pub fps: FpsCounter,
    state: LoopState,
    frames: u64,
}

impl GameState {
    /// Refuses to start with the player inside (or outside) the walls.
    pub fn new(
        world: World,
        player: Player,
        render: RenderParams,
        movement: MovementParams,
    ) -> Result<Self, SimError> {
        if world.is_wall_at(player.x, player.y) {
            return Err(SimError::StartInsideWall {
                x: player.x,
                y: player.y,
            });
        }

        Ok(GameState {
            player,
            world,
            render,
            movement,
            fps: FpsCounter::new(),
            state: LoopState::Running,
            frames: 0,
        })
    }

    /// Starts at the map's spawn point.
    pub fn spawn(world: World, render: RenderParams, movement: MovementParams) -> Result<Self, SimError> {
        let player = Player::from(world.spawn);
        Self::new(world, player, render, movement)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame: timing, quit check, movement, then one draw request
    /// per screen column.
    pub fn tick(
        &mut self,
        clock: &mut impl Clock,
        input: &impl InputSource,
        sink: &mut impl ColumnSink,
    ) -> LoopState {
        if self.state == LoopState::Terminated {
            return self.state;
        }

        let dt = clock.elapsed_secs();

        if input.is_held(Action::Quit) {
            info!(frames = self.frames, "quit requested");
            self.state = LoopState::Terminated;
            return self.state;
        }

        let held = Input::sample(input);
        self.player.take_input(&held, dt, &self.movement, &self.world);

        self.render_columns(sink);

        let previous = self.fps.fps();
        let fps = self.fps.tick(dt);
        if fps != previous {
            debug!(fps, "frame rate sampled");
        }
        self.frames += 1;

        self.state
    }

    /// Casts and shades every column for the current pose.
    pub fn render_columns(&self, sink: &mut impl ColumnSink) {
        let Player { x: px, y: py, angle } = self.player;
        for x in 0..self.render.width {
            let ray_angle = self.render.ray_angle(angle, x);
            let hit = cast_view_ray(&self.world, px, py, angle, ray_angle);
            let boundary = hit.is_boundary && self.render.darken_boundary;
            let column = shade_column(x, hit.distance, boundary, &self.render);
            sink.draw_column(&column);
        }
    }
}
