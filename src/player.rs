use crate::config::MovementParams;
use crate::input::Input;
use crate::map::{Spawn, World};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    /// Radians, never wrapped.
    pub angle: f64,
}

impl From<Spawn> for Player {
    fn from(spawn: Spawn) -> Self {
        Player::new(spawn.x, spawn.y, spawn.angle)
    }
}

impl Player {
    pub fn new(x: f64, y: f64, angle: f64) -> Self {
        Player { x, y, angle }
    }

    /// Moves and turns the player for `dt` seconds of held input.
    ///
    /// Translation uses the heading from before this tick's rotation. A move
    /// whose end point lands in a wall is dropped as a whole, so the player
    /// never slides along walls.
    pub fn take_input(&mut self, input: &Input, dt: f64, params: &MovementParams, world: &World) {
        let (dx, dy) = self.displacement(input, dt, params);
        if dx != 0.0 || dy != 0.0 {
            self.check_collision_and_move(self.x + dx, self.y + dy, world);
        }

        let turn = axis(input.turn_right, input.turn_left);
        self.angle += turn * params.rot_speed * dt;
    }

    /// Offset the held movement keys ask for, before collision.
    pub fn displacement(&self, input: &Input, dt: f64, params: &MovementParams) -> (f64, f64) {
        let forward = axis(input.forth, input.back);
        let strafe = axis(input.right, input.left);
        if forward == 0.0 && strafe == 0.0 {
            return (0.0, 0.0);
        }

        let (sin, cos) = self.angle.sin_cos();
        let dir_x = forward * cos - strafe * sin;
        let dir_y = forward * sin + strafe * cos;

        let mut speed = params.move_speed;
        if input.sprint {
            speed *= params.sprint_multiplier;
        }

        let length = (dir_x * dir_x + dir_y * dir_y).sqrt();
        let scale = speed * dt / length;
        (dir_x * scale, dir_y * scale)
    }

    fn check_collision_and_move(&mut self, new_x: f64, new_y: f64, world: &World) {
        if world.is_wall_at(new_x, new_y) {
            return;
        }
        self.x = new_x;
        self.y = new_y;
    }
}

/// `+1`, `-1` or `0` for a pair of opposing keys.
fn axis(positive: bool, negative: bool) -> f64 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn params() -> MovementParams {
        MovementParams::default()
    }

    fn held(f: impl FnOnce(&mut Input)) -> Input {
        let mut input = Input::default();
        f(&mut input);
        input
    }

    #[test]
    fn forward_follows_heading() {
        let world = World::default();
        let mut player = Player::new(8.0, 10.5, 0.0);
        player.take_input(&held(|i| i.forth = true), 1.0, &params(), &world);
        assert_eq!((player.x, player.y), (9.5, 10.5));

        let mut player = Player::new(8.5, 10.5, FRAC_PI_2);
        player.take_input(&held(|i| i.back = true), 0.5, &params(), &world);
        assert!((player.x - 8.5).abs() < 1e-12);
        assert!((player.y - 9.75).abs() < 1e-12);
    }

    #[test]
    fn strafe_right_is_perpendicular() {
        let player = Player::new(8.0, 10.5, 0.0);
        let (dx, dy) = player.displacement(&held(|i| i.right = true), 1.0, &params());
        // (-sin 0, cos 0) = (0, 1)
        assert!(dx.abs() < 1e-12);
        assert!((dy - 1.5).abs() < 1e-12);
    }

    #[test]
    fn opposing_keys_cancel() {
        let world = World::default();
        let before = Player::new(8.0, 10.5, 0.3);
        let mut player = before;
        let input = held(|i| {
            i.forth = true;
            i.back = true;
            i.left = true;
            i.right = true;
            i.turn_left = true;
            i.turn_right = true;
        });
        player.take_input(&input, 0.25, &params(), &world);
        assert_eq!(player, before);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let player = Player::new(8.0, 10.5, 0.7);
        let dt = 0.1;
        for input in [
            held(|i| {
                i.forth = true;
                i.right = true;
            }),
            held(|i| {
                i.back = true;
                i.left = true;
            }),
        ] {
            let (dx, dy) = player.displacement(&input, dt, &params());
            let length = (dx * dx + dy * dy).sqrt();
            assert!((length - 1.5 * dt).abs() < 1e-12);
        }
    }

    #[test]
    fn sprint_scales_speed() {
        let player = Player::new(8.0, 10.5, 0.0);
        let input = held(|i| {
            i.forth = true;
            i.sprint = true;
        });
        let (dx, _) = player.displacement(&input, 1.0, &params());
        assert!((dx - 1.5 * 1.5).abs() < 1e-12);
    }

    #[test]
    fn move_into_wall_is_rejected_whole() {
        let world = World::default();
        // (14.9, 10.5) is one tenth of a cell west of the east border
        let before = Player::new(14.9, 10.5, 0.0);
        let mut player = before;
        player.take_input(&held(|i| i.forth = true), 0.2, &params(), &world);
        assert_eq!(player.x.to_bits(), before.x.to_bits());
        assert_eq!(player.y.to_bits(), before.y.to_bits());

        // Diagonal into the wall also stays put, even though the Y part is clear.
        let mut player = before;
        let input = held(|i| {
            i.forth = true;
            i.right = true;
        });
        player.take_input(&input, 0.2, &params(), &world);
        assert_eq!(player.x.to_bits(), before.x.to_bits());
        assert_eq!(player.y.to_bits(), before.y.to_bits());
    }

    #[test]
    fn rotation_is_time_scaled_and_unwrapped() {
        let world = World::default();
        let mut player = Player::new(8.0, 10.5, 0.0);
        let input = held(|i| i.turn_right = true);
        for _ in 0..100 {
            player.take_input(&input, 0.5, &params(), &world);
        }
        assert!((player.angle - 100.0 * 0.5 * params().rot_speed).abs() < 1e-9);
        assert_eq!((player.x, player.y), (8.0, 10.5));

        player.take_input(&held(|i| i.turn_left = true), 2.0, &params(), &world);
        assert!((player.angle - 48.0 * params().rot_speed).abs() < 1e-9);
    }
}
