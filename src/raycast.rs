//! Digital differential analysis over the tile grid.
//!
//! The walk steps the ray one grid line at a time, always crossing the
//! nearer of the next vertical or horizontal line, until it enters a wall
//! cell. The grid is enclosed (checked when the [`World`] is built), so the
//! walk always ends.
//!
//! With a unit direction the DDA distance is the length of the ray. Screen
//! columns go through [`cast_view_ray`], which projects that length onto
//! the view direction so flat walls stay flat.

use crate::consts::{MIN_WALL_DISTANCE, UNREACHABLE_STEP};
use crate::map::World;

/// Which family of grid lines the ray crossed last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// A vertical line, reached by stepping along X.
    Vertical,
    /// A horizontal line, reached by stepping along Y.
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance to the wall along the cast direction, or along the view
    /// direction for hits from [`cast_view_ray`].
    pub distance: f64,
    pub side: Side,
    /// Cell that stopped the ray.
    pub cell: (i64, i64),
    /// The hit cell lies on the outer ring of the grid.
    pub is_boundary: bool,
}

/// Casts a ray from `(px, py)` at angle `angle` (radians).
pub fn cast_ray(world: &World, px: f64, py: f64, angle: f64) -> RayHit {
    cast_direction(world, px, py, angle.cos(), angle.sin())
}

/// Casts the ray for one screen column and reports the wall distance
/// measured along `heading` rather than along the ray.
pub fn cast_view_ray(world: &World, px: f64, py: f64, heading: f64, ray_angle: f64) -> RayHit {
    let mut hit = cast_ray(world, px, py, ray_angle);
    hit.distance *= (ray_angle - heading).cos();
    hit
}

/// Casts a ray along the direction `(dir_x, dir_y)`. A zero component is
/// valid: that axis is simply never stepped. The distance is never below
/// [`MIN_WALL_DISTANCE`].
pub fn cast_direction(world: &World, px: f64, py: f64, dir_x: f64, dir_y: f64) -> RayHit {
    let mut map_x = px.floor() as i64;
    let mut map_y = py.floor() as i64;

    let delta_dist_x = if dir_x == 0.0 {
        UNREACHABLE_STEP
    } else {
        (1.0 / dir_x).abs()
    };
    let delta_dist_y = if dir_y == 0.0 {
        UNREACHABLE_STEP
    } else {
        (1.0 / dir_y).abs()
    };

    let (step_x, mut side_dist_x) = if dir_x < 0.0 {
        (-1, (px - map_x as f64) * delta_dist_x)
    } else {
        (1, (map_x as f64 + 1.0 - px) * delta_dist_x)
    };
    let (step_y, mut side_dist_y) = if dir_y < 0.0 {
        (-1, (py - map_y as f64) * delta_dist_y)
    } else {
        (1, (map_y as f64 + 1.0 - py) * delta_dist_y)
    };

    let side = loop {
        let side = if side_dist_x < side_dist_y {
            side_dist_x += delta_dist_x;
            map_x += step_x;
            Side::Vertical
        } else {
            side_dist_y += delta_dist_y;
            map_y += step_y;
            Side::Horizontal
        };

        if world.is_wall(map_x, map_y) {
            break side;
        }
    };

    // Standing on the grid line of the wall gives 0 (or -0.0).
    let distance = match side {
        Side::Vertical => (map_x as f64 - px + (1 - step_x) as f64 / 2.0) / dir_x,
        Side::Horizontal => (map_y as f64 - py + (1 - step_y) as f64 / 2.0) / dir_y,
    }
    .max(MIN_WALL_DISTANCE);

    RayHit {
        distance,
        side,
        cell: (map_x, map_y),
        is_boundary: world.is_border(map_x, map_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn open_room() -> World {
        // 9x9, walls only on the border
        World::from_layout(&[
            "#########",
            "#.......#",
            "#.......#",
            "#.......#",
            "#.......#",
            "#.......#",
            "#.......#",
            "#.......#",
            "#########",
        ])
        .unwrap()
    }

    #[test]
    fn exact_axis_directions_do_not_divide_by_zero() {
        let world = open_room();
        for (dx, dy) in [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)] {
            let hit = cast_direction(&world, 4.5, 4.5, dx, dy);
            assert!(hit.distance.is_finite(), "{dx},{dy}");
            assert!(hit.distance > 0.0, "{dx},{dy}");
            assert!((hit.distance - 3.5).abs() < EPS, "{dx},{dy}: {}", hit.distance);
        }
    }

    #[test]
    fn axis_angles_terminate_with_finite_distance() {
        let world = open_room();
        for k in -8..=8 {
            let angle = k as f64 * FRAC_PI_2;
            let hit = cast_ray(&world, 4.5, 4.5, angle);
            assert!(hit.distance.is_finite() && hit.distance > 0.0, "angle {angle}");
            assert!((hit.distance - 3.5).abs() < 1e-6, "angle {angle}: {}", hit.distance);
        }
    }

    #[test]
    fn distance_subtracts_offset_inside_cell() {
        let world = open_room();
        // wall at x = 8, player 0.25 into cell 4
        let hit = cast_ray(&world, 4.25, 4.5, 0.0);
        assert_eq!(hit.side, Side::Vertical);
        assert_eq!(hit.cell, (8, 4));
        assert!((hit.distance - 3.75).abs() < EPS);

        let hit = cast_ray(&world, 4.25, 4.5, PI);
        assert!((hit.distance - 3.25).abs() < 1e-6);

        let hit = cast_ray(&world, 4.5, 4.75, FRAC_PI_2);
        assert_eq!(hit.side, Side::Horizontal);
        assert!((hit.distance - 3.25).abs() < 1e-6);
    }

    #[test]
    fn perpendicular_distance_removes_fish_eye() {
        let world = open_room();
        // Every column hitting the flat east wall reports the same depth.
        for angle in [-0.3, -0.1, 0.0, 0.1, 0.3] {
            let hit = cast_view_ray(&world, 4.5, 4.5, 0.0, angle);
            assert_eq!(hit.side, Side::Vertical);
            assert!((hit.distance - 3.5).abs() < EPS, "angle {angle}");

            let along_ray = cast_ray(&world, 4.5, 4.5, angle).distance;
            assert!((along_ray - 3.5 / angle.cos()).abs() < EPS, "angle {angle}");
        }
    }

    #[test]
    fn interior_walls_are_not_boundary() {
        let world = World::default();
        // "#...#....###...#": interior wall at x = 4 on row 2
        let hit = cast_ray(&world, 1.5, 2.5, 0.0);
        assert_eq!(hit.cell, (4, 2));
        assert!(!hit.is_boundary);
        assert!((hit.distance - 2.5).abs() < EPS);

        let hit = cast_ray(&world, 1.5, 2.5, PI);
        assert_eq!(hit.cell, (0, 2));
        assert!(hit.is_boundary);
    }

    #[test]
    fn touching_a_wall_stays_positive() {
        let world = World::default();
        // x = 1.0 is the west face of empty cell 1 on row 10
        let hit = cast_ray(&world, 1.0, 10.5, PI);
        assert_eq!(hit.cell, (0, 10));
        assert!(hit.distance > 0.0 && hit.distance.is_sign_positive());
        assert_eq!(hit.distance, MIN_WALL_DISTANCE);

        let hit = cast_direction(&world, 1.0, 10.5, -1.0, 0.0);
        assert_eq!(hit.distance, MIN_WALL_DISTANCE);

        let hit = cast_view_ray(&world, 1.0, 10.5, PI, PI);
        assert!(hit.distance > 0.0);
    }

    #[test]
    fn unbounded_headings_behave_like_wrapped_ones() {
        let world = World::default();
        let wrapped = cast_ray(&world, 8.0, 10.5, 0.4);
        let unwrapped = cast_ray(&world, 8.0, 10.5, 0.4 + 20.0 * PI);
        assert_eq!(wrapped.cell, unwrapped.cell);
        assert!((wrapped.distance - unwrapped.distance).abs() < 1e-6);
    }
}
