//! Turns a wall distance into one drawable screen column.

use palette::Srgb;

use crate::config::RenderParams;
use crate::consts::MIN_WALL_DISTANCE;

/// Raw ceiling and floor rows for a wall. Either may fall outside the
/// screen when the wall is close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallSpan {
    pub ceiling: i32,
    pub floor: i32,
}

pub fn project(distance: f64, screen_height: usize) -> WallSpan {
    let distance = distance.max(MIN_WALL_DISTANCE);
    let height = screen_height as f64;
    let ceiling = (height / 2.0 - height / distance) as i32;
    let floor = screen_height as i32 - ceiling;
    WallSpan { ceiling, floor }
}

/// Fog blend factor in `[0, 1]`.
pub fn fog_intensity(distance: f64, params: &RenderParams) -> f64 {
    if distance <= params.fog_start {
        return 0.0;
    }
    ((distance - params.fog_start) / (params.depth - params.fog_start)).clamp(0.0, 1.0)
}

/// Grey level of a wall `distance` away, after fog. Boundary walls are
/// always black.
pub fn wall_brightness(distance: f64, is_boundary: bool, params: &RenderParams) -> u8 {
    let mut shade = (255.0 * (1.0 - distance / params.depth)) as i32;
    if shade < 0 || is_boundary {
        shade = 0;
    }

    let fogged = shade as f64 * (1.0 - fog_intensity(distance, params));
    fogged as u8
}

/// A single draw request: rows `[0, ceiling_end)` get the ceiling color,
/// `[ceiling_end, floor_start)` the wall and `[floor_start, height)` the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnDraw {
    pub x: usize,
    pub ceiling_color: Srgb<u8>,
    pub wall_color: Srgb<u8>,
    pub floor_color: Srgb<u8>,
    pub ceiling_end: usize,
    pub floor_start: usize,
    pub height: usize,
}

impl ColumnDraw {
    pub fn wall_rows(&self) -> usize {
        self.floor_start.saturating_sub(self.ceiling_end)
    }

    /// Color of row `y`, if it is on screen.
    pub fn color_at(&self, y: usize) -> Option<Srgb<u8>> {
        if y >= self.height {
            None
        } else if y < self.ceiling_end {
            Some(self.ceiling_color)
        } else if y < self.floor_start {
            Some(self.wall_color)
        } else {
            Some(self.floor_color)
        }
    }
}

pub fn shade_column(x: usize, distance: f64, is_boundary: bool, params: &RenderParams) -> ColumnDraw {
    let span = project(distance, params.height);
    let height = params.height as i32;
    let ceiling_end = span.ceiling.clamp(0, height);
    let floor_start = span.floor.clamp(ceiling_end, height);
    let grey = wall_brightness(distance, is_boundary, params);

    ColumnDraw {
        x,
        ceiling_color: params.ceiling_color,
        wall_color: Srgb::new(grey, grey, grey),
        floor_color: params.floor_color,
        ceiling_end: ceiling_end as usize,
        floor_start: floor_start as usize,
        height: params.height,
    }
}
