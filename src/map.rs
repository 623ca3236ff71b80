use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{PLAYER_START_ANGLE, PLAYER_START_X, PLAYER_START_Y};

/// The layout the renderer ships with.
pub const DEFAULT_LAYOUT: [&str; 16] = [
    "################",
    "#........###...#",
    "#...#....###...#",
    "#...#..........#",
    "#...#####..##..#",
    "#......#....#..#",
    "#......#....#..#",
    "#......#....#..#",
    "###....##..##..#",
    "#..............#",
    "#..............#",
    "#.......#......#",
    "#.......#......#",
    "#....######....#",
    "#.........#....#",
    "################",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
}

impl Tile {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Tile::Wall),
            '.' | ' ' => Some(Tile::Empty),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum MapError {
    #[error("failed to read map file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse map file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("map has no tiles")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile {tile:?} at column {col}, row {row}")]
    UnknownTile { tile: char, col: usize, row: usize },
    #[error("border cell ({col}, {row}) is open, rays could leave the map")]
    Unenclosed { col: usize, row: usize },
}

/// Where the player appears when the map is loaded.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub angle: f64,
}

impl Default for Spawn {
    fn default() -> Self {
        Spawn {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            angle: PLAYER_START_ANGLE,
        }
    }
}

/// On-disk form of a map.
#[derive(Serialize, Deserialize, Debug)]
struct MapFile {
    rows: Vec<String>,
    spawn: Option<Spawn>,
}

/// Static tile grid. Every border cell is a wall, which is what lets the
/// ray caster run without an iteration bound.
#[derive(Debug, Clone)]
pub struct World {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
    pub spawn: Spawn,
}

impl Default for World {
    fn default() -> Self {
        // The built-in layout is enclosed and rectangular.
        match World::from_layout(&DEFAULT_LAYOUT) {
            Ok(world) => world,
            Err(e) => unreachable!("built-in layout rejected: {e}"),
        }
    }
}

impl World {
    pub fn from_layout<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, c) in line.chars().enumerate() {
                let tile = Tile::from_char(c).ok_or(MapError::UnknownTile { tile: c, col, row })?;
                tiles.push(tile);
            }
        }

        let world = World {
            tiles,
            width,
            height,
            spawn: Spawn::default(),
        };
        world.check_enclosed()?;
        debug!(width, height, "map layout accepted");
        Ok(world)
    }

    pub fn parse_from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: MapFile = toml::from_str(&contents).map_err(|source| MapError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        let mut world = Self::from_layout(&file.rows)?;
        if let Some(spawn) = file.spawn {
            world.spawn = spawn;
        }
        info!(path = %path.display(), width = world.width, height = world.height, "loaded map");
        Ok(world)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Looks up a cell; anything outside the grid reads as a wall.
    pub fn get_tile(&self, x: i64, y: i64) -> Tile {
        if x < 0 || y < 0 {
            return Tile::Wall;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return Tile::Wall;
        }
        self.tiles[y * self.width + x]
    }

    pub fn is_wall(&self, x: i64, y: i64) -> bool {
        self.get_tile(x, y) == Tile::Wall
    }

    /// Whether the cell containing the continuous point is a wall.
    pub fn is_wall_at(&self, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return true;
        }
        self.is_wall(x.floor() as i64, y.floor() as i64)
    }

    /// True for cells on the outermost ring of the grid.
    pub fn is_border(&self, x: i64, y: i64) -> bool {
        x == 0 || y == 0 || x == self.width as i64 - 1 || y == self.height as i64 - 1
    }

    fn check_enclosed(&self) -> Result<(), MapError> {
        for row in 0..self.height {
            for col in 0..self.width {
                let (x, y) = (col as i64, row as i64);
                if self.is_border(x, y) && !self.is_wall(x, y) {
                    return Err(MapError::Unenclosed { col, row });
                }
            }
        }
        Ok(())
    }
}
