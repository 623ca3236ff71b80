use rusttype::{Font, Scale, point};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::consts::{READOUT_COLOR, READOUT_FONT_SIZE, READOUT_MARGIN};
use crate::player::Player;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("failed to read font {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is not a usable TrueType font")]
    Invalid(String),
}

/// Text drawn over the finished frame: frame rate and pose.
pub struct Readout {
    font: Font<'static>,
}

impl Readout {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| FontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| FontError::Invalid(path.display().to_string()))?;
        Ok(Readout { font })
    }

    pub fn lines(fps: f64, player: &Player) -> [String; 2] {
        [
            format!("FPS: {fps:.0}"),
            format!("X {:.2}  Y {:.2}  A {:.2}", player.x, player.y, player.angle),
        ]
    }

    pub fn draw(&self, frame: &mut [u8], width: usize, height: usize, fps: f64, player: &Player) {
        let line_height = READOUT_FONT_SIZE as usize;
        for (i, line) in Self::lines(fps, player).iter().enumerate() {
            draw_text(
                frame,
                width,
                height,
                &self.font,
                line,
                READOUT_MARGIN,
                READOUT_MARGIN + i * line_height,
                READOUT_COLOR,
            );
        }
    }
}

/// Alpha-blends `text` into an RGBA8 frame with its top-left corner at `(x, y)`.
#[allow(clippy::too_many_arguments)]
pub fn draw_text(
    frame: &mut [u8],
    width: usize,
    height: usize,
    font: &Font,
    text: &str,
    x: usize,
    y: usize,
    color: [u8; 4],
) {
    let scale = Scale::uniform(READOUT_FONT_SIZE);
    let v_metrics = font.v_metrics(scale);
    let layout = font.layout(text, scale, point(x as f32, y as f32 + v_metrics.ascent));

    for g in layout {
        if let Some(bb) = g.pixel_bounding_box() {
            g.draw(|gx, gy, gv| {
                let gx = gx as i32 + bb.min.x;
                let gy = gy as i32 + bb.min.y;

                if gx < 0 || gx >= width as i32 || gy < 0 || gy >= height as i32 {
                    return;
                }
                let idx = (gy as usize * width + gx as usize) * 4;
                if idx + 3 >= frame.len() {
                    return;
                }

                let alpha = (gv * 255.0) as u16;
                for c in 0..4 {
                    let blended = (color[c] as u16 * alpha + frame[idx + c] as u16 * (255 - alpha)) / 255;
                    frame[idx + c] = blended as u8;
                }
            });
        }
    }
}
