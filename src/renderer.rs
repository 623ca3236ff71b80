use palette::Srgb;

use crate::shading::ColumnDraw;

/// Receiver of per-column draw requests.
pub trait ColumnSink {
    fn draw_column(&mut self, column: &ColumnDraw);
}

/// Collects the requests instead of drawing them.
impl ColumnSink for Vec<ColumnDraw> {
    fn draw_column(&mut self, column: &ColumnDraw) {
        self.push(*column);
    }
}

fn pack(color: Srgb<u8>) -> u32 {
    ((color.red as u32) << 16) | ((color.green as u32) << 8) | (color.blue as u32)
}

/// Software framebuffer, `0x00RRGGBB` per pixel, row-major.
pub struct Renderer {
    pub buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Renderer {
            buffer: vec![0; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Srgb<u8>) {
        self.buffer.fill(pack(color));
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.buffer[y * self.width + x])
    }

    /// Copies the buffer into an RGBA8 frame such as `Pixels::frame_mut`.
    pub fn draw_to_buffer(&self, frame: &mut [u8]) {
        for (pixel, color) in frame.chunks_exact_mut(4).zip(&self.buffer) {
            let rgba = [(color >> 16) as u8, (color >> 8) as u8, *color as u8, 0xFF];
            pixel.copy_from_slice(&rgba);
        }
    }
}

impl ColumnSink for Renderer {
    fn draw_column(&mut self, column: &ColumnDraw) {
        if column.x >= self.width {
            return;
        }
        let bottom = column.height.min(self.height);
        let ceiling_end = column.ceiling_end.min(bottom);
        let floor_start = column.floor_start.clamp(ceiling_end, bottom);

        let spans = [
            (0, ceiling_end, column.ceiling_color),
            (ceiling_end, floor_start, column.wall_color),
            (floor_start, bottom, column.floor_color),
        ];
        for (start, end, color) in spans {
            let color = pack(color);
            for y in start..end {
                self.buffer[y * self.width + column.x] = color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(x: usize) -> ColumnDraw {
        ColumnDraw {
            x,
            ceiling_color: Srgb::new(0, 0, 64),
            wall_color: Srgb::new(200, 200, 200),
            floor_color: Srgb::new(64, 64, 64),
            ceiling_end: 2,
            floor_start: 5,
            height: 8,
        }
    }

    #[test]
    fn column_fills_three_spans() {
        let mut renderer = Renderer::new(4, 8);
        renderer.draw_column(&column(1));
        assert_eq!(renderer.pixel(1, 0), Some(0x0000_0040));
        assert_eq!(renderer.pixel(1, 1), Some(0x0000_0040));
        assert_eq!(renderer.pixel(1, 2), Some(0x00C8_C8C8));
        assert_eq!(renderer.pixel(1, 4), Some(0x00C8_C8C8));
        assert_eq!(renderer.pixel(1, 5), Some(0x0040_4040));
        assert_eq!(renderer.pixel(1, 7), Some(0x0040_4040));
        // other columns untouched
        assert_eq!(renderer.pixel(0, 3), Some(0));
        assert_eq!(renderer.pixel(2, 3), Some(0));
    }

    #[test]
    fn offscreen_columns_are_ignored() {
        let mut renderer = Renderer::new(4, 8);
        renderer.clear(Srgb::new(1, 2, 3));
        renderer.draw_column(&column(4));
        assert!(renderer.buffer.iter().all(|&p| p == 0x0001_0203));
    }

    #[test]
    fn frame_is_rgba() {
        let mut renderer = Renderer::new(2, 1);
        renderer.clear(Srgb::new(10, 20, 30));
        let mut frame = vec![0u8; 8];
        renderer.draw_to_buffer(&mut frame);
        assert_eq!(frame, [10, 20, 30, 255, 10, 20, 30, 255]);
    }

    #[test]
    fn vec_sink_records_requests() {
        let mut sink: Vec<ColumnDraw> = Vec::new();
        sink.draw_column(&column(0));
        sink.draw_column(&column(1));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].x, 1);
    }
}
