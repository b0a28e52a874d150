pub mod blend;
pub mod draw;
pub mod surface;

use blend::{Argb, Blend, Mixer};

use crate::math::Vec2;

pub type P2 = Vec2<i32>;

pub const DEFAULT_BACKGROUND: Argb = 0xFF_24_24_24;

/// Software raster the bubbles are drawn into.
///
/// Pixels are non-premultiplied ARGB. The buffer starts out fully
/// transparent and is composited over `background` when it gets
/// copied out to a window or terminal.
pub struct Canvas {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,

    background: Argb,

    fill_color: Argb,
    stroke_color: Argb,
    line_width: f32,
    mixer: Mixer,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![Argb::trans(); w * h],
            width: w,
            height: h,

            background: DEFAULT_BACKGROUND,

            fill_color: Argb::black(),
            stroke_color: Argb::black(),
            line_width: 1.0,
            mixer: u32::mix,
        }
    }

    pub fn sizeu(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn set_background(&mut self, bg: Argb) {
        // The backdrop is always opaque, otherwise windows would
        // show whatever the compositor puts behind them.
        self.background = bg.set_alpha(0xFF);
    }

    pub fn background(&self) -> Argb {
        self.background
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.buffer.clear();
        self.buffer.resize(w * h, Argb::trans());
        self.width = w;
        self.height = h;
    }

    pub fn is_in_bound(&self, p: P2) -> bool {
        (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    pub fn pixel_xy(&self, p: P2) -> Option<Argb> {
        if !self.is_in_bound(p) {
            return None;
        }

        self.buffer.get(p.y as usize * self.width + p.x as usize).copied()
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[Argb] {
        &self.buffer
    }

    /// Pixel at `p` composited over the background, as opaque ARGB.
    pub fn presented_xy(&self, p: P2) -> Option<Argb> {
        self.pixel_xy(p).map(|c| self.background.mix(c))
    }

    /// Copies the canvas into `dest`, enlarging every pixel into a
    /// `scale` by `scale` block and flattening it onto the background.
    ///
    /// `dst_width` is the row stride of `dest`. On some compositors the
    /// final window size is not an exact multiple of the scale, so
    /// the stride can't be derived from the canvas width. Output pixels
    /// are 0RGB, which is what softbuffer and minifb both expect.
    pub fn scale_to(&self, scale: usize, dest: &mut [u32], dst_width: Option<usize>) {
        if self.width == 0 || scale == 0 {
            return;
        }

        let dst_width = dst_width.unwrap_or(self.width * scale);
        let line_width = dst_width.min(self.width * scale);

        if dst_width == 0 {
            return;
        }

        for (src_row, dst_block) in self
            .buffer
            .chunks_exact(self.width)
            .zip(dest.chunks_mut(dst_width * scale))
        {
            let (first, rest) = dst_block.split_at_mut(dst_width.min(dst_block.len()));
            let n = line_width.min(first.len());

            for (src_pixel, dst_chunk) in src_row.iter().zip(first[..n].chunks_mut(scale)) {
                dst_chunk.fill(self.background.mix(*src_pixel) & 0x00_FF_FF_FF);
            }

            for row in rest.chunks_mut(dst_width) {
                let n = row.len().min(line_width);
                row[..n].copy_from_slice(&first[..n]);
            }
        }
    }
}
