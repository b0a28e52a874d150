//! The drawing interface the animation renders through.
//!
//! It is a small immediate-mode 2D context, enough to clear
//! regions and paint filled or stroked circles. [`Canvas`] is
//! the only real implementation, tests substitute recorders.

use super::{blend::Argb, Canvas};
use crate::{data::SurfaceError, math::Vec2};

pub trait DrawContext {
    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    fn set_fill_color(&mut self, c: Argb);
    fn set_stroke_color(&mut self, c: Argb);
    fn set_line_width(&mut self, w: f32);

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32);
    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32);
}

/// Something that owns pixels and can hand out a [`DrawContext`] for them.
pub trait Surface {
    type Context: DrawContext;

    fn size(&self) -> (usize, usize);

    fn context(&mut self) -> Result<&mut Self::Context, SurfaceError>;
}

impl DrawContext for Canvas {
    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let ps = Vec2::<f32>::new(x, y).to_p2();
        let pe = Vec2::<f32>::new(x + w, y + h).to_p2();
        self.draw_rect_xy_by(ps, pe, 0, |_, c| c);
    }

    fn set_fill_color(&mut self, c: Argb) {
        self.fill_color = c;
    }

    fn set_stroke_color(&mut self, c: Argb) {
        self.stroke_color = c;
    }

    fn set_line_width(&mut self, w: f32) {
        if w.is_finite() && w > 0.0 {
            self.line_width = w;
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        let (c, b) = (self.fill_color, self.mixer);
        self.draw_circle_by(Vec2::<f32>::new(cx, cy), radius, true, 0.0, c, b);
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        let (c, w, b) = (self.stroke_color, self.line_width, self.mixer);
        self.draw_circle_by(Vec2::<f32>::new(cx, cy), radius, false, w, c, b);
    }
}

impl Surface for Canvas {
    type Context = Canvas;

    fn size(&self) -> (usize, usize) {
        self.sizeu()
    }

    fn context(&mut self) -> Result<&mut Canvas, SurfaceError> {
        let (width, height) = self.sizeu();

        if width == 0 || height == 0 {
            return Err(SurfaceError::ContextUnavailable { width, height });
        }

        Ok(self)
    }
}
