use super::{
    blend::{Argb, Mixer},
    Canvas, P2,
};
use crate::math::Vec2;

impl Canvas {
    /// Paints the half-open rectangle `ps..pe`, clipped to the canvas.
    pub fn draw_rect_xy_by(&mut self, ps: P2, pe: P2, c: Argb, b: Mixer) {
        let (w, h) = (self.width as i32, self.height as i32);

        let xs = ps.x.clamp(0, w) as usize;
        let xe = pe.x.clamp(0, w) as usize;
        let ys = ps.y.clamp(0, h) as usize;
        let ye = pe.y.clamp(0, h) as usize;

        if xs >= xe {
            return;
        }

        for line in self
            .buffer
            .chunks_exact_mut(self.width)
            .skip(ys)
            .take(ye.saturating_sub(ys))
        {
            for p in &mut line[xs..xe] {
                *p = b(*p, c);
            }
        }
    }

    /// Paints pixels `xs..=xe` of row `y`.
    fn draw_span_by(&mut self, y: i32, xs: i32, xe: i32, c: Argb, b: Mixer) {
        if xs > xe {
            return;
        }

        self.draw_rect_xy_by(
            P2 { x: xs, y },
            P2 {
                x: xe.saturating_add(1),
                y: y.saturating_add(1),
            },
            c,
            b,
        );
    }

    /// Rasterizes a circle by pixel centers.
    ///
    /// A filled circle covers every pixel whose center is within `radius`.
    /// An outline covers the ring `radius ± line_width / 2`.
    pub fn draw_circle_by(
        &mut self,
        center: Vec2<f32>,
        radius: f32,
        filled: bool,
        line_width: f32,
        c: Argb,
        b: Mixer,
    ) {
        let (outer, inner) = if filled {
            (radius, None)
        } else {
            let half = line_width.max(0.0) * 0.5;
            (radius + half, Some(radius - half).filter(|&r| r > 0.0))
        };

        if !(outer > 0.0) || !center.x.is_finite() || !center.y.is_finite() {
            return;
        }

        let h = self.height as i32;

        let ys = ((center.y - outer - 0.5).ceil() as i32).max(0);
        let ye = ((center.y + outer - 0.5).floor() as i32).min(h - 1);

        for y in ys..=ye {
            let dy = y as f32 + 0.5 - center.y;

            let Some(half_outer) = half_chord(outer, dy) else {
                continue;
            };

            let (xs, xe) = span(center.x, half_outer);

            match inner.and_then(|r| half_chord(r, dy)) {
                Some(half_inner) => {
                    let (is, ie) = span(center.x, half_inner);
                    self.draw_span_by(y, xs, is.min(xe + 1) - 1, c, b);
                    self.draw_span_by(y, ie.max(xs - 1) + 1, xe, c, b);
                }

                None => self.draw_span_by(y, xs, xe, c, b),
            }
        }
    }
}

fn half_chord(r: f32, dy: f32) -> Option<f32> {
    let d = r * r - dy * dy;
    (d >= 0.0).then(|| d.sqrt())
}

// First and last pixel whose center lies within `half` of `cx`.
fn span(cx: f32, half: f32) -> (i32, i32) {
    (
        (cx - half - 0.5).ceil() as i32,
        (cx + half - 0.5).floor() as i32,
    )
}
