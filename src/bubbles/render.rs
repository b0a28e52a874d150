use super::field::ParticleField;
use crate::graphics::{
    blend::{rgb, rgba},
    surface::DrawContext,
};

pub const BUBBLE_RGB: [u8; 3] = [94, 202, 255];
pub const OUTLINE_WIDTH: f32 = 2.0;

/// Draws one frame of the field.
///
/// The whole field area is cleared to transparent, then bubbles are
/// painted in order so later ones land on top of earlier ones.
pub fn render<C: DrawContext + ?Sized>(field: &ParticleField, ctx: &mut C) {
    ctx.clear_rect(0.0, 0.0, field.width(), field.height());

    let [r, g, b] = BUBBLE_RGB;

    for bubble in field.bubbles() {
        let (x, y, radius) = (bubble.x(), bubble.y(), bubble.radius());

        if bubble.is_outline() {
            ctx.set_stroke_color(rgb(r, g, b));
            ctx.set_line_width(OUTLINE_WIDTH);
            ctx.stroke_circle(x, y, radius);
        } else {
            ctx.set_fill_color(rgba(r, g, b, bubble.opacity()));
            ctx.fill_circle(x, y, radius);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::bubbles::bubble::Bubble;
    use crate::graphics::{blend::Argb, Canvas, P2};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        ClearRect(f32, f32, f32, f32),
        FillColor(Argb),
        StrokeColor(Argb),
        LineWidth(f32),
        FillCircle(f32, f32, f32),
        StrokeCircle(f32, f32, f32),
    }

    /// Context that remembers what it was asked to do.
    #[derive(Default)]
    pub struct Recorder {
        pub calls: Vec<Call>,
    }

    impl DrawContext for Recorder {
        fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
            self.calls.push(Call::ClearRect(x, y, w, h));
        }

        fn set_fill_color(&mut self, c: Argb) {
            self.calls.push(Call::FillColor(c));
        }

        fn set_stroke_color(&mut self, c: Argb) {
            self.calls.push(Call::StrokeColor(c));
        }

        fn set_line_width(&mut self, w: f32) {
            self.calls.push(Call::LineWidth(w));
        }

        fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
            self.calls.push(Call::FillCircle(cx, cy, radius));
        }

        fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32) {
            self.calls.push(Call::StrokeCircle(cx, cy, radius));
        }
    }

    #[test]
    fn empty_field_only_clears() {
        let field = ParticleField::from_bubbles(Vec::new(), (300, 150));
        let mut ctx = Recorder::default();

        render(&field, &mut ctx);

        assert_eq!(ctx.calls, vec![Call::ClearRect(0.0, 0.0, 300.0, 150.0)]);
    }

    #[test]
    fn filled_bubbles_use_their_opacity() {
        let field = ParticleField::from_bubbles(
            vec![
                Bubble::new(10.0, 20.0, 4.0, 0.2, 0.4, 50.0, false),
                Bubble::new(30.0, 40.0, 6.0, 0.2, 0.0, 50.0, false),
            ],
            (100, 100),
        );
        let mut ctx = Recorder::default();

        render(&field, &mut ctx);

        assert_eq!(
            ctx.calls,
            vec![
                Call::ClearRect(0.0, 0.0, 100.0, 100.0),
                Call::FillColor(0x66_5E_CA_FF),
                Call::FillCircle(10.0, 20.0, 4.0),
                Call::FillColor(0x00_5E_CA_FF),
                Call::FillCircle(30.0, 40.0, 6.0),
            ]
        );
    }

    #[test]
    fn outline_bubbles_are_stroked_opaque() {
        let field = ParticleField::from_bubbles(
            vec![Bubble::new(10.0, 20.0, 4.0, 0.2, 0.1, 50.0, true)],
            (100, 100),
        );
        let mut ctx = Recorder::default();

        render(&field, &mut ctx);

        assert_eq!(
            &ctx.calls[1..],
            &[
                Call::StrokeColor(0xFF_5E_CA_FF),
                Call::LineWidth(2.0),
                Call::StrokeCircle(10.0, 20.0, 4.0),
            ]
        );
    }

    #[test]
    fn frame_replaces_previous_frame() {
        let mut canvas = Canvas::new(40, 40);

        let field = ParticleField::from_bubbles(
            vec![Bubble::new(10.0, 10.0, 4.0, 0.2, 0.4, 50.0, false)],
            (40, 40),
        );
        render(&field, &mut canvas);
        assert_eq!(canvas.pixel_xy(P2::new(10, 10)), Some(0x66_5E_CA_FF));

        let field = ParticleField::from_bubbles(
            vec![Bubble::new(30.0, 30.0, 4.0, 0.2, 0.4, 50.0, false)],
            (40, 40),
        );
        render(&field, &mut canvas);
        assert_eq!(canvas.pixel_xy(P2::new(10, 10)), Some(0));
        assert_eq!(canvas.pixel_xy(P2::new(30, 30)), Some(0x66_5E_CA_FF));
    }
}
