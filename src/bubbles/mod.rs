//! The rising bubbles animation.
//!
//! [`Bubbles`] ties the pieces together: it seeds a [`ParticleField`]
//! for a surface, and on every frame either advances and repaints it
//! or, while stopped, parks it below the bottom edge.

pub mod bubble;
pub mod field;
pub mod frame_loop;
pub mod playback;
pub mod render;

use rand::Rng;

use crate::{
    data::{config::BubbleConfig, Error},
    graphics::surface::{DrawContext, Surface},
    math::rng,
};

pub use field::ParticleField;
pub use playback::{Playback, PlaybackState};

pub struct Bubbles {
    field: ParticleField,
    playback: Playback,
}

impl Bubbles {
    /// Seeds a field for `surface`. Playback starts out stopped.
    ///
    /// Fails if the config is invalid or the surface can't give out a
    /// drawing context. Nothing is created in either case.
    pub fn initialize<S: Surface>(
        surface: &mut S,
        config: &BubbleConfig,
        seed: Option<u64>,
    ) -> Result<Self, Error> {
        Self::initialize_with_rng(surface, config, &mut rng::seeded(seed))
    }

    pub fn initialize_with_rng<S: Surface, R: Rng + ?Sized>(
        surface: &mut S,
        config: &BubbleConfig,
        rng: &mut R,
    ) -> Result<Self, Error> {
        config.validate()?;
        surface.context()?;

        let size = surface.size();

        if config.blur {
            tracing::debug!("blur was requested, it has no effect");
        }

        let field = ParticleField::seed(
            rng,
            config.bubble_count,
            config.min_diam,
            config.max_diam,
            size,
        );

        tracing::info!(
            count = field.len(),
            width = size.0,
            height = size.1,
            "seeded bubbles"
        );

        Ok(Self {
            field,
            playback: Playback::new(),
        })
    }

    pub fn start(&self) {
        self.playback.start();
    }

    pub fn stop(&self) {
        self.playback.stop();
    }

    pub fn toggle(&self) -> PlaybackState {
        self.playback.toggle()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// A handle to the playback state that can be moved elsewhere.
    pub fn playback(&self) -> Playback {
        self.playback.clone()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// One frame of the animation. Returns whether `ctx` was painted.
    ///
    /// While stopped the field is parked at the baseline and nothing is
    /// drawn, so whatever was painted last stays on screen.
    pub fn frame<C: DrawContext + ?Sized>(&mut self, ctx: &mut C) -> bool {
        if !self.playback.is_playing() {
            self.field.reset_to_baseline();
            return false;
        }

        self.field.advance();
        render::render(&self.field, ctx);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{ConfigError, SurfaceError},
        graphics::{Canvas, P2},
        math::rng::seeded,
    };
    use render::tests::{Call, Recorder};

    fn config(count: usize, min_diam: f32, max_diam: f32) -> BubbleConfig {
        BubbleConfig {
            bubble_count: count,
            min_diam,
            max_diam,
            blur: false,
        }
    }

    fn playing(canvas: &mut Canvas, config: &BubbleConfig) -> Bubbles {
        let b = Bubbles::initialize_with_rng(canvas, config, &mut seeded(Some(1)))
            .expect("valid setup");
        b.start();
        b
    }

    #[test]
    fn defaults_on_a_wide_surface() {
        let mut canvas = Canvas::new(640, 360);
        let b = Bubbles::initialize(&mut canvas, &BubbleConfig::default(), Some(8))
            .expect("valid setup");

        assert_eq!(b.field().len(), 20);
        assert!(!b.is_playing());

        for bubble in b.field().bubbles() {
            assert!(bubble.radius() >= 3.0 && bubble.radius() < 20.0);
            assert!(bubble.start_x() >= 0.0 && bubble.start_x() < 640.0);
        }
    }

    #[test]
    fn equal_diameters() {
        let mut canvas = Canvas::new(50, 100);
        let b = Bubbles::initialize(&mut canvas, &config(1, 10.0, 10.0), Some(3))
            .expect("valid setup");

        let bubble = &b.field().bubbles()[0];
        assert_eq!(bubble.radius(), 5.0);
        assert!(bubble.y() >= 105.0 && bubble.y() < 205.0);
    }

    #[test]
    fn zero_bubbles_still_clear() {
        let mut canvas = Canvas::new(30, 30);
        let mut b = Bubbles::initialize(&mut canvas, &config(0, 6.0, 40.0), None)
            .expect("valid setup");
        b.start();

        let mut ctx = Recorder::default();
        for _ in 0..3 {
            assert!(b.frame(&mut ctx));
        }

        assert_eq!(ctx.calls, vec![Call::ClearRect(0.0, 0.0, 30.0, 30.0); 3]);
    }

    #[test]
    fn stopped_frames_park_and_skip_drawing() {
        let mut canvas = Canvas::new(200, 200);
        let mut b = playing(&mut canvas, &config(5, 6.0, 40.0));

        let mut ctx = Recorder::default();
        for _ in 0..40 {
            b.frame(&mut ctx);
        }
        let tick = b.field().tick();
        assert_eq!(tick, 40);

        b.stop();
        ctx.calls.clear();

        for _ in 0..5 {
            assert!(!b.frame(&mut ctx));
        }

        assert!(ctx.calls.is_empty());
        assert_eq!(b.field().tick(), tick);
        for bubble in b.field().bubbles() {
            assert_eq!(bubble.y(), 200.0 + bubble.radius());
        }
    }

    #[test]
    fn stop_then_start_resumes_from_baseline() {
        let mut canvas = Canvas::new(200, 200);
        let mut b = playing(&mut canvas, &config(3, 6.0, 40.0));

        let mut ctx = Recorder::default();
        for _ in 0..10 {
            b.frame(&mut ctx);
        }

        b.stop();
        b.frame(&mut ctx);
        b.start();
        b.frame(&mut ctx);

        assert_eq!(b.field().tick(), 11);
        for bubble in b.field().bubbles() {
            assert_eq!(bubble.y(), 200.0 + bubble.radius() - bubble.speed());
        }
    }

    #[test]
    fn playing_frames_paint_the_canvas() {
        let mut canvas = Canvas::new(64, 64);
        let mut b = playing(&mut canvas, &config(200, 10.0, 20.0));

        for _ in 0..600 {
            assert!(b.frame(&mut canvas));
        }

        assert!(canvas.as_slice().iter().any(|&p| p != 0));
        assert!(canvas.pixel_xy(P2::new(63, 63)).is_some());
    }

    #[test]
    fn negative_diameters_are_rejected() {
        let mut canvas = Canvas::new(64, 64);
        let err = Bubbles::initialize(&mut canvas, &config(5, -1.0, 10.0), None);

        assert!(matches!(
            err,
            Err(Error::Config(ConfigError::InvalidMinDiameter(_)))
        ));
    }

    #[test]
    fn oversized_population_is_rejected() {
        let mut canvas = Canvas::new(64, 64);
        let err = Bubbles::initialize(&mut canvas, &config(usize::MAX, 6.0, 40.0), None);

        assert!(matches!(
            err,
            Err(Error::Config(ConfigError::TooManyBubbles { .. }))
        ));
    }

    #[test]
    fn missing_context_fails_cleanly() {
        let mut canvas = Canvas::new(0, 0);
        let err = Bubbles::initialize(&mut canvas, &BubbleConfig::default(), None);

        assert!(matches!(
            err,
            Err(Error::Surface(SurfaceError::ContextUnavailable { .. }))
        ));
    }

    #[test]
    fn handles_control_the_same_animation() {
        let mut canvas = Canvas::new(64, 64);
        let mut b = Bubbles::initialize(&mut canvas, &config(2, 6.0, 40.0), Some(2))
            .expect("valid setup");

        let handle = b.playback();
        handle.start();
        assert!(b.frame(&mut Recorder::default()));

        handle.stop();
        assert!(!b.frame(&mut Recorder::default()));
        assert_eq!(b.toggle(), PlaybackState::Playing);
        assert!(handle.is_playing());
    }

    #[test]
    fn blur_is_accepted() {
        let mut canvas = Canvas::new(64, 64);
        let mut cfg = config(2, 6.0, 40.0);
        cfg.blur = true;

        assert!(Bubbles::initialize(&mut canvas, &cfg, Some(2)).is_ok());
    }
}
