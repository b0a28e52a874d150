use rand::Rng;

use crate::math::{
    map_range,
    rng::{random_float, unit},
};

/// How far, in pixels, a bubble sways to each side of its anchor.
pub const SWAY: f32 = 50.0;

/// Extra depth below the bottom edge that new bubbles are spread over,
/// so the first wave doesn't rise as a single row.
pub const SPAWN_DEPTH: f32 = 100.0;

pub const MAX_OPACITY: f32 = 0.4;

pub const SPEED_RANGE: (f32, f32) = (0.1, 0.6);
pub const AMPLITUDE_RANGE: (f32, f32) = (45.0, 95.0);

/// One rising bubble.
///
/// Everything except the position is decided when the bubble is made
/// and stays that way for its whole life. A bubble that floats off the
/// top is moved back below the bottom instead of being replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    start_x: f32,
    radius: f32,
    speed: f32,
    opacity: f32,
    amplitude: f32,
    is_outline: bool,

    x: f32,
    y: f32,
}

impl Bubble {
    pub fn new(
        start_x: f32,
        y: f32,
        radius: f32,
        speed: f32,
        opacity: f32,
        amplitude: f32,
        is_outline: bool,
    ) -> Self {
        Self {
            start_x,
            radius,
            speed,
            opacity,
            amplitude,
            is_outline,
            x: start_x,
            y,
        }
    }

    /// Rolls a bubble for a `width` by `height` surface, with a diameter
    /// in `min_diam..max_diam`. It starts somewhere below the bottom edge.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f32,
        height: f32,
        min_diam: f32,
        max_diam: f32,
    ) -> Self {
        let diam = random_float(rng, min_diam, max_diam);
        let x = (unit(rng) * width).floor();
        let y = height + diam / 2.0 + unit(rng) * SPAWN_DEPTH;
        let opacity = map_range(unit(rng), 0.0, 1.0, 0.0, MAX_OPACITY);
        let speed = random_float(rng, SPEED_RANGE.0, SPEED_RANGE.1);
        let amplitude = random_float(rng, AMPLITUDE_RANGE.0, AMPLITUDE_RANGE.1);

        Self::new(x, y, diam / 2.0, speed, opacity, amplitude, false)
    }

    /// Moves the bubble to its position for `tick`.
    ///
    /// A bubble that is fully above the top edge at the start of the tick
    /// is put back at `surface_height + radius` and stays there for this
    /// tick. Returns whether that happened.
    pub fn step(&mut self, tick: u64, surface_height: f32) -> bool {
        let wrapped = self.y <= self.radius * -2.0;

        if wrapped {
            self.y = surface_height + self.radius;
        } else {
            self.y -= self.speed;
        }

        self.x = sway(self.start_x, self.amplitude, tick);

        wrapped
    }

    /// Parks the bubble just below the bottom edge.
    pub fn reset(&mut self, surface_height: f32) {
        self.y = surface_height + self.radius;
    }

    pub fn start_x(&self) -> f32 {
        self.start_x
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn is_outline(&self) -> bool {
        self.is_outline
    }
}

/// Horizontal position at `tick`, a pure function of the anchor and the
/// clock. Computed in double precision so long runs don't drift.
pub fn sway(start_x: f32, amplitude: f32, tick: u64) -> f32 {
    let phase = tick as f64 / amplitude as f64;
    start_x + (phase.sin() * SWAY as f64) as f32
}
