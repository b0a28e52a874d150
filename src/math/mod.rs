pub mod rng;
mod vec2;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

/// Linearly remaps `value` from `low1..high1` onto `low2..high2`.
///
/// No clamping is done, values outside the source range
/// extrapolate along the same line.
pub fn map_range(value: f32, low1: f32, high1: f32, low2: f32, high2: f32) -> f32 {
    low2 + (high2 - low2) * (value - low1) / (high1 - low1)
}
