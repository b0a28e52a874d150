use super::Vec2;

impl Vec2<f32> {
    pub const fn new(x: f32, y: f32) -> Vec2<f32> {
        Vec2::<f32> { x, y }
    }

    /// Truncates toward the pixel grid. Saturates on overflow.
    pub fn to_p2(self) -> Vec2<i32> {
        Vec2::<i32> {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
        }
    }
}

impl Vec2<i32> {
    pub fn new<A, B>(x: A, y: B) -> Vec2<i32>
    where
        i32: TryFrom<A> + TryFrom<B>,
    {
        Vec2::<i32> {
            x: i32::try_from(x).unwrap_or(i32::MAX),
            y: i32::try_from(y).unwrap_or(i32::MAX),
        }
    }
}
