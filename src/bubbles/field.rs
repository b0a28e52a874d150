use rand::Rng;

use super::bubble::Bubble;

/// The whole population of bubbles plus the shared clock.
///
/// The surface size is captured once at seeding time. Later resizes
/// of whatever the field is drawn onto are not picked up.
#[derive(Debug, Clone)]
pub struct ParticleField {
    bubbles: Vec<Bubble>,
    width: f32,
    height: f32,
    tick: u64,
}

impl ParticleField {
    pub fn seed<R: Rng + ?Sized>(
        rng: &mut R,
        count: usize,
        min_diam: f32,
        max_diam: f32,
        (width, height): (usize, usize),
    ) -> Self {
        let (width, height) = (width as f32, height as f32);

        let bubbles = (0..count)
            .map(|_| Bubble::random(&mut *rng, width, height, min_diam, max_diam))
            .collect();

        Self {
            bubbles,
            width,
            height,
            tick: 0,
        }
    }

    #[cfg(test)]
    pub fn from_bubbles(bubbles: Vec<Bubble>, (width, height): (usize, usize)) -> Self {
        Self {
            bubbles,
            width: width as f32,
            height: height as f32,
            tick: 0,
        }
    }

    /// Advances the clock by one and moves every bubble.
    pub fn advance(&mut self) {
        self.tick += 1;

        for (i, bubble) in self.bubbles.iter_mut().enumerate() {
            if bubble.step(self.tick, self.height) {
                tracing::trace!(bubble = i, tick = self.tick, "wrapped to bottom");
            }
        }
    }

    /// Parks every bubble just below the bottom edge. The clock and the
    /// horizontal positions are left as they are.
    pub fn reset_to_baseline(&mut self) {
        let height = self.height;
        self.bubbles.iter_mut().for_each(|b| b.reset(height));
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}
