use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::{Point, Rectangle};


/// Supplies the coordinates that a survey inserts.
pub trait PointSource {
    fn next_point(&mut self) -> Point;
}


/// Samples points uniformly inside an area.
pub struct UniformSource<R: Rng> {
    area: Rectangle,
    rng: R,
}

impl<R: Rng> UniformSource<R> {
    pub fn new(area: Rectangle, rng: R) -> Self {
        Self { area, rng }
    }

    fn sample(&mut self, low: f64, high: f64) -> f64 {
        // random_range panics on an empty range
        if low < high {
            self.rng.random_range(low..high)
        } else {
            low
        }
    }
}

impl UniformSource<StdRng> {
    /// reproducible source, or one seeded from the OS when no seed is given
    pub fn seeded(area: Rectangle, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(area, rng)
    }
}

impl<R: Rng> PointSource for UniformSource<R> {
    fn next_point(&mut self) -> Point {
        let x = self.sample(self.area.left(), self.area.right());
        let y = self.sample(self.area.top(), self.area.bottom());
        Point::new(x, y)
    }
}
