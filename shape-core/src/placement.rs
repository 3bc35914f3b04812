//! Placement policy for shapes added without an explicit position or color.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Color, Position};

/// Default half-width of the square new shapes are scattered over.
pub const DEFAULT_EXTENT: f64 = 5.0;

/// Chooses where a new shape goes and what color it gets.
pub trait PlacementPolicy {
    /// Position for the next shape.
    fn position(&mut self) -> Position;

    /// Color for the next shape.
    fn color(&mut self) -> Color;
}

/// Uniform random placement on the z = 0 plane.
///
/// Positions are drawn from `[-extent, extent]²` and each color channel
/// from `[0, 1]` independently.
#[derive(Debug, Clone)]
pub struct RandomPlacement<R: Rng> {
    rng: R,
    extent: f64,
}

impl<R: Rng> RandomPlacement<R> {
    /// Create a policy drawing from `rng`.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            extent: DEFAULT_EXTENT,
        }
    }

    /// Set the half-width of the placement square. Negative values are
    /// treated as their magnitude; non-finite values are ignored.
    #[must_use]
    pub fn with_extent(mut self, extent: f64) -> Self {
        if extent.is_finite() {
            self.extent = extent.abs();
        }
        self
    }
}

impl RandomPlacement<StdRng> {
    /// Seed from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Seed deterministically, for reproducible sessions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PlacementPolicy for RandomPlacement<R> {
    fn position(&mut self) -> Position {
        let e = self.extent;
        if e == 0.0 {
            return Position::default();
        }
        Position::new(
            self.rng.random_range(-e..=e),
            self.rng.random_range(-e..=e),
            0.0,
        )
    }

    fn color(&mut self) -> Color {
        Color::rgb(
            self.rng.random_range(0.0..=1.0),
            self.rng.random_range(0.0..=1.0),
            self.rng.random_range(0.0..=1.0),
        )
    }
}
