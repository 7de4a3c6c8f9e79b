use rand::{Rng, SeedableRng, rngs::StdRng};

/// Random source shared by every layout and jitter in a scene.
///
/// All draws go through `unit()` so a zero-sized surface yields zero instead of an empty-range
/// panic.
#[derive(Clone, Debug)]
pub struct SceneRng {
    inner: StdRng,
    seed: u64,
}

impl SceneRng {
    /// Deterministic generator for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random::<u64>())
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }

    /// The seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform sample in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Uniform sample in `[0, max)`; `0` when `max` is `0`.
    pub fn below(&mut self, max: f64) -> f64 {
        self.unit() * max
    }

    /// Uniform sample in `[min, min + span)`.
    pub fn span(&mut self, min: f64, span: f64) -> f64 {
        min + self.unit() * span
    }

    /// Uniform sample in `[-half, half)`.
    pub fn centered(&mut self, half: f64) -> f64 {
        (self.unit() - 0.5) * 2.0 * half
    }

    /// Uniform index in `0..len`. `len` must be non-zero, which callers guarantee by construction.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.inner.random_range(0..len.max(1))
    }

    /// Bernoulli draw with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}
