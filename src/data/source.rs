use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::data::batch::{Batch, Matrix, REAL_LABEL};

/// Supplies real-data batches and generator noise batches on demand.
pub trait SampleSource {
    /// `n` samples of dimension `dim` from the real distribution, labelled real.
    fn real_batch(&mut self, n: usize, dim: usize) -> Batch;

    /// `n` standard-normal noise vectors of dimension `dim`, labelled real
    /// (the generator's target class).
    fn noise_batch(&mut self, n: usize, dim: usize) -> Batch;
}

/// Distribution the "real" samples are drawn from.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RealDistribution {
    Uniform { low: f32, high: f32 },
    Normal { mean: f32, std: f32 },
}

impl Default for RealDistribution {
    fn default() -> Self {
        RealDistribution::Uniform {
            low: 0.0,
            high: 1.0,
        }
    }
}

/// `SampleSource` backed by a seedable RNG.
pub struct RandomSampleSource {
    real: RealDistribution,
    rng: StdRng,
}

impl RandomSampleSource {
    pub fn new(real: RealDistribution, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        RandomSampleSource { real, rng }
    }

    fn draw_real(&mut self) -> f32 {
        match self.real {
            RealDistribution::Uniform { low, high } => self.rng.random_range(low..high),
            RealDistribution::Normal { mean, std } => {
                let z: f32 = self.rng.sample(StandardNormal);
                mean + std * z
            }
        }
    }
}

impl SampleSource for RandomSampleSource {
    fn real_batch(&mut self, n: usize, dim: usize) -> Batch {
        let values = (0..n * dim).map(|_| self.draw_real()).collect();
        Batch::uniform_label(Matrix::new(n, dim, values), REAL_LABEL)
    }

    fn noise_batch(&mut self, n: usize, dim: usize) -> Batch {
        let values = (0..n * dim)
            .map(|_| self.rng.sample::<f32, _>(StandardNormal))
            .collect();
        Batch::uniform_label(Matrix::new(n, dim, values), REAL_LABEL)
    }
}
