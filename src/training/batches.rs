use crate::data::{Batch, SampleSource, FAKE_LABEL};
use crate::error::ModelError;
use crate::model::{Dimensions, ModelHandle};

/// The three batches one iteration works on.
#[derive(Debug, Clone)]
pub struct IterationBatches {
    /// Real samples labelled real, for the discriminator.
    pub positive: Batch,
    /// Samples from the inference generator labelled fake, for the discriminator.
    pub negative: Batch,
    /// Noise labelled real, for the generator.
    pub generator: Batch,
}

impl IterationBatches {
    /// Draw a fresh set of batches of `batch_size` rows each.
    pub fn assemble<S: ModelHandle + ?Sized>(
        source: &mut dyn SampleSource,
        sampler: &S,
        batch_size: usize,
        dims: Dimensions,
    ) -> Result<Self, ModelError> {
        let positive = source.real_batch(batch_size, dims.sample);
        let negative = fake_batch(source, sampler, batch_size, dims.noise)?;
        let generator = source.noise_batch(batch_size, dims.noise);
        Ok(IterationBatches {
            positive,
            negative,
            generator,
        })
    }
}

/// Generate `n` samples with `sampler` and label them fake.
pub fn fake_batch<S: ModelHandle + ?Sized>(
    source: &mut dyn SampleSource,
    sampler: &S,
    n: usize,
    noise_dim: usize,
) -> Result<Batch, ModelError> {
    let noise = source.noise_batch(n, noise_dim);
    let samples = sampler.forward(&noise)?;
    Ok(Batch::uniform_label(samples, FAKE_LABEL))
}
