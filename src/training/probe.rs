use crate::data::Batch;
use crate::error::ModelError;
use crate::model::ModelHandle;
use crate::training::batches::IterationBatches;

/// Forward-only loss of `model` on `batch`: the mean per-example cost.
pub fn probe<M: ModelHandle + ?Sized>(model: &M, batch: &Batch) -> Result<f32, ModelError> {
    Ok(model.forward(batch)?.mean())
}

/// Losses measured at the start of one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationLosses {
    pub discriminator_positive: f32,
    pub discriminator_negative: f32,
    /// Mean of the positive and negative discriminator losses.
    pub discriminator: f32,
    pub generator: f32,
}

impl IterationLosses {
    pub fn is_finite(&self) -> bool {
        self.discriminator.is_finite() && self.generator.is_finite()
    }
}

/// Probe the discriminator on both of its batches and the generator on its own.
pub fn probe_iteration<D, G>(
    discriminator: &D,
    generator: &G,
    batches: &IterationBatches,
) -> Result<IterationLosses, ModelError>
where
    D: ModelHandle + ?Sized,
    G: ModelHandle + ?Sized,
{
    let discriminator_positive = probe(discriminator, &batches.positive)?;
    let discriminator_negative = probe(discriminator, &batches.negative)?;
    let generator_loss = probe(generator, &batches.generator)?;
    Ok(IterationLosses {
        discriminator_positive,
        discriminator_negative,
        discriminator: (discriminator_positive + discriminator_negative) / 2.0,
        generator: generator_loss,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Matrix, FAKE_LABEL, REAL_LABEL};
    use crate::model::testing::{call_log, FakeHandle};
    use crate::model::Role;

    fn batch(label: usize) -> Batch {
        Batch::uniform_label(Matrix::zeros(4, 2), label)
    }

    #[test]
    fn test_probe_is_mean_cost() {
        let log = call_log();
        let handle = FakeHandle::new(Role::DiscriminatorTraining, &log).with_cost(0.25);
        assert!((probe(&handle, &batch(REAL_LABEL)).unwrap() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_probe_iteration_averages_discriminator() {
        let log = call_log();
        let dis = FakeHandle::new(Role::DiscriminatorTraining, &log).with_cost(0.4);
        let gen = FakeHandle::new(Role::GeneratorTraining, &log).with_cost(0.9);
        let batches = IterationBatches {
            positive: batch(REAL_LABEL),
            negative: batch(FAKE_LABEL),
            generator: batch(REAL_LABEL),
        };
        let losses = probe_iteration(&dis, &gen, &batches).unwrap();
        assert!((losses.discriminator - 0.4).abs() < 1e-6);
        assert!((losses.generator - 0.9).abs() < 1e-6);
        assert!(losses.is_finite());
        // Probing never trains.
        assert!(log.borrow().iter().all(|e| e.starts_with("forward")));
    }

    #[test]
    fn test_non_finite_losses_detected() {
        let losses = IterationLosses {
            discriminator_positive: f32::NAN,
            discriminator_negative: 0.1,
            discriminator: f32::NAN,
            generator: 0.2,
        };
        assert!(!losses.is_finite());
    }
}
