use burn::prelude::*;

use crate::data::{Batch, Matrix};
use crate::error::ModelError;
use crate::model::encoding::{features_tensor, tensor_to_matrix};
use crate::model::networks::{Generator, GeneratorConfig};
use crate::model::{InferBackend, ModelHandle, ParamValue, ParameterMap, Role};

/// Generator-inference handle: a read-only mirror of the generator used to
/// produce samples. It never computes gradients.
pub struct SamplerHandle {
    network: Generator<InferBackend>,
    device: <InferBackend as Backend>::Device,
}

impl SamplerHandle {
    pub fn new(config: &GeneratorConfig) -> Self {
        let device = Default::default();
        SamplerHandle {
            network: config.init(&device),
            device,
        }
    }
}

impl ModelHandle for SamplerHandle {
    fn role(&self) -> Role {
        Role::GeneratorInference
    }

    /// Maps the noise rows of `batch` to generated samples. Labels are ignored.
    fn forward(&self, batch: &Batch) -> Result<Matrix, ModelError> {
        let samples = self
            .network
            .forward(features_tensor(batch.features(), &self.device));
        tensor_to_matrix(samples)
    }

    fn parameters(&self) -> Result<ParameterMap, ModelError> {
        let mut params = ParameterMap::new();
        self.network.export_parameters(&mut params)?;
        Ok(params)
    }

    fn set_parameter(&mut self, name: &str, value: &ParamValue) -> Result<(), ModelError> {
        self.network.import_parameter(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::REAL_LABEL;

    #[test]
    fn test_sampler_generates_sample_rows() {
        let sampler = SamplerHandle::new(&GeneratorConfig::new(3, 8, 2));
        let noise = Batch::uniform_label(Matrix::zeros(5, 3), REAL_LABEL);
        let samples = sampler.forward(&noise).unwrap();
        assert_eq!((samples.rows(), samples.cols()), (5, 2));
    }

    #[test]
    fn test_sampler_exposes_only_generator_parameters() {
        let sampler = SamplerHandle::new(&GeneratorConfig::new(3, 8, 2));
        let params = sampler.parameters().unwrap();
        assert_eq!(params.names().count(), 4);
        assert!(params.names().all(|n| n.starts_with("gen.")));
    }
}
