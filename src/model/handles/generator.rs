use burn::module::AutodiffModule;
use burn::optim::adaptor::OptimizerAdaptor;
use burn::optim::{Adam, AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;

use crate::data::{Batch, Matrix};
use crate::error::ModelError;
use crate::model::encoding::{
    features_tensor, labels_tensor, per_example_cross_entropy, tensor_to_matrix,
};
use crate::model::networks::{DiscriminatorConfig, GeneratorConfig, GeneratorTrainingNet};
use crate::model::{ModelHandle, ParamValue, ParameterMap, Role, TrainBackend, TrainableHandle};

/// Generator-training handle.
///
/// Holds the generator stacked on a copy of the discriminator. Its cost is
/// how confidently that discriminator rejects `G(noise)` as fake; a training
/// step only moves the generator's parameters, the discriminator copy is
/// refreshed exclusively through synchronization.
pub struct GeneratorHandle {
    network: GeneratorTrainingNet<TrainBackend>,
    optimizer: OptimizerAdaptor<Adam, GeneratorTrainingNet<TrainBackend>, TrainBackend>,
    learning_rate: f64,
    device: <TrainBackend as Backend>::Device,
    step_count: usize,
}

impl GeneratorHandle {
    pub fn new(
        generator: &GeneratorConfig,
        discriminator: &DiscriminatorConfig,
        learning_rate: f64,
    ) -> Self {
        let device = Default::default();
        GeneratorHandle {
            network: GeneratorTrainingNet::new(generator, discriminator, &device),
            optimizer: AdamConfig::new().init(),
            learning_rate,
            device,
            step_count: 0,
        }
    }
}

impl ModelHandle for GeneratorHandle {
    fn role(&self) -> Role {
        Role::GeneratorTraining
    }

    fn forward(&self, batch: &Batch) -> Result<Matrix, ModelError> {
        let network = self.network.valid();
        let logits = network.forward(features_tensor(batch.features(), &self.device));
        let costs = per_example_cross_entropy(logits, labels_tensor(batch.labels(), &self.device));
        tensor_to_matrix(costs)
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

impl TrainableHandle for GeneratorHandle {
    fn train_step(&mut self, batch: &Batch) -> Result<(), ModelError> {
        let noise = features_tensor::<TrainBackend>(batch.features(), &self.device);
        let labels = labels_tensor::<TrainBackend>(batch.labels(), &self.device);
        let loss = per_example_cross_entropy(self.network.forward(noise), labels).mean();

        // Only the generator's gradients reach the optimizer.
        let mut grads = loss.backward();
        let grads = GradientsParams::from_module(&mut grads, &self.network.generator);
        self.network = self
            .optimizer
            .step(self.learning_rate, self.network.clone(), grads);
        self.step_count += 1;
        Ok(())
    }

    fn step_count(&self) -> usize {
        self.step_count
    }
}
