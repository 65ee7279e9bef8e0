use burn::module::AutodiffModule;
use burn::optim::adaptor::OptimizerAdaptor;
use burn::optim::{Adam, AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;

use crate::data::{Batch, Matrix};
use crate::error::ModelError;
use crate::model::encoding::{
    features_tensor, labels_tensor, per_example_cross_entropy, tensor_to_matrix,
};
use crate::model::networks::{Discriminator, DiscriminatorConfig};
use crate::model::{ModelHandle, ParamValue, ParameterMap, Role, TrainBackend, TrainableHandle};

/// Discriminator-training handle: classifies samples as fake (0) or real (1).
pub struct DiscriminatorHandle {
    network: Discriminator<TrainBackend>,
    optimizer: OptimizerAdaptor<Adam, Discriminator<TrainBackend>, TrainBackend>,
    learning_rate: f64,
    device: <TrainBackend as Backend>::Device,
    step_count: usize,
}

impl DiscriminatorHandle {
    pub fn new(config: &DiscriminatorConfig, learning_rate: f64) -> Self {
        let device = Default::default();
        DiscriminatorHandle {
            network: config.init(&device),
            optimizer: AdamConfig::new().init(),
            learning_rate,
            device,
            step_count: 0,
        }
    }
}

impl ModelHandle for DiscriminatorHandle {
    fn role(&self) -> Role {
        Role::DiscriminatorTraining
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

impl TrainableHandle for DiscriminatorHandle {
    fn train_step(&mut self, batch: &Batch) -> Result<(), ModelError> {
        let inputs = features_tensor::<TrainBackend>(batch.features(), &self.device);
        let labels = labels_tensor::<TrainBackend>(batch.labels(), &self.device);
        let loss = per_example_cross_entropy(self.network.forward(inputs), labels).mean();

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.network);
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
