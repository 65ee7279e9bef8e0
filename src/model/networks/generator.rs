use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

use super::discriminator::{Discriminator, DiscriminatorConfig};
use super::split_name;
use crate::error::ModelError;
use crate::model::params::{export_linear, import_linear, ParameterMap};
use crate::model::ParamValue;

/// Name prefix of every generator parameter.
pub const GEN_PREFIX: &str = "gen";

/// Generator MLP.
///
/// ```text
/// Input:  [batch, noise_dim]
/// FC1:    noise_dim -> hidden_dim, ReLU
/// FC2:    hidden_dim -> sample_dim
/// ```
#[derive(Module, Debug)]
pub struct Generator<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    relu: Relu,
}

#[derive(Config, Debug)]
pub struct GeneratorConfig {
    pub noise_dim: usize,
    pub hidden_dim: usize,
    pub sample_dim: usize,
}

impl GeneratorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Generator<B> {
        Generator {
            fc1: LinearConfig::new(self.noise_dim, self.hidden_dim).init(device),
            fc2: LinearConfig::new(self.hidden_dim, self.sample_dim).init(device),
            relu: Relu::new(),
        }
    }
}

impl<B: Backend> Generator<B> {
    /// Forward pass: noise [batch, noise_dim] -> samples [batch, sample_dim].
    pub fn forward(&self, noise: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.relu.forward(self.fc1.forward(noise));
        self.fc2.forward(x)
    }

    pub fn export_parameters(&self, out: &mut ParameterMap) -> Result<(), ModelError> {
        export_linear(&format!("{GEN_PREFIX}.fc1"), &self.fc1, out)?;
        export_linear(&format!("{GEN_PREFIX}.fc2"), &self.fc2, out)
    }

    pub fn import_parameter(&mut self, name: &str, value: &ParamValue) -> Result<(), ModelError> {
        match split_name(GEN_PREFIX, name) {
            Some(("fc1", field)) => import_linear(&mut self.fc1, field, name, value),
            Some(("fc2", field)) => import_linear(&mut self.fc2, field, name, value),
            _ => Err(ModelError::UnknownParameter(name.to_string())),
        }
    }
}

/// Generator stacked on the discriminator, used to train the generator
/// against the discriminator's current judgement.
#[derive(Module, Debug)]
pub struct GeneratorTrainingNet<B: Backend> {
    pub generator: Generator<B>,
    pub discriminator: Discriminator<B>,
}

impl<B: Backend> GeneratorTrainingNet<B> {
    pub fn new(
        generator: &GeneratorConfig,
        discriminator: &DiscriminatorConfig,
        device: &B::Device,
    ) -> Self {
        GeneratorTrainingNet {
            generator: generator.init(device),
            discriminator: discriminator.init(device),
        }
    }

    /// Forward pass: noise [batch, noise_dim] -> discriminator logits [batch, 2].
    pub fn forward(&self, noise: Tensor<B, 2>) -> Tensor<B, 2> {
        self.discriminator.forward(self.generator.forward(noise))
    }

    pub fn export_parameters(&self, out: &mut ParameterMap) -> Result<(), ModelError> {
        self.generator.export_parameters(out)?;
        self.discriminator.export_parameters(out)
    }

    pub fn import_parameter(&mut self, name: &str, value: &ParamValue) -> Result<(), ModelError> {
        if split_name(GEN_PREFIX, name).is_some() {
            self.generator.import_parameter(name, value)
        } else {
            self.discriminator.import_parameter(name, value)
        }
    }
}
