use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

use super::split_name;
use crate::error::ModelError;
use crate::model::params::{export_linear, import_linear, ParameterMap};
use crate::model::ParamValue;

/// Name prefix of every discriminator parameter.
pub const DIS_PREFIX: &str = "dis";

/// Discriminator MLP.
///
/// ```text
/// Input:  [batch, sample_dim]
/// FC1:    sample_dim -> hidden_dim, ReLU
/// FC2:    hidden_dim -> 2  (logits: fake, real)
/// ```
#[derive(Module, Debug)]
pub struct Discriminator<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    relu: Relu,
}

#[derive(Config, Debug)]
pub struct DiscriminatorConfig {
    pub sample_dim: usize,
    pub hidden_dim: usize,
}

impl DiscriminatorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Discriminator<B> {
        Discriminator {
            fc1: LinearConfig::new(self.sample_dim, self.hidden_dim).init(device),
            fc2: LinearConfig::new(self.hidden_dim, 2).init(device),
            relu: Relu::new(),
        }
    }
}

impl<B: Backend> Discriminator<B> {
    /// Forward pass: samples [batch, sample_dim] -> logits [batch, 2].
    pub fn forward(&self, samples: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.relu.forward(self.fc1.forward(samples));
        self.fc2.forward(x)
    }

    pub fn export_parameters(&self, out: &mut ParameterMap) -> Result<(), ModelError> {
        export_linear(&format!("{DIS_PREFIX}.fc1"), &self.fc1, out)?;
        export_linear(&format!("{DIS_PREFIX}.fc2"), &self.fc2, out)
    }

    pub fn import_parameter(&mut self, name: &str, value: &ParamValue) -> Result<(), ModelError> {
        match split_name(DIS_PREFIX, name) {
            Some(("fc1", field)) => import_linear(&mut self.fc1, field, name, value),
            Some(("fc2", field)) => import_linear(&mut self.fc2, field, name, value),
            _ => Err(ModelError::UnknownParameter(name.to_string())),
        }
    }
}
