use std::fmt;

use crate::data::{Batch, Matrix};
use crate::error::ModelError;
use crate::model::params::{ParamValue, ParameterMap};

/// Which job a model instance does in the training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    GeneratorTraining,
    DiscriminatorTraining,
    GeneratorInference,
}

impl Role {
    pub fn tag(self) -> &'static str {
        match self {
            Role::GeneratorTraining => "generator-training",
            Role::DiscriminatorTraining => "discriminator-training",
            Role::GeneratorInference => "generator-inference",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A model instance the orchestrator can evaluate and inspect.
pub trait ModelHandle {
    fn role(&self) -> Role;

    /// Forward-only evaluation; never updates weights.
    ///
    /// Training handles return the `[n, 1]` per-example cost of the batch;
    /// the inference generator returns the generated `[n, sample_dim]` samples.
    fn forward(&self, batch: &Batch) -> Result<Matrix, ModelError>;

    /// Value copy of every named parameter.
    fn parameters(&self) -> Result<ParameterMap, ModelError>;

    /// Overwrite one named parameter. Fails with `ShapeMismatch` when the
    /// shapes differ and `UnknownParameter` when the name is not owned.
    fn set_parameter(&mut self, name: &str, value: &ParamValue) -> Result<(), ModelError>;
}

/// A model handle that can take gradient steps.
pub trait TrainableHandle: ModelHandle {
    /// One optimizer step on `batch`.
    fn train_step(&mut self, batch: &Batch) -> Result<(), ModelError>;

    /// Number of optimizer steps taken so far.
    fn step_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tags() {
        assert_eq!(Role::GeneratorTraining.tag(), "generator-training");
        assert_eq!(Role::DiscriminatorTraining.tag(), "discriminator-training");
        assert_eq!(Role::GeneratorInference.to_string(), "generator-inference");
    }
}
