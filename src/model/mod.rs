//! Model side of the trainer: burn networks, the handle traits the scheduler
//! drives, named parameter values, and the factory that builds the three
//! handles from configuration.

mod encoding;
mod factory;
mod handle;
pub mod handles;
pub mod networks;
mod params;
#[cfg(test)]
pub(crate) mod testing;

use burn::backend::{Autodiff, NdArray};

pub use encoding::{features_tensor, labels_tensor, per_example_cross_entropy, tensor_to_matrix};
pub use factory::{Dimensions, GanModels, LayerSpec, ModelConfig};
pub use handle::{ModelHandle, Role, TrainableHandle};
pub use handles::{DiscriminatorHandle, GeneratorHandle, SamplerHandle};
pub use params::{ParamValue, ParameterMap};

/// Backend used for forward-only evaluation and the inference generator.
pub type InferBackend = NdArray<f32>;
/// Backend used by the two handles that compute gradients.
pub type TrainBackend = Autodiff<InferBackend>;
