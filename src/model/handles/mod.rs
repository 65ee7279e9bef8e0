//! Concrete handles for the three model roles.

mod discriminator;
mod generator;
mod sampler;

pub use discriminator::DiscriminatorHandle;
pub use generator::GeneratorHandle;
pub use sampler::SamplerHandle;
