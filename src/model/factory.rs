use crate::error::ConfigError;
use crate::model::handles::{DiscriminatorHandle, GeneratorHandle, SamplerHandle};
use crate::model::networks::{DiscriminatorConfig, GeneratorConfig};

/// Name of the layer whose size is the generator's noise dimension.
pub const NOISE_LAYER: &str = "noise";
/// Name of the layer whose size is the sample dimension.
pub const SAMPLE_LAYER: &str = "sample";

/// A named layer size.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerSpec {
    pub name: String,
    pub size: usize,
}

/// Network topology and optimizer settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub layers: Vec<LayerSpec>,
    pub hidden_dim: usize,
    pub generator_lr: f64,
    pub discriminator_lr: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            layers: vec![
                LayerSpec {
                    name: NOISE_LAYER.to_string(),
                    size: 10,
                },
                LayerSpec {
                    name: SAMPLE_LAYER.to_string(),
                    size: 2,
                },
            ],
            hidden_dim: 64,
            generator_lr: 1e-3,
            discriminator_lr: 1e-3,
        }
    }
}

impl ModelConfig {
    /// Size of the layer called `name`.
    pub fn layer_size(&self, name: &str) -> Result<usize, ConfigError> {
        self.layers
            .iter()
            .find(|layer| layer.name == name)
            .map(|layer| layer.size)
            .ok_or_else(|| ConfigError::MissingLayer(name.to_string()))
    }

    pub fn dimensions(&self) -> Result<Dimensions, ConfigError> {
        Ok(Dimensions {
            noise: self.layer_size(NOISE_LAYER)?,
            sample: self.layer_size(SAMPLE_LAYER)?,
        })
    }
}

/// Input sizes resolved from the layer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub noise: usize,
    pub sample: usize,
}

/// The three handles of one training run.
pub struct GanModels {
    pub discriminator: DiscriminatorHandle,
    pub generator: GeneratorHandle,
    pub sampler: SamplerHandle,
    pub dims: Dimensions,
}

impl GanModels {
    pub fn build(config: &ModelConfig) -> Result<Self, ConfigError> {
        let dims = config.dimensions()?;
        let gen_config = GeneratorConfig::new(dims.noise, config.hidden_dim, dims.sample);
        let dis_config = DiscriminatorConfig::new(dims.sample, config.hidden_dim);

        Ok(GanModels {
            discriminator: DiscriminatorHandle::new(&dis_config, config.discriminator_lr),
            generator: GeneratorHandle::new(&gen_config, &dis_config, config.generator_lr),
            sampler: SamplerHandle::new(&gen_config),
            dims,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelHandle;

    #[test]
    fn test_layer_lookup() {
        let config = ModelConfig::default();
        assert_eq!(config.layer_size("noise").unwrap(), 10);
        assert_eq!(config.layer_size("sample").unwrap(), 2);
        assert!(matches!(
            config.layer_size("hidden"),
            Err(ConfigError::MissingLayer(name)) if name == "hidden"
        ));
    }

    #[test]
    fn test_build_fails_without_noise_layer() {
        let config = ModelConfig {
            layers: vec![LayerSpec {
                name: "sample".into(),
                size: 2,
            }],
            ..Default::default()
        };
        assert!(matches!(
            GanModels::build(&config),
            Err(ConfigError::MissingLayer(name)) if name == "noise"
        ));
    }

    #[test]
    fn test_build_shares_parameter_names() {
        let models = GanModels::build(&ModelConfig {
            hidden_dim: 8,
            ..Default::default()
        })
        .unwrap();
        let gen = models.generator.parameters().unwrap();
        let dis = models.discriminator.parameters().unwrap();
        let sampler = models.sampler.parameters().unwrap();

        for (name, value) in dis.iter() {
            assert_eq!(gen.get(name).map(|v| v.shape()), Some(value.shape()));
        }
        for (name, value) in sampler.iter() {
            assert_eq!(gen.get(name).map(|v| v.shape()), Some(value.shape()));
        }
        assert_eq!(gen.names().count(), dis.names().count() + sampler.names().count());
    }
}
