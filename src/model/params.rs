use std::collections::BTreeMap;
use std::fmt;

use burn::module::Param;
use burn::nn::Linear;
use burn::prelude::*;
use burn::tensor::TensorData;

use crate::error::ModelError;

/// Host-side copy of one parameter tensor.
///
/// Parameters move between handles by value through this type, never by
/// reference to the backing tensor.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParamValue {
    shape: Vec<usize>,
    values: Vec<f32>,
}

impl ParamValue {
    /// Test-only constructor; values otherwise come from [`ParamValue::from_tensor`].
    #[cfg(test)]
    pub(crate) fn new(shape: Vec<usize>, values: Vec<f32>) -> Self {
        assert_eq!(
            shape.iter().product::<usize>(),
            values.len(),
            "ParamValue data length does not match shape {:?}",
            shape
        );
        ParamValue { shape, values }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn from_tensor<B: Backend, const D: usize>(
        tensor: Tensor<B, D>,
    ) -> Result<Self, ModelError> {
        let shape = tensor.dims().to_vec();
        let values = tensor
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| ModelError::Backend(format!("parameter extraction: {e:?}")))?;
        Ok(ParamValue { shape, values })
    }

    pub fn to_tensor<B: Backend, const D: usize>(&self, device: &B::Device) -> Tensor<B, D> {
        Tensor::<B, D>::from_data(
            TensorData::new(self.values.clone(), self.shape.clone()),
            device,
        )
    }

    /// Fails with `ShapeMismatch` unless this value has exactly `expected` shape.
    pub fn check_shape(&self, name: &str, expected: &[usize]) -> Result<(), ModelError> {
        if self.shape != expected {
            return Err(ModelError::ShapeMismatch {
                name: name.to_string(),
                expected: expected.to_vec(),
                found: self.shape.clone(),
            });
        }
        Ok(())
    }
}

/// Name-ordered collection of parameter values exported from a handle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMap {
    entries: BTreeMap<String, ParamValue>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

}

impl fmt::Display for ParameterMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.entries {
            writeln!(f, "{} {:?}: {:?}", name, value.shape, value.values)?;
        }
        Ok(())
    }
}

/// Export `weight` and `bias` of a linear layer under `prefix`.
pub(crate) fn export_linear<B: Backend>(
    prefix: &str,
    linear: &Linear<B>,
    out: &mut ParameterMap,
) -> Result<(), ModelError> {
    out.insert(
        format!("{prefix}.weight"),
        ParamValue::from_tensor(linear.weight.val())?,
    );
    if let Some(bias) = &linear.bias {
        out.insert(format!("{prefix}.bias"), ParamValue::from_tensor(bias.val())?);
    }
    Ok(())
}

/// Overwrite one field (`weight` or `bias`) of a linear layer, keeping the
/// parameter id so optimizer state stays attached.
pub(crate) fn import_linear<B: Backend>(
    linear: &mut Linear<B>,
    field: &str,
    name: &str,
    value: &ParamValue,
) -> Result<(), ModelError> {
    match field {
        "weight" => {
            let current = linear.weight.val();
            value.check_shape(name, &current.dims())?;
            let tensor = value.to_tensor::<B, 2>(&current.device()).require_grad();
            linear.weight = Param::initialized(linear.weight.id.clone(), tensor);
            Ok(())
        }
        "bias" => {
            let bias = linear
                .bias
                .as_mut()
                .ok_or_else(|| ModelError::UnknownParameter(name.to_string()))?;
            let current = bias.val();
            value.check_shape(name, &current.dims())?;
            let tensor = value.to_tensor::<B, 1>(&current.device()).require_grad();
            *bias = Param::initialized(bias.id.clone(), tensor);
            Ok(())
        }
        _ => Err(ModelError::UnknownParameter(name.to_string())),
    }
}
