use burn::prelude::*;
use burn::tensor::activation::log_softmax;
use burn::tensor::TensorData;

use crate::data::Matrix;
use crate::error::ModelError;

/// Encode a feature matrix as a `[rows, cols]` float tensor.
pub fn features_tensor<B: Backend>(matrix: &Matrix, device: &B::Device) -> Tensor<B, 2> {
    Tensor::<B, 2>::from_data(
        TensorData::new(matrix.values().to_vec(), [matrix.rows(), matrix.cols()]),
        device,
    )
}

/// Encode class labels as a `[n]` int tensor.
pub fn labels_tensor<B: Backend>(labels: &[usize], device: &B::Device) -> Tensor<B, 1, Int> {
    let ids: Vec<i64> = labels.iter().map(|&l| l as i64).collect();
    Tensor::<B, 1, Int>::from_data(TensorData::new(ids, [labels.len()]), device)
}

/// Copy a `[rows, cols]` tensor back to the host.
pub fn tensor_to_matrix<B: Backend>(tensor: Tensor<B, 2>) -> Result<Matrix, ModelError> {
    let [rows, cols] = tensor.dims();
    let values = tensor
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| ModelError::Backend(format!("tensor extraction: {e:?}")))?;
    Ok(Matrix::new(rows, cols, values))
}

/// Softmax cross-entropy per example: `[n, classes]` logits -> `[n, 1]` costs.
pub fn per_example_cross_entropy<B: Backend>(
    logits: Tensor<B, 2>,
    labels: Tensor<B, 1, Int>,
) -> Tensor<B, 2> {
    let [n] = labels.dims();
    let log_probs = log_softmax(logits, 1);
    log_probs.gather(1, labels.reshape([n as i32, 1])).neg()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InferBackend;

    #[test]
    fn test_matrix_round_trip_through_tensor() {
        let device = Default::default();
        let m = Matrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = features_tensor::<InferBackend>(&m, &device);
        assert_eq!(t.dims(), [2, 3]);
        assert_eq!(tensor_to_matrix(t).unwrap(), m);
    }

    #[test]
    fn test_cross_entropy_uniform_logits_is_ln2() {
        let device = Default::default();
        let logits = Tensor::<InferBackend, 2>::zeros([3, 2], &device);
        let labels = labels_tensor::<InferBackend>(&[0, 1, 1], &device);
        let costs = tensor_to_matrix(per_example_cross_entropy(logits, labels)).unwrap();
        assert_eq!((costs.rows(), costs.cols()), (3, 1));
        for &c in costs.values() {
            assert!((c - std::f32::consts::LN_2).abs() < 1e-5, "cost {}", c);
        }
    }

    #[test]
    fn test_cross_entropy_rewards_confident_correct_class() {
        let device = Default::default();
        let m = Matrix::new(2, 2, vec![0.0, 5.0, 0.0, 5.0]);
        let logits = features_tensor::<InferBackend>(&m, &device);
        let labels = labels_tensor::<InferBackend>(&[1, 0], &device);
        let costs = tensor_to_matrix(per_example_cross_entropy(logits, labels)).unwrap();
        assert!(costs.values()[0] < 0.01);
        assert!(costs.values()[1] > 4.9);
    }
}
