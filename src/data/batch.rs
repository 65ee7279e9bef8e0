use serde::Serialize;

/// Class id for samples drawn from the real distribution.
pub const REAL_LABEL: usize = 1;
/// Class id for samples produced by the generator.
pub const FAKE_LABEL: usize = 0;

/// Dense row-major `rows x cols` matrix of f32 values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, values: Vec<f32>) -> Self {
        assert_eq!(
            values.len(),
            rows * cols,
            "Matrix data length does not match {}x{}",
            rows,
            cols
        );
        Matrix { rows, cols, values }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix::new(rows, cols, vec![0.0; rows * cols])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn row(&self, index: usize) -> &[f32] {
        &self.values[index * self.cols..(index + 1) * self.cols]
    }

    /// Mean over every element. Zero for an empty matrix.
    pub fn mean(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.values.iter().map(|&v| v as f64).sum();
        (sum / self.values.len() as f64) as f32
    }

    /// Per-column mean.
    pub fn column_mean(&self) -> Vec<f32> {
        if self.rows == 0 {
            return vec![0.0; self.cols];
        }
        let mut sums = vec![0.0f64; self.cols];
        for r in 0..self.rows {
            for (sum, &v) in sums.iter_mut().zip(self.row(r)) {
                *sum += v as f64;
            }
        }
        sums.into_iter()
            .map(|s| (s / self.rows as f64) as f32)
            .collect()
    }

    /// Per-column population standard deviation.
    pub fn column_std(&self) -> Vec<f32> {
        if self.rows == 0 {
            return vec![0.0; self.cols];
        }
        let means = self.column_mean();
        let mut sq = vec![0.0f64; self.cols];
        for r in 0..self.rows {
            for ((acc, &v), &m) in sq.iter_mut().zip(self.row(r)).zip(&means) {
                let d = v as f64 - m as f64;
                *acc += d * d;
            }
        }
        sq.into_iter()
            .map(|s| (s / self.rows as f64).sqrt() as f32)
            .collect()
    }
}

/// Immutable feature matrix plus one class label per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    features: Matrix,
    labels: Vec<usize>,
}

impl Batch {
    pub fn new(features: Matrix, labels: Vec<usize>) -> Self {
        assert_eq!(
            features.rows(),
            labels.len(),
            "Batch needs one label per feature row"
        );
        Batch { features, labels }
    }

    /// Batch where every row carries the same label.
    pub fn uniform_label(features: Matrix, label: usize) -> Self {
        let labels = vec![label; features.rows()];
        Batch::new(features, labels)
    }

    pub fn features(&self) -> &Matrix {
        &self.features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.features.cols()
    }
}
