use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::Matrix;
use crate::error::TrainingError;

/// Receives the generated samples at the end of every pass.
pub trait SampleSink {
    /// File extension used for the per-pass artifact.
    fn extension(&self) -> &str;

    fn consume(&mut self, pass: usize, samples: &Matrix, path: &Path) -> Result<(), TrainingError>;
}

/// `<dir>/train_pass<pass>.<ext>`
pub fn snapshot_path(dir: &Path, pass: usize, extension: &str) -> PathBuf {
    dir.join(format!("train_pass{pass}.{extension}"))
}

/// On-disk form of one pass's samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSnapshot {
    pub pass: usize,
    /// Per-column mean.
    pub mean: Vec<f32>,
    /// Per-column population standard deviation.
    pub std: Vec<f32>,
    pub samples: Vec<Vec<f32>>,
}

impl SampleSnapshot {
    pub fn from_matrix(pass: usize, samples: &Matrix) -> Self {
        SampleSnapshot {
            pass,
            mean: samples.column_mean(),
            std: samples.column_std(),
            samples: (0..samples.rows())
                .map(|r| samples.row(r).to_vec())
                .collect(),
        }
    }
}

/// Writes each pass as pretty-printed JSON and logs its summary statistics.
#[derive(Debug, Default)]
pub struct JsonSnapshotSink;

impl JsonSnapshotSink {
    pub fn new() -> Self {
        JsonSnapshotSink
    }
}

impl SampleSink for JsonSnapshotSink {
    fn extension(&self) -> &str {
        "json"
    }

    fn consume(&mut self, pass: usize, samples: &Matrix, path: &Path) -> Result<(), TrainingError> {
        let snapshot = SampleSnapshot::from_matrix(pass, samples);
        log::info!(
            "pass {} samples: mean {:?} std {:?}",
            pass,
            snapshot.mean,
            snapshot.std
        );

        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json).map_err(|e| TrainingError::Sink {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_path_format() {
        let path = snapshot_path(Path::new("out"), 7, "json");
        assert_eq!(path, PathBuf::from("out/train_pass7.json"));
    }

    #[test]
    fn test_snapshot_statistics() {
        let samples = Matrix::new(2, 2, vec![1.0, 10.0, 3.0, 10.0]);
        let snapshot = SampleSnapshot::from_matrix(3, &samples);
        assert_eq!(snapshot.pass, 3);
        assert_eq!(snapshot.mean, vec![2.0, 10.0]);
        assert!((snapshot.std[0] - 1.0).abs() < 1e-6);
        assert!(snapshot.std[1].abs() < 1e-6);
        assert_eq!(snapshot.samples, vec![vec![1.0, 10.0], vec![3.0, 10.0]]);
    }

    #[test]
    fn test_json_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonSnapshotSink::new();
        let path = snapshot_path(dir.path(), 0, sink.extension());

        sink.consume(0, &Matrix::new(1, 2, vec![0.5, -0.5]), &path)
            .unwrap();

        let written: SampleSnapshot =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.samples, vec![vec![0.5, -0.5]]);
    }

    #[test]
    fn test_json_sink_missing_directory_is_sink_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("train_pass0.json");
        let mut sink = JsonSnapshotSink::new();

        let err = sink.consume(0, &Matrix::zeros(1, 1), &path).unwrap_err();
        match err {
            TrainingError::Sink { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Sink error, got {other:?}"),
        }
    }
}
