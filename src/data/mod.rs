//! Batch containers and the sample source that feeds the training loop.

mod batch;
mod source;

pub use batch::{Batch, Matrix, FAKE_LABEL, REAL_LABEL};
pub use source::{RandomSampleSource, RealDistribution, SampleSource};
