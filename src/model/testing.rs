//! In-memory handle doubles for exercising the scheduler and synchronizer
//! without a numeric backend.

use std::cell::RefCell;
use std::rc::Rc;

use crate::data::{Batch, Matrix};
use crate::error::ModelError;
use crate::model::{ModelHandle, ParamValue, ParameterMap, Role, TrainableHandle};

/// Shared, ordered record of calls made across several fake handles.
pub(crate) type CallLog = Rc<RefCell<Vec<String>>>;

pub(crate) fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub(crate) struct FakeHandle {
    role: Role,
    params: ParameterMap,
    /// Constant per-example cost returned by `forward`.
    cost: f32,
    log: CallLog,
    steps: usize,
    fail_training: bool,
}

impl FakeHandle {
    pub(crate) fn new(role: Role, log: &CallLog) -> Self {
        FakeHandle {
            role,
            params: ParameterMap::new(),
            cost: 0.0,
            log: log.clone(),
            steps: 0,
            fail_training: false,
        }
    }

    pub(crate) fn with_param(mut self, name: &str, shape: Vec<usize>, fill: f32) -> Self {
        let len = shape.iter().product();
        self.params.insert(name, ParamValue::new(shape, vec![fill; len]));
        self
    }

    pub(crate) fn with_cost(mut self, cost: f32) -> Self {
        self.cost = cost;
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.fail_training = true;
        self
    }

    pub(crate) fn param(&self, name: &str) -> &ParamValue {
        self.params.get(name).expect("fake parameter exists")
    }

    /// Add `delta` to every element of every parameter, simulating an update.
    fn bump(&mut self, delta: f32) {
        let bumped: Vec<(String, ParamValue)> = self
            .params
            .iter()
            .map(|(name, v)| {
                let values = v.values().iter().map(|x| x + delta).collect();
                (name.to_string(), ParamValue::new(v.shape().to_vec(), values))
            })
            .collect();
        for (name, value) in bumped {
            self.params.insert(name, value);
        }
    }
}

impl ModelHandle for FakeHandle {
    fn role(&self) -> Role {
        self.role
    }

    fn forward(&self, batch: &Batch) -> Result<Matrix, ModelError> {
        self.log.borrow_mut().push(format!("forward {}", self.role));
        Ok(Matrix::new(batch.len(), 1, vec![self.cost; batch.len()]))
    }

    fn parameters(&self) -> Result<ParameterMap, ModelError> {
        Ok(self.params.clone())
    }

    fn set_parameter(&mut self, name: &str, value: &ParamValue) -> Result<(), ModelError> {
        let current = self
            .params
            .get(name)
            .ok_or_else(|| ModelError::UnknownParameter(name.to_string()))?;
        value.check_shape(name, current.shape())?;
        self.params.insert(name, value.clone());
        self.log
            .borrow_mut()
            .push(format!("set {} {}", self.role, name));
        Ok(())
    }
}

impl TrainableHandle for FakeHandle {
    fn train_step(&mut self, batch: &Batch) -> Result<(), ModelError> {
        if self.fail_training {
            return Err(ModelError::Backend("injected failure".into()));
        }
        let label = batch.labels().first().copied().unwrap_or_default();
        self.log
            .borrow_mut()
            .push(format!("train {} label={}", self.role, label));
        self.bump(1.0);
        self.steps += 1;
        Ok(())
    }

    fn step_count(&self) -> usize {
        self.steps
    }
}
