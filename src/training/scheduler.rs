//! Loss-driven alternation between discriminator and generator training.
//!
//! Each iteration the model with the higher loss gets the training step,
//! except that neither model may be chosen more than `cap` times in a row.

use std::fmt;

use crate::error::ModelError;
use crate::model::{ModelHandle, TrainableHandle};
use crate::training::batches::IterationBatches;
use crate::training::sync::sync;

/// Default maximum number of consecutive turns for one model.
pub const DEFAULT_STREAK_CAP: usize = 5;

/// The model that receives a training step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Generator,
    Discriminator,
}

impl Turn {
    pub fn name(self) -> &'static str {
        match self {
            Turn::Generator => "gen",
            Turn::Discriminator => "dis",
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Streak bookkeeping carried from one decision to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerState {
    last_trained: Option<Turn>,
    streak: usize,
    cap: usize,
}

impl SchedulerState {
    /// Fresh state: nothing trained yet.
    pub fn new(cap: usize) -> Self {
        SchedulerState {
            last_trained: None,
            streak: 0,
            cap,
        }
    }

    /// State with an existing streak.
    pub fn with_streak(cap: usize, last_trained: Turn, streak: usize) -> Self {
        SchedulerState {
            last_trained: Some(last_trained),
            streak,
            cap,
        }
    }

    pub fn last_trained(&self) -> Option<Turn> {
        self.last_trained
    }

    pub fn streak(&self) -> usize {
        self.streak
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// True once `turn` has used up its consecutive allowance.
    fn exhausted(&self, turn: Turn) -> bool {
        self.last_trained == Some(turn) && self.streak == self.cap
    }

    fn advance(self, turn: Turn) -> SchedulerState {
        if self.last_trained == Some(turn) {
            SchedulerState {
                streak: self.streak + 1,
                ..self
            }
        } else {
            SchedulerState {
                last_trained: Some(turn),
                streak: 1,
                ..self
            }
        }
    }
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self::new(DEFAULT_STREAK_CAP)
    }
}

/// Outcome of one scheduling decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub turn: Turn,
    /// The streak cap overrode the loss comparison.
    pub forced: bool,
    /// State to carry into the next decision.
    pub state: SchedulerState,
}

/// Choose which model trains this iteration.
///
/// The discriminator is chosen when its loss is strictly higher than the
/// generator's, unless one side has exhausted its streak: an exhausted
/// discriminator must yield to the generator, an exhausted generator must
/// yield to the discriminator. Ties (and NaN comparisons) go to the generator.
pub fn decide(state: SchedulerState, dis_loss: f32, gen_loss: f32) -> Decision {
    let force_gen_turn = state.exhausted(Turn::Discriminator);
    let force_dis_override = state.exhausted(Turn::Generator);
    let prefers_dis = dis_loss > gen_loss;

    let turn = if !force_gen_turn && (force_dis_override || prefers_dis) {
        Turn::Discriminator
    } else {
        Turn::Generator
    };
    let forced = (force_gen_turn && prefers_dis) || (force_dis_override && !prefers_dis);

    Decision {
        turn,
        forced,
        state: state.advance(turn),
    }
}

/// The three handles a decision acts on.
pub struct HandleSet<'a> {
    pub discriminator: &'a mut dyn TrainableHandle,
    pub generator: &'a mut dyn TrainableHandle,
    pub sampler: &'a mut dyn ModelHandle,
}

/// Carry out `turn`: one training step on the chosen model, then propagate
/// its parameters to the handles that share them.
///
/// A discriminator turn trains on the negative batch first, then the positive
/// batch, and copies the result into the generator-training handle. A
/// generator turn trains on the generator batch and copies the result into
/// both the discriminator-training and the inference handles.
pub fn apply(
    turn: Turn,
    handles: &mut HandleSet<'_>,
    batches: &IterationBatches,
) -> Result<(), ModelError> {
    match turn {
        Turn::Discriminator => {
            handles.discriminator.train_step(&batches.negative)?;
            handles.discriminator.train_step(&batches.positive)?;
            sync(&*handles.discriminator, &mut *handles.generator)?;
        }
        Turn::Generator => {
            handles.generator.train_step(&batches.generator)?;
            sync(&*handles.generator, &mut *handles.discriminator)?;
            sync(&*handles.generator, &mut *handles.sampler)?;
        }
    }
    Ok(())
}

/// Owns the scheduler state for a run and drives decide-then-apply.
#[derive(Debug, Clone)]
pub struct AlternationScheduler {
    state: SchedulerState,
}

impl AlternationScheduler {
    pub fn new(cap: usize) -> Self {
        AlternationScheduler {
            state: SchedulerState::new(cap),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Decide, train the chosen model and synchronize. State only advances
    /// when the whole step succeeds.
    pub fn step(
        &mut self,
        dis_loss: f32,
        gen_loss: f32,
        handles: &mut HandleSet<'_>,
        batches: &IterationBatches,
    ) -> Result<Decision, ModelError> {
        let decision = decide(self.state, dis_loss, gen_loss);
        apply(decision.turn, handles, batches)?;
        self.state = decision.state;
        Ok(decision)
    }
}
