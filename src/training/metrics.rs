use std::collections::VecDeque;

use crate::training::probe::IterationLosses;
use crate::training::scheduler::{Decision, Turn};

/// Turn counts for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub pass: usize,
    pub discriminator_turns: usize,
    pub generator_turns: usize,
    /// Iterations where the streak cap overrode the loss comparison.
    pub forced_turns: usize,
}

impl PassSummary {
    pub fn iterations(&self) -> usize {
        self.discriminator_turns + self.generator_turns
    }
}

/// Training metrics tracker with rolling window computations.
pub struct TrainingMetrics {
    dis_losses: VecDeque<f32>,
    gen_losses: VecDeque<f32>,
    turns: VecDeque<Turn>,
    capacity: usize,
    total_iterations: usize, // lifetime count, never capped
    current: PassSummary,
    completed: Vec<PassSummary>,
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            dis_losses: VecDeque::with_capacity(capacity),
            gen_losses: VecDeque::with_capacity(capacity),
            turns: VecDeque::with_capacity(capacity),
            capacity,
            total_iterations: 0,
            current: PassSummary::default(),
            completed: Vec::new(),
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    pub fn record_iteration(&mut self, losses: &IterationLosses, decision: &Decision) {
        self.total_iterations += 1;
        push_capped(&mut self.dis_losses, losses.discriminator, self.capacity);
        push_capped(&mut self.gen_losses, losses.generator, self.capacity);
        push_capped(&mut self.turns, decision.turn, self.capacity);

        match decision.turn {
            Turn::Discriminator => self.current.discriminator_turns += 1,
            Turn::Generator => self.current.generator_turns += 1,
        }
        if decision.forced {
            self.current.forced_turns += 1;
        }
    }

    /// Close the running pass and start counting the next one.
    pub fn finish_pass(&mut self) -> PassSummary {
        let finished = self.current;
        self.completed.push(finished);
        self.current = PassSummary {
            pass: finished.pass + 1,
            ..Default::default()
        };
        finished
    }

    /// Average discriminator loss over the last N iterations.
    pub fn average_dis_loss(&self, last_n: usize) -> f32 {
        window_mean(&self.dis_losses, last_n)
    }

    /// Average generator loss over the last N iterations.
    pub fn average_gen_loss(&self, last_n: usize) -> f32 {
        window_mean(&self.gen_losses, last_n)
    }

    /// Fraction of the last N iterations that trained the discriminator.
    pub fn discriminator_share(&self, last_n: usize) -> f32 {
        let n = self.turns.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let dis = self
            .turns
            .iter()
            .rev()
            .take(n)
            .filter(|&&t| t == Turn::Discriminator)
            .count();
        dis as f32 / n as f32
    }

    pub fn total_iterations(&self) -> usize {
        self.total_iterations
    }

    pub fn passes(&self) -> &[PassSummary] {
        &self.completed
    }
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn push_capped<T>(buf: &mut VecDeque<T>, value: T, capacity: usize) {
    buf.push_back(value);
    if buf.len() > capacity {
        buf.pop_front();
    }
}

fn window_mean(buf: &VecDeque<f32>, last_n: usize) -> f32 {
    let n = buf.len().min(last_n);
    if n == 0 {
        return 0.0;
    }
    let sum: f32 = buf.iter().rev().take(n).sum();
    sum / n as f32
}
