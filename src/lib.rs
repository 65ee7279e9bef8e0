//! # Alternating GAN
//!
//! Adversarial training of a small generator/discriminator pair where each
//! iteration trains exactly one side: whichever currently has the higher
//! loss, with a streak cap so neither side can monopolise training. Built on
//! the Burn ML framework.
//!
//! ## Modules
//!
//! - [`data`]: Batches and the sample source for real data and noise
//! - [`model`]: Networks, the `ModelHandle` abstraction and its three roles
//! - [`training`]: Scheduler, parameter sync, loss probing, trainer
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

#![recursion_limit = "256"]

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod training;
