use std::fs;
use std::path::{Path, PathBuf};

use crate::data::SampleSource;
use crate::error::TrainingError;
use crate::model::{Dimensions, GanModels, ModelHandle};
use crate::training::batches::{fake_batch, IterationBatches};
use crate::training::metrics::{PassSummary, TrainingMetrics};
use crate::training::probe::probe_iteration;
use crate::training::scheduler::{AlternationScheduler, HandleSet, SchedulerState, DEFAULT_STREAK_CAP};
use crate::training::snapshot::{snapshot_path, SampleSink};
use crate::training::sync::sync;

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Rows per batch, and rows sampled at the end of each pass.
    pub batch_size: usize,
    pub passes: usize,
    pub iterations_per_pass: usize,
    /// Maximum consecutive turns for one model.
    pub streak_cap: usize,
    /// Log losses when the iteration index is a multiple of this.
    pub log_interval: usize,
    /// Where the per-pass sample artifacts go.
    pub output_dir: PathBuf,
    /// Seed for the sample source; entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            batch_size: 128,
            passes: 100,
            iterations_per_pass: 1000,
            streak_cap: DEFAULT_STREAK_CAP,
            log_interval: 1000,
            output_dir: PathBuf::from("."),
            seed: None,
        }
    }
}

/// What a completed run reports back.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub passes: Vec<PassSummary>,
    pub total_iterations: usize,
    pub final_state: SchedulerState,
    /// Rolling averages over the last `log_interval` iterations.
    pub average_dis_loss: f32,
    pub average_gen_loss: f32,
    /// Fraction of the same window spent training the discriminator.
    pub discriminator_share: f32,
    pub snapshots: Vec<PathBuf>,
}

/// Alternating GAN trainer.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    /// Train the handles of a freshly built [`GanModels`].
    pub fn train_models(
        &self,
        models: &mut GanModels,
        source: &mut dyn SampleSource,
        sink: &mut dyn SampleSink,
    ) -> Result<RunSummary, TrainingError> {
        let dims = models.dims;
        let mut handles = HandleSet {
            discriminator: &mut models.discriminator,
            generator: &mut models.generator,
            sampler: &mut models.sampler,
        };
        self.train(&mut handles, dims, source, sink)
    }

    /// Run the full training loop.
    ///
    /// The generator-training parameters are first copied into the other two
    /// handles. Every iteration then draws fresh batches, probes both losses
    /// and lets the scheduler train one side. After each pass the inference
    /// generator's samples go to `sink`.
    pub fn train(
        &self,
        handles: &mut HandleSet<'_>,
        dims: Dimensions,
        source: &mut dyn SampleSource,
        sink: &mut dyn SampleSink,
    ) -> Result<RunSummary, TrainingError> {
        let cfg = &self.config;
        ensure_dir(&cfg.output_dir)?;

        sync(&*handles.generator, &mut *handles.discriminator)?;
        sync(&*handles.generator, &mut *handles.sampler)?;
        dump_parameters(&*handles.discriminator)?;
        dump_parameters(&*handles.generator)?;
        dump_parameters(&*handles.sampler)?;

        let mut scheduler = AlternationScheduler::new(cfg.streak_cap);
        let mut metrics = TrainingMetrics::with_capacity(cfg.log_interval.max(1));
        let mut snapshots = Vec::with_capacity(cfg.passes);

        log::info!(
            "Starting training: {} passes x {} iterations, batch {}, streak cap {}",
            cfg.passes,
            cfg.iterations_per_pass,
            cfg.batch_size,
            cfg.streak_cap
        );

        for pass in 0..cfg.passes {
            for i in 0..cfg.iterations_per_pass {
                let batches =
                    IterationBatches::assemble(source, &*handles.sampler, cfg.batch_size, dims)?;
                let losses =
                    probe_iteration(&*handles.discriminator, &*handles.generator, &batches)?;

                if !losses.is_finite() {
                    log::warn!(
                        "pass {} iteration {}: non-finite loss (d_loss {}, g_loss {})",
                        pass,
                        i,
                        losses.discriminator,
                        losses.generator
                    );
                }
                if cfg.log_interval > 0 && i % cfg.log_interval == 0 {
                    log::info!(
                        "pass {} iteration {} | d_loss {:.6} | g_loss {:.6}",
                        pass,
                        i,
                        losses.discriminator,
                        losses.generator
                    );
                }

                let decision = scheduler.step(
                    losses.discriminator,
                    losses.generator,
                    handles,
                    &batches,
                )?;
                log::debug!(
                    "pass {} iteration {}: trained {}{} (streak {})",
                    pass,
                    i,
                    decision.turn,
                    if decision.forced { ", forced" } else { "" },
                    decision.state.streak()
                );
                metrics.record_iteration(&losses, &decision);
            }

            let summary = metrics.finish_pass();
            log::info!(
                "pass {} done | dis turns {} | gen turns {} | forced {} | avg d_loss {:.6} | avg g_loss {:.6} | recent dis share {:.1}%",
                pass,
                summary.discriminator_turns,
                summary.generator_turns,
                summary.forced_turns,
                metrics.average_dis_loss(cfg.log_interval),
                metrics.average_gen_loss(cfg.log_interval),
                metrics.discriminator_share(cfg.log_interval) * 100.0
            );

            let samples = fake_batch(source, &*handles.sampler, cfg.batch_size, dims.noise)?;
            let path = snapshot_path(&cfg.output_dir, pass, sink.extension());
            sink.consume(pass, samples.features(), &path)?;
            snapshots.push(path);
        }

        log::info!(
            "Training complete. Total iterations: {}",
            metrics.total_iterations()
        );

        Ok(RunSummary {
            passes: metrics.passes().to_vec(),
            total_iterations: metrics.total_iterations(),
            final_state: scheduler.state(),
            average_dis_loss: metrics.average_dis_loss(cfg.log_interval),
            average_gen_loss: metrics.average_gen_loss(cfg.log_interval),
            discriminator_share: metrics.discriminator_share(cfg.log_interval),
            snapshots,
        })
    }
}

fn ensure_dir(dir: &Path) -> Result<(), TrainingError> {
    fs::create_dir_all(dir).map_err(|e| TrainingError::OutputDir {
        path: dir.to_path_buf(),
        source: e,
    })
}

fn dump_parameters<M: ModelHandle + ?Sized>(handle: &M) -> Result<(), TrainingError> {
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("{} parameters:\n{}", handle.role(), handle.parameters()?);
    }
    Ok(())
}
