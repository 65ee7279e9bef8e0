#![recursion_limit = "256"]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use alternating_gan::config::AppConfig;
use alternating_gan::data::RandomSampleSource;
use alternating_gan::model::GanModels;
use alternating_gan::training::snapshot::JsonSnapshotSink;
use alternating_gan::training::Trainer;

/// Train a generator/discriminator pair with loss-driven alternation.
#[derive(Parser)]
#[command(name = "train", about = "Train an alternating GAN")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "gan.toml")]
    config: PathBuf,

    /// Override number of passes
    #[arg(long)]
    passes: Option<usize>,

    /// Override iterations per pass
    #[arg(long)]
    iterations: Option<usize>,

    /// Override batch size
    #[arg(long)]
    batch_size: Option<usize>,

    /// Override the maximum consecutive turns for one model
    #[arg(long)]
    streak_cap: Option<usize>,

    /// Directory for the per-pass sample snapshots
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Seed the sample source
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    let training = &mut app_config.training;
    if let Some(passes) = cli.passes {
        training.passes = passes;
    }
    if let Some(iterations) = cli.iterations {
        training.iterations_per_pass = iterations;
    }
    if let Some(batch_size) = cli.batch_size {
        training.batch_size = batch_size;
    }
    if let Some(cap) = cli.streak_cap {
        training.streak_cap = cap;
    }
    if let Some(dir) = cli.output_dir {
        training.output_dir = dir;
    }
    if cli.seed.is_some() {
        training.seed = cli.seed;
    }
    app_config
        .validate()
        .context("validating configuration after overrides")?;

    let mut models = GanModels::build(&app_config.model).context("building models")?;
    let mut source = RandomSampleSource::new(app_config.data.real.clone(), app_config.training.seed);
    let mut sink = JsonSnapshotSink::new();

    let trainer = Trainer::new(app_config.training.clone());
    let summary = trainer
        .train_models(&mut models, &mut source, &mut sink)
        .context("training")?;

    log::info!(
        "{} iterations over {} passes, final d_loss {:.6}, g_loss {:.6}",
        summary.total_iterations,
        summary.passes.len(),
        summary.average_dis_loss,
        summary.average_gen_loss
    );
    for path in &summary.snapshots {
        log::debug!("snapshot {}", path.display());
    }
    Ok(())
}
