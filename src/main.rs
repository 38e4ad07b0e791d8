use anyhow::{Context, Result};
use building3d_sampler::io::{DatasetKind, read_config, read_dataset, write_samples};
use building3d_sampler::{FootprintOracle, GeneratorConfig, generate_dataset};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "building3d-sampler")]
#[command(about = "Generate listener/source placements inside building scans", long_about = None)]
struct Cli {
    /// Descriptor layout: mp3d or gibson
    #[arg(long, default_value = "mp3d")]
    dataset: DatasetKind,

    /// Dataset descriptor JSON file
    #[arg(short, long)]
    descriptor: PathBuf,

    /// Output JSON file for the generated samples
    #[arg(short, long)]
    output: PathBuf,

    /// Generator config JSON file (missing fields take defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Samples per room (overrides the config file)
    #[arg(long)]
    samples_per_room: Option<usize>,

    /// Probability of listener and source sharing a room (overrides the config file)
    #[arg(long)]
    prob_same_room: Option<f64>,

    /// Probability of placing the listener anywhere navigable (overrides the config file)
    #[arg(long)]
    corridor_prob: Option<f64>,

    /// Maximum sensor-to-source distance (overrides the config file)
    #[arg(long)]
    max_distance: Option<f64>,
}

impl Cli {
    fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(n) = self.samples_per_room {
            config.samples_per_room = n;
        }
        if let Some(p) = self.prob_same_room {
            config.same_room_probability = p;
        }
        if let Some(p) = self.corridor_prob {
            config.corridor_probability = p;
        }
        if let Some(d) = self.max_distance {
            config.pair.max_distance = d;
        }
        config.validate().context("Invalid generator settings")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.generator_config()?;
    let houses = read_dataset(&cli.descriptor, cli.dataset)?;

    // No simulator is attached here: navigable points come from the room footprints
    let axes = config.pair.simulator_axes;
    let results =
        generate_dataset(&houses, &config, |_, index| FootprintOracle::new(index, axes))?;

    let total: usize = results.houses.iter().map(|h| h.samples.len()).sum();
    let skipped: usize = results.houses.iter().map(|h| h.skipped).sum();
    write_samples(&cli.output, &results.houses, axes)?;
    tracing::info!(
        houses = results.houses.len(),
        failed = results.failed.len(),
        samples = total,
        skipped,
        output = %cli.output.display(),
        "Wrote samples"
    );
    Ok(())
}
