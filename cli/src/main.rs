//! Mosaica CLI — evolve a 16x16 pixel grid toward a source image
//!
//! Loads the source image as the reference, runs the genetic algorithm and
//! writes the best candidate as an upsampled image.

use anyhow::Context;
use clap::Parser;
use comfy_table::{ContentArrangement, Table};
use mosaica::{CullPolicy, Evolution, EvolutionConfig, EvolutionResult, Fitness};
use mosaica_raster::DISPLAY_SIZE;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mosaica", version, about = "Evolve a 16x16 pixel grid toward an image")]
struct Cli {
    /// Source image (any format the image backend can decode)
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the best candidate
    #[arg(short, long, default_value = "mosaica_out.png")]
    output: PathBuf,

    /// YAML file with run parameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long, env = "MOSAICA_SEED")]
    seed: Option<u64>,

    /// Generation ceiling
    #[arg(long)]
    max_epochs: Option<u64>,

    /// Stop once the tracked score is at or below this
    #[arg(long)]
    desired_fitness: Option<Fitness>,

    /// Candidates per generation
    #[arg(long)]
    population_size: Option<usize>,

    /// Which ranks survive each cull
    #[arg(long, value_enum)]
    cull_policy: Option<PolicyArg>,

    /// Edge length of the written image
    #[arg(long, default_value_t = DISPLAY_SIZE)]
    scale: u32,

    /// Print per-generation progress
    #[arg(short, long)]
    verbose: bool,

    /// With --verbose, print every Nth generation
    #[arg(long, default_value_t = 1)]
    report_every: u64,

    /// Summary format
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum PolicyArg {
    OffsetWindow,
    DropWorst,
}

impl From<PolicyArg> for CullPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::OffsetWindow => CullPolicy::OffsetWindow,
            PolicyArg::DropWorst => CullPolicy::DropWorst,
        }
    }
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli)?;
    let reference = mosaica_raster::load_reference(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let evolution = Evolution::new(config, reference, rng)?;
    let verbose = cli.verbose;
    let every = cli.report_every.max(1);
    let result = evolution.run_with(|report| {
        if verbose && report.generation % every == 0 {
            println!("Epoch: {}, Best fitness: {}", report.generation, report.tracked_score);
        }
    });

    mosaica_raster::save_candidate(&result.best, &cli.output, cli.scale)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(
        output = %cli.output.display(),
        scale = cli.scale,
        best_fitness = result.best_fitness,
        "wrote best candidate"
    );

    print_summary(&result, &cli.output, &cli.format)
}

/// Defaults, then the YAML file, then explicit flags
fn resolve_config(cli: &Cli) -> anyhow::Result<EvolutionConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => EvolutionConfig::default(),
    };

    if let Some(max_epochs) = cli.max_epochs {
        config.max_epochs = max_epochs;
    }
    if let Some(desired) = cli.desired_fitness {
        config.desired_fitness = desired;
    }
    if let Some(size) = cli.population_size {
        config.population_size = size;
    }
    if let Some(policy) = cli.cull_policy {
        config.cull_policy = policy.into();
    }

    config.validate()?;
    Ok(config)
}

fn load_config_file(path: &Path) -> anyhow::Result<EvolutionConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

fn print_summary(result: &EvolutionResult, output: &Path, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "state": result.state,
                "generations": result.generations,
                "tracked_score": result.tracked_score,
                "best_fitness": result.best_fitness,
                "output": output.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Field", "Value"]);
            table.add_row(vec!["State".to_string(), format!("{:?}", result.state)]);
            table.add_row(vec!["Generations".to_string(), result.generations.to_string()]);
            table.add_row(vec!["Tracked score".to_string(), result.tracked_score.to_string()]);
            table.add_row(vec!["Best fitness".to_string(), result.best_fitness.to_string()]);
            table.add_row(vec!["Output".to_string(), output.display().to_string()]);
            println!("{}", table);
        }
    }
    Ok(())
}
