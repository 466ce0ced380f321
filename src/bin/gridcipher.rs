//! Build a cipher grid from the command line and print it with its keys.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use grid_cipher::{
    visualize, Algorithm, CipherConfig, Encoder, GridBuilder, Key, KeyRegistry, Matrix, Request,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Hide messages in grids of random letters")]
struct Cli {
    /// TOML file with grid and key settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Grid width, overriding the config file
    #[arg(long)]
    columns: Option<usize>,
    /// Grid height, overriding the config file
    #[arg(long)]
    rows: Option<usize>,
    /// Seed for a reproducible grid
    #[arg(long)]
    seed: Option<u64>,
    /// Print the lock map after placing
    #[arg(long)]
    show_locks: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place messages with explicit algorithms and optional preset keys
    Encode(EncodeArgs),
    /// Issue fresh key pools and search them for a combination that fits
    Build(BuildArgs),
}

#[derive(Args, Debug)]
struct EncodeArgs {
    message: String,
    #[arg(long, default_value = "row")]
    algorithm: Algorithm,
    /// Preset key, e.g. `1,2,0,4`; generated when absent
    #[arg(long)]
    key: Option<Key>,
    #[arg(long)]
    secondary: Option<String>,
    #[arg(long, default_value = "skip")]
    secondary_algorithm: Algorithm,
    #[arg(long)]
    secondary_key: Option<Key>,
    /// Print which cells each key reads
    #[arg(long)]
    show_trail: bool,
}

#[derive(Args, Debug)]
struct BuildArgs {
    primary: String,
    #[arg(long)]
    secondary: Option<String>,
    /// Keys issued to each group for every algorithm
    #[arg(long, default_value_t = 4)]
    keys_per_algorithm: usize,
}

fn load_config(cli: &Cli) -> Result<CipherConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config toml contents")?
        }
        None => CipherConfig::default(),
    };
    if let Some(columns) = cli.columns {
        config.columns = columns;
    }
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    Ok(config)
}

fn encode(config: &CipherConfig, args: &EncodeArgs, rng: &mut StdRng) -> Result<Matrix> {
    let mut matrix = Matrix::random(config.columns, config.rows, &config.alphabet()?, rng);

    let mut placed = vec![(args.algorithm, &args.message, args.key.as_ref())];
    if let Some(secondary) = &args.secondary {
        placed.push((args.secondary_algorithm, secondary, args.secondary_key.as_ref()));
    }

    let mut keys = Vec::new();
    for (algorithm, message, preset) in placed {
        let encoder = Encoder::new(algorithm).with_max_skip(config.max_skip);
        let key = encoder
            .encode(&mut matrix, message, preset, rng)
            .with_context(|| format!("failed to place \"{message}\" with {algorithm}"))?;
        keys.push((encoder, key));
    }

    println!("{matrix}\n");
    for (encoder, key) in &keys {
        println!(
            "{} key [{key}] reads: {}",
            encoder.algorithm(),
            encoder.decode(&matrix, key)?
        );
        if args.show_trail {
            println!("{}\n", visualize::trail(&matrix, encoder, key)?);
        }
    }
    Ok(matrix)
}

fn build(config: &CipherConfig, args: &BuildArgs, rng: &mut StdRng) -> Result<Matrix> {
    let mut registry = KeyRegistry::new();
    for group in ["primary", "secondary"] {
        registry.add_group(group)?;
        for algorithm in Algorithm::ALL {
            for _ in 0..args.keys_per_algorithm {
                registry.issue(group, algorithm, config, rng)?;
            }
        }
    }

    let primary = Request::for_group(&registry, "primary", &args.primary)?;
    let secondary = args
        .secondary
        .as_deref()
        .map(|message| Request::for_group(&registry, "secondary", message))
        .transpose()?;

    let built = GridBuilder::new(config.clone())?
        .build(primary, secondary, rng)
        .context("no issued key could place the messages")?;

    println!("{}\n", built.matrix);
    for candidate in std::iter::once(&built.primary).chain(built.secondary.as_ref()) {
        println!(
            "{} key [{}] reads: {}",
            candidate.algorithm,
            candidate.key,
            built.matrix.decode(candidate.algorithm, &candidate.key)?
        );
    }
    Ok(built.matrix)
}

/// `RUST_LOG` when it is set and parses, `info` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(columns = config.columns, rows = config.rows, "building grid");

    let matrix = match &cli.command {
        Command::Encode(args) => encode(&config, args, &mut rng)?,
        Command::Build(args) => build(&config, args, &mut rng)?,
    };
    if cli.show_locks {
        println!("\n{}", visualize::locks(&matrix));
    }
    Ok(())
}
