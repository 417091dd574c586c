use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use segprep::{BackgroundSource, ProcessOptions};

#[derive(Parser, Debug)]
#[command(name = "segprep", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract binary masks and composite backgrounds for a directory of RGBA images.
    Process(ProcessArgs),
    /// Delete generated image files from the given directories.
    Clean(CleanArgs),
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Input directory of RGBA images.
    #[arg(long = "in")]
    input: PathBuf,

    /// Output directory for binary masks.
    #[arg(long)]
    masks: PathBuf,

    /// Output directory for background composites.
    #[arg(long)]
    composites: PathBuf,

    /// Sample backgrounds from this directory instead of synthesizing them.
    #[arg(long)]
    pool: Option<PathBuf>,

    /// Seed for the random generator, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct CleanArgs {
    /// Directories to clean.
    #[arg(required = true)]
    dirs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Process(args) => cmd_process(args),
        Command::Clean(args) => cmd_clean(args),
    }
}

fn cmd_process(args: ProcessArgs) -> anyhow::Result<()> {
    let source = match args.pool {
        Some(dir) => BackgroundSource::Pool(dir),
        None => BackgroundSource::Synthetic,
    };
    let opts = ProcessOptions {
        input_dir: args.input,
        mask_dir: args.masks,
        composite_dir: args.composites,
        source,
    };

    let mut rng = match args.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_entropy(),
    };

    let summary = segprep::process_directory(&opts, &mut rng)?;
    eprintln!(
        "processed {} images, skipped {}",
        summary.processed, summary.skipped
    );
    Ok(())
}

fn cmd_clean(args: CleanArgs) -> anyhow::Result<()> {
    let summary = segprep::clean_directories(&args.dirs)?;
    eprintln!("removed {} image files", summary.removed);
    Ok(())
}
