mod config;
mod generator;
mod output;
mod template;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use config::Config;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "kwgen", version)]
#[command(about = "Generate SEO keyword lists by combining vocabulary lists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the keyword list
    Generate {
        /// JSON config file (default: $KWGEN_CONFIG, then the built-in config)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = output::DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Print keywords to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Log how many candidates each pattern contributed
        #[arg(long)]
        stats: bool,
    },
    /// Write the built-in config as JSON for editing
    Init {
        /// Destination file
        #[arg(short, long, default_value = "kwgen.json")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate a config without generating
    Check {
        /// JSON config file (default: $KWGEN_CONFIG, then the built-in config)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

type BoxError = Box<dyn std::error::Error>;

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("kwgen=info".parse()?),
        )
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<(), BoxError> {
    match cli.command {
        Commands::Generate {
            config,
            output,
            stdout,
            stats,
        } => generate(config.as_deref(), &output, stdout, stats),
        Commands::Init { output, force } => init(&output, force),
        Commands::Check { config } => check(config.as_deref()),
    }
}

fn generate(
    config: Option<&Path>,
    output: &Path,
    stdout: bool,
    stats: bool,
) -> Result<(), BoxError> {
    let config = Config::resolve(config)?;
    info!("generating keyword combinations");

    let generation = generator::generate(&config)?;
    if stats {
        for p in &generation.patterns {
            info!(
                pattern = %p.name,
                combinations = p.combinations,
                candidates = p.candidates,
                "pattern contribution"
            );
        }
        info!(
            candidates = generation.total_candidates(),
            unique = generation.keywords.len(),
            "deduplicated"
        );
    }

    if stdout {
        output::write_to(std::io::stdout().lock(), &generation.keywords)?;
        info!(count = generation.keywords.len(), "wrote keywords to stdout");
        return Ok(());
    }

    output::write_keywords(output, &generation.keywords)?;
    println!("{}", output::summary(generation.keywords.len(), output));
    Ok(())
}

fn init(output: &Path, force: bool) -> Result<(), BoxError> {
    if output.exists() && !force {
        return Err(format!(
            "{} already exists. Edit it directly or pass --force to overwrite.",
            output.display()
        )
        .into());
    }
    Config::default().save(output)?;
    info!(path = %output.display(), "wrote default config");
    Ok(())
}

fn check(config: Option<&Path>) -> Result<(), BoxError> {
    let config = Config::resolve(config)?;
    config.validate()?;
    info!(
        lists = config.vocabulary.len(),
        patterns = config.patterns.len(),
        "config is valid"
    );
    Ok(())
}
