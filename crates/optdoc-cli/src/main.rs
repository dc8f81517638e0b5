//! optdoc: CLI tool to render option descriptions to HTML and plain text

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{CONFIG_FILE_NAME, Config};
use optdoc_batch::BatchOptions;

#[derive(Parser, Debug)]
#[command(name = "optdoc")]
#[command(about = "Render markdown option descriptions to HTML and plain text")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
#[command(after_help = "Examples:
  optdoc options.json out.json            # Convert using all CPUs
  optdoc options.json out.json -j4        # Use 4 parallel jobs
  optdoc options.json out.json --pretty   # Pretty-print the output
  optdoc init                             # Write a sample optdoc.toml")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Input JSON file (array of option records)
    #[arg(required = true)]
    input: Option<PathBuf>,

    /// Output JSON file
    #[arg(required = true)]
    output: Option<PathBuf>,

    /// Number of parallel jobs (defaults to number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Configuration file (defaults to optdoc.toml next to the input)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a sample configuration file
    Init {
        /// Path of the configuration file to write
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Print the configuration JSON schema to stdout instead
        #[arg(long)]
        schema: bool,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match &cli.command {
        Some(Command::Init {
            output,
            schema,
            force,
        }) => run_init(output, *schema, *force),
        None => {
            let (Some(input), Some(output)) = (&cli.input, &cli.output) else {
                anyhow::bail!("Both INPUT and OUTPUT paths are required");
            };
            convert(&cli, input, output)
        }
    }
}

/// Install the stderr log subscriber; `RUST_LOG` takes precedence when set
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_thread_ids(verbose >= 2)
        .init();
}

/// Convert an options file
fn convert(cli: &Cli, input: &Path, output: &Path) -> Result<()> {
    let config = load_config(cli.config.as_deref(), input)?;

    let options = BatchOptions {
        markdown: config.markdown.to_options(),
        jobs: cli.jobs.or(config.output.jobs),
        pretty: cli.pretty || config.output.pretty.unwrap_or(false),
    };
    debug!(?options, "resolved options");

    info!("Converting: {} -> {}", input.display(), output.display());

    let summary = optdoc_batch::run(input, output, &options).with_context(|| {
        format!(
            "Failed to convert {} to {}",
            input.display(),
            output.display()
        )
    })?;

    info!("Converted {} records", summary.records);

    if !cli.quiet {
        println!("{}", output.display());
    }

    Ok(())
}

/// Load the explicit config file, or `optdoc.toml` next to the input if present
fn load_config(explicit: Option<&Path>, input: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config");
        return Config::load(path);
    }

    let dir = match input.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    match Config::load_from_dir(dir)? {
        Some(config) => {
            debug!(path = %dir.join(CONFIG_FILE_NAME).display(), "loaded config");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Write a sample config file, or print the JSON schema
fn run_init(output: &Path, schema: bool, force: bool) -> Result<()> {
    if schema {
        println!("{}", Config::json_schema_string()?);
        return Ok(());
    }

    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    let content = Config::sample().to_toml_with_schema()?;
    fs::write(output, content)
        .with_context(|| format!("Failed to write: {}", output.display()))?;

    info!("Created {}", output.display());

    Ok(())
}
