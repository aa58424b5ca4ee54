mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tscat_catalog::Loader;
use tscat_core::config::{self, LogConfig};

#[derive(Parser)]
#[command(
    name = "tscat",
    version,
    about = "Qt Linguist translation catalogs from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, global = true, default_value = "tscat.toml")]
    config: String,

    /// Locale to load (e.g. `uk_UA`). Defaults to the config, then the environment.
    #[arg(short, long, global = true, env = "TSCAT_LOCALE")]
    locale: Option<String>,
}

/// Read this TS file directly instead of resolving a locale.
#[derive(Args)]
struct FileArg {
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the display text for a message.
    Lookup {
        context: String,
        source: String,
        #[command(flatten)]
        input: FileArg,
    },
    /// Look up a message and substitute %1, %2, ... with the given values.
    Format {
        context: String,
        source: String,
        /// Values for %1, %2, ...
        args: Vec<String>,
        #[command(flatten)]
        input: FileArg,
    },
    /// Show translation progress per context.
    Stats {
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        input: FileArg,
    },
    /// Report placeholder, accelerator and punctuation mismatches.
    Check {
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        input: FileArg,
    },
    /// Rewrite the catalog in canonical TS layout.
    Normalize {
        /// Write here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        input: FileArg,
    },
    /// Dump the catalog as JSON.
    Export {
        /// Write here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        input: FileArg,
    },
    /// Reload the catalog whenever its file changes.
    Watch {
        /// Polling interval in seconds.
        #[arg(long, default_value_t = 2)]
        interval: u64,
        #[command(flatten)]
        input: FileArg,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;
    let _log_guard = init_logging(&cfg.log)?;

    let loader = Loader::from_config(&cfg.catalog);
    let locale = cfg.resolve_locale(cli.locale.as_deref());
    let source = commands::CatalogSource {
        loader: &loader,
        locale: locale.as_deref(),
    };

    match cli.command {
        Commands::Lookup {
            context,
            source: text,
            input,
        } => {
            let catalog = source.open_lenient(input.file.as_deref())?;
            println!("{}", catalog.lookup(&context, &text));
        }
        Commands::Format {
            context,
            source: text,
            args,
            input,
        } => {
            let catalog = source.open_lenient(input.file.as_deref())?;
            println!("{}", catalog.tr(&context, &text, args.as_slice()));
        }
        Commands::Stats { json, input } => {
            let catalog = source.open(input.file.as_deref())?;
            print!("{}", commands::report::stats(&catalog, json)?);
        }
        Commands::Check { json, input } => {
            let catalog = source.open(input.file.as_deref())?;
            print!("{}", commands::report::check(&catalog, json)?);
        }
        Commands::Normalize { output, input } => {
            let catalog = source.open(input.file.as_deref())?;
            commands::convert::normalize(&catalog, output.as_deref())?;
        }
        Commands::Export { output, input } => {
            let catalog = source.open(input.file.as_deref())?;
            commands::convert::export(&catalog, output.as_deref())?;
        }
        Commands::Watch { interval, input } => {
            if interval == 0 {
                anyhow::bail!("--interval must be at least 1 second");
            }
            let path = source.watch_path(input.file)?;
            commands::watch::run(path, Duration::from_secs(interval)).await?;
        }
    }

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` overrides the configured level.
/// With `[log].file` set, output goes to that file through a background
/// writer; the returned guard flushes it on drop.
fn init_logging(log: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.level));

    if log.file.is_empty() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    }

    let path = PathBuf::from(config::shellexpand(&log.file));
    let Some(name) = path.file_name() else {
        anyhow::bail!("log file '{}' has no file name", path.display());
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}
