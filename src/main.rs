use anyhow::{Context, Result};
use clap::Parser;
use modplan::config::{
    CliConfig, LogLevel, RunConfig, YAxis, DEFAULT_EXCLUDE, DEFAULT_INCLUDE,
};
use modplan::run;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Writes one modulation-plan chart per analyzed piece, plus the pages of a
/// static site listing them.
#[derive(Parser, Debug)]
#[command(name = "modplan", version)]
struct CliArgs {
    /// Folder(s) to scan for piece files. Defaults to the current directory
    /// if no individual files are passed via -f.
    #[arg(short, long, value_name = "DIR", num_args = 1..)]
    dir: Vec<PathBuf>,

    /// Don't scan folders recursively, i.e. read only files directly in DIR.
    #[arg(short, long)]
    nonrecursive: bool,

    /// Path(s) of individual piece files.
    #[arg(short, long, value_name = "PATH", num_args = 1..)]
    file: Vec<PathBuf>,

    /// Select only file names matching this regular expression.
    #[arg(short, long, value_name = "REGEX", default_value = DEFAULT_INCLUDE)]
    regex: String,

    /// Skip files and folders (with their subfolders) whose name matches this regex.
    #[arg(short, long, value_name = "REGEX", default_value = DEFAULT_EXCLUDE)]
    exclude: String,

    /// Output directory.
    #[arg(short, long, value_name = "OUT_DIR")]
    out: Option<PathBuf>,

    /// Ordering of keys on the y-axis.
    #[arg(short, long, value_enum, default_value_t = YAxis::Semitones)]
    yaxis: YAxis,

    /// Logging level. LOG_LEVEL in the environment overrides it.
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    level: LogLevel,
}

fn init_logging(level: LogLevel) -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(level.as_filter().into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")
}

fn main() {
    let args = CliArgs::parse();

    if let Err(e) = init_logging(args.level) {
        eprintln!("{:#}", e);
        process::exit(1);
    }

    let cli = CliConfig {
        dirs: args.dir,
        files: args.file,
        include: args.regex,
        exclude: args.exclude,
        recursive: !args.nonrecursive,
        out: args.out,
        axis: args.yaxis,
    };

    let config = match RunConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    match run(&config) {
        Ok(summary) => {
            info!(
                "Done: {} of {} pieces charted",
                summary.written.len(),
                summary.total()
            );
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
