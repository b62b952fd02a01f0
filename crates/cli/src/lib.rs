use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::{ConfigOverrides, PruneConfig};
use fixup_pruner::{ActSource, BatchDriver, Minimizer};
use fixup_store::{ActId, RecordScanner};
use flags::StderrFlag;
use std::io;
use std::path::PathBuf;

mod config;
mod flags;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "prune-fixups")]
#[command(
    about = "Remove fixups that do not change the verifier's output",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    config: ConfigArgs,

    /// Print the final report as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Prune every act that has a fixup record
    All,

    /// Prune the given acts, in order
    Act(ActArgs),
}

#[derive(Args)]
struct ActArgs {
    /// Act identifiers, e.g. "2012. évi C. törvény"
    #[arg(required = true, value_name = "ID")]
    ids: Vec<String>,
}

#[derive(Args)]
struct ConfigArgs {
    /// TOML config file (overrides FIXUP_PRUNE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root of the fixup records (overrides FIXUP_PRUNE_DIR) [default: ./data/fixups]
    #[arg(long, global = true)]
    fixups_dir: Option<PathBuf>,

    /// Verifier program (overrides FIXUP_PRUNE_VERIFIER) [default: cargo]
    #[arg(long, global = true)]
    verifier: Option<String>,

    /// Argument passed to the verifier before the act id, repeatable
    #[arg(
        long = "verifier-arg",
        value_name = "ARG",
        global = true,
        allow_hyphen_values = true
    )]
    verifier_args: Vec<String>,

    /// Working directory of the verifier
    #[arg(long, global = true)]
    verifier_cwd: Option<PathBuf>,

    /// Where the verifier's stderr goes
    #[arg(long, global = true, value_enum)]
    verifier_stderr: Option<StderrFlag>,
}

impl From<ConfigArgs> for ConfigOverrides {
    fn from(args: ConfigArgs) -> Self {
        Self {
            config: args.config,
            fixups_dir: args.fixups_dir,
            verifier: args.verifier,
            verifier_args: args.verifier_args,
            verifier_cwd: args.verifier_cwd,
            verifier_stderr: args.verifier_stderr.map(StderrFlag::as_domain),
        }
    }
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = PruneConfig::resolve(cli.config.into())?;
    log::debug!("Effective config: {config:?}");

    let store = config.store();
    let source: Box<dyn ActSource> = match cli.command {
        Commands::All => Box::new(RecordScanner::new(store.root())),
        Commands::Act(args) => Box::new(parse_act_ids(&args.ids)?),
    };

    let mut driver = BatchDriver::new(Minimizer::new(store, config.verifier()));
    let report = driver.run(source.as_ref()).context("Pruning aborted")?;

    if cli.json {
        print_stdout(&serde_json::to_string_pretty(&report)?)?;
    }
    Ok(())
}

fn parse_act_ids(ids: &[String]) -> Result<Vec<ActId>> {
    ids.iter()
        .map(|id| ActId::new(id.as_str()).with_context(|| format!("Invalid act id {id:?}")))
        .collect()
}
