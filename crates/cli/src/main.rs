//! Cache simulator CLI.
//!
//! This binary replays a Valgrind memory trace against a simulated cache. It performs:
//! 1. **Configuration:** Geometry from `-s/-E/-b` (required unless `--config` is given),
//!    optionally layered over a JSON config file.
//! 2. **Replay:** Streams the trace through the simulator, failing on the first bad line.
//! 3. **Reporting:** Prints `hits:<h> misses:<m> evictions:<e>` (or JSON) and writes the
//!    results file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use csim_core::config::{Config, ReplacementPolicy};
use csim_core::sim::{HexMode, Simulator, loader};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Set-associative cache simulator",
    long_about = "Replay a Valgrind memory trace against a simulated cache and count hits, misses and evictions.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 8 -E 2 -b 4 -t traces/yi.trace"
)]
struct Cli {
    /// Echo each trace entry with its hit/miss/eviction markers.
    #[arg(short, long)]
    verbose: bool,

    /// Number of set index bits (2^s sets).
    #[arg(short = 's', value_name = "NUM", required_unless_present = "config")]
    set_bits: Option<u32>,

    /// Number of lines per set (associativity).
    #[arg(short = 'E', value_name = "NUM", required_unless_present = "config")]
    lines_per_set: Option<usize>,

    /// Number of block offset bits (2^b bytes per block).
    #[arg(short = 'b', value_name = "NUM", required_unless_present = "config")]
    block_bits: Option<u32>,

    /// Trace file to replay.
    #[arg(short = 't', value_name = "FILE")]
    trace: PathBuf,

    /// Replacement policy for full sets.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// JSON configuration file; explicit flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the `<hits> <misses> <evictions>` results line.
    #[arg(long, value_name = "FILE")]
    results: Option<PathBuf>,

    /// Print the counters as JSON instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Print a detailed breakdown with hit and miss rates.
    #[arg(long)]
    stats: bool,

    /// Treat non-hex address digits as zero instead of rejecting the trace.
    #[arg(long)]
    lenient_hex: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Lru,
    Fifo,
    Mru,
}

impl From<PolicyArg> for ReplacementPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Lru => Self::Lru,
            PolicyArg::Fifo => Self::Fifo,
            PolicyArg::Mru => Self::Mru,
        }
    }
}

impl Cli {
    /// Builds the effective configuration: file (or defaults) overridden by flags.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(s) = self.set_bits {
            config.cache.set_bits = s;
        }
        if let Some(e) = self.lines_per_set {
            config.cache.lines_per_set = e;
        }
        if let Some(b) = self.block_bits {
            config.cache.block_bits = b;
        }
        if let Some(policy) = self.policy {
            config.cache.policy = policy.into();
        }
        if let Some(path) = &self.results {
            config.general.results_file.clone_from(path);
        }
        config.general.verbose |= self.verbose;

        Ok(config)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = cli.resolve_config()?;
    let geometry = config.geometry().context("Invalid cache geometry")?;
    info!(
        s = geometry.set_bits(),
        e = geometry.lines_per_set(),
        b = geometry.block_bits(),
        policy = ?config.cache.policy,
        trace = %cli.trace.display(),
        "starting replay"
    );

    let mode = if cli.lenient_hex {
        HexMode::Lenient
    } else {
        HexMode::Strict
    };
    let reader = loader::open_trace(&cli.trace, mode).with_context(|| {
        format!(
            "Unable to open trace file {}. Please recheck the trace file location.",
            cli.trace.display()
        )
    })?;

    let mut sim = Simulator::new(geometry, config.cache.policy);
    let verbose = config.general.verbose;
    let stats = sim
        .try_run_with(reader, |entry, result| {
            if verbose && !result.is_empty() {
                println!("{}{}", entry.text, result.markers());
            }
        })
        .with_context(|| format!("Failed to replay trace {}", cli.trace.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{stats}");
    }
    if cli.stats {
        stats.print();
    }

    let results = &config.general.results_file;
    stats
        .write_results(results)
        .with_context(|| format!("Failed to write results file {}", results.display()))?;

    Ok(())
}
