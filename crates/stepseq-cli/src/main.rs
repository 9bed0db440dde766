//! stepseq: command-line front end for stepseq-core

mod config;
mod ops;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use stepseq_core::{DEFAULT_HITS, DEFAULT_STEPS, OPTION_KEYS, Sequence, SequenceOptions, distribute};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ops::Op;

/// Build, resize and shift step sequences
#[derive(Parser)]
#[command(name = "stepseq")]
#[command(about = "Build, resize and shift step sequences")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/stepseq/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override a sequence option, e.g. --set stretch-with=repeat
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    overrides: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a euclidean rhythm as x (hit) and . (rest)
    Euclid {
        #[arg(default_value_t = DEFAULT_STEPS)]
        steps: usize,
        #[arg(default_value_t = DEFAULT_HITS)]
        hits: usize,
        /// Rotate the pattern
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        shift: i64,
    },

    /// Apply transforms to a sequence of step values
    Apply {
        /// Step values
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<f64>,

        /// Repeatable: stretch:N, shrink:N, stretch-by:X, shrink-by:X,
        /// expand:N, contract:N, expand-by:X, contract-by:X, shift:N,
        /// reverse, loop[:N], undo[:N], redo[:N], reset
        #[arg(long = "op", value_name = "OP")]
        ops: Vec<Op>,
    },
}

fn apply_overrides(options: &mut SequenceOptions, overrides: &[String]) -> anyhow::Result<()> {
    for entry in overrides {
        let Some((key, value)) = entry.split_once('=') else {
            bail!("expected KEY=VALUE, got `{entry}`");
        };
        let key = key.trim();
        if !OPTION_KEYS.contains(&key) {
            bail!("unknown option `{key}` (known: {})", OPTION_KEYS.join(", "));
        }
        options.set(key, value.trim());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("stepseq=info".parse()?)
            .add_directive("stepseq_core=info".parse()?))
        .init();

    let cli = Cli::parse();
    let mut options = config::load_config(cli.config.as_deref()).sequence;
    apply_overrides(&mut options, &cli.overrides)?;

    match cli.command {
        Commands::Euclid { steps, hits, shift } => {
            let line: String = distribute(steps, hits, shift)
                .into_iter()
                .map(|hit| if hit { 'x' } else { '.' })
                .collect();
            println!("{line}");
        }
        Commands::Apply { values, ops } => {
            let mut seq = Sequence::with_options(values, options);
            for op in ops {
                op.apply(&mut seq)
                    .with_context(|| format!("failed to apply {op:?}"))?;
            }
            tracing::info!(offset = seq.offset(), "done");
            println!("{seq}");
        }
    }

    Ok(())
}
