//! nusyst CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use nusyst_genie::{tool_configs_from_json, ProviderSet};

#[derive(Parser)]
#[command(name = "nusyst")]
#[command(about = "nusyst - systematic-tweak configuration for neutrino MC reweighting")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a configuration, build every provider and report a summary
    Validate {
        /// Input configuration (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Dump the configured parameter headers as pretty JSON
    DumpParams {
        /// Input configuration (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Validate { input } => cmd_validate(&input),
        Commands::DumpParams { input, output } => cmd_dump_params(&input, output.as_ref()),
    }
}

fn load_provider_set(input: &PathBuf) -> Result<ProviderSet> {
    tracing::info!(path = %input.display(), "loading configuration");
    let text = std::fs::read_to_string(input)?;
    let configs = tool_configs_from_json(&text)?;
    let set = ProviderSet::configure(configs)?;
    tracing::info!(parameters = set.parameters().len(), "configuration loaded");
    Ok(set)
}

fn cmd_validate(input: &PathBuf) -> Result<()> {
    let set = load_provider_set(input)?;

    println!(
        "configuration OK: {} provider(s), {} parameter(s)",
        set.n_providers(),
        set.syst_meta_data().len()
    );
    for header in set.syst_meta_data().iter() {
        let kind = if header.is_correction {
            "correction"
        } else if header.is_responseless {
            "dependent"
        } else if header.is_splineable {
            "spline"
        } else if header.is_randomly_thrown {
            "thrown"
        } else {
            "discrete"
        };
        println!(
            "  [{:3}] {:<28} {:<10} {} variation(s)",
            header.syst_param_id,
            header.pretty_name,
            kind,
            header.n_variations()
        );
    }
    Ok(())
}

fn cmd_dump_params(input: &PathBuf, output: Option<&PathBuf>) -> Result<()> {
    let set = load_provider_set(input)?;
    let dump = serde_json::to_string_pretty(set.syst_meta_data())?;

    match output {
        Some(path) => std::fs::write(path, dump)?,
        None => println!("{}", dump),
    }
    Ok(())
}
