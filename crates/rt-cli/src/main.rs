//! CLI frontend for the Rolltable random-table designer.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::TableArgs;
use rt_core::RuleKind;

#[derive(Parser)]
#[command(
    name = "rt",
    about = "Rolltable: exact dice odds for random tables",
    version,
    propagate_version = true
)]
struct Cli {
    /// Saved table state to start from (JSON)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the exact distribution of a dice pool
    Dist {
        /// Dice pool, e.g. "3d6" or "4d20"
        dice: String,

        /// Selection rule: none, drop-low, drop-high, keep-low, keep-high
        #[arg(short, long, default_value = "none")]
        rule: RuleKind,

        /// How many dice the rule keeps or drops
        #[arg(short, long, default_value = "1")]
        count: u32,

        /// Print the distribution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve outcome bands and print the random table
    Table {
        #[command(flatten)]
        table: TableArgs,

        /// Print tab-separated text for pasting into a spreadsheet
        #[arg(long)]
        tsv: bool,

        /// Write the resulting table state to a file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Check that the bands cover every total exactly once
    Check {
        #[command(flatten)]
        table: TableArgs,
    },

    /// Roll once and look up the matching band
    Roll {
        #[command(flatten)]
        table: TableArgs,

        /// RNG seed for a reproducible roll
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write the default table state to a new file
    Init {
        /// File to create
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let state = cli.state.as_deref();
    let result = match cli.command {
        Commands::Dist {
            dice,
            rule,
            count,
            json,
        } => commands::dist::run(&dice, rule, count, json),
        Commands::Table { table, tsv, save } => {
            commands::table::run(state, &table, tsv, save.as_deref())
        }
        Commands::Check { table } => commands::check::run(state, &table),
        Commands::Roll { table, seed } => commands::roll::run(state, &table, seed),
        Commands::Init { file } => commands::init::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
