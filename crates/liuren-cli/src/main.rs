//! CLI frontend for the Xiao Liu Ren market oracle.

mod commands;

use std::process;

use clap::{Parser, Subcommand};

use commands::cast::CastArgs;

#[derive(Parser)]
#[command(
    name = "liuren",
    about = "Xiao Liu Ren market oracle — Month, Day, Hour",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast a reading for now or for a backtest date
    Cast(CastArgs),

    /// Print the interpretation prompt for a moment
    Prompt {
        /// Local date/time, e.g. 2024-03-05T14:00 (default: now)
        #[arg(short, long)]
        at: Option<String>,
    },

    /// List the six states of the cycle
    Cycle,

    /// List the twelve earthly-branch hour slots
    Branches,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Cast(args) => commands::cast::run(&args),
        Commands::Prompt { at } => commands::prompt::run(at.as_deref()),
        Commands::Cycle => commands::cycle::run(),
        Commands::Branches => commands::branches::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
