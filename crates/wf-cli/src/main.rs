//! CLI frontend for the Wayfarer procedural text adventure.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "wayfarer",
    about = "Wayfarer: seeded text adventures with free-text commands",
    version,
    propagate_version = true
)]
struct Cli {
    /// Template catalog to use instead of the bundled one
    #[arg(short, long, global = true)]
    templates: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively on stdin/stdout
    Play {
        /// Seed for the run (default: random)
        #[arg(short, long)]
        seed: Option<String>,

        /// Directory for save files
        #[arg(long, default_value = ".")]
        save_dir: PathBuf,

        /// Resume from a save instead of starting fresh
        #[arg(short, long)]
        load: Option<String>,

        /// Player name
        #[arg(long)]
        name: Option<String>,

        /// Player class
        #[arg(long)]
        class: Option<String>,
    },

    /// Print the world a seed generates
    Generate {
        /// Seed to generate from
        seed: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List timestamped saves
    Saves {
        /// Directory holding save files
        #[arg(long, default_value = ".")]
        save_dir: PathBuf,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wayfarer=info,wf_fiction=info,wf_worldgen=info,wf_core=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let result = commands::load_catalog(cli.templates.as_deref()).and_then(|catalog| {
        match cli.command {
            Commands::Play {
                seed,
                save_dir,
                load,
                name,
                class,
            } => commands::play::run(
                catalog,
                commands::engine_config(save_dir),
                commands::play::Options {
                    seed,
                    load,
                    name,
                    class,
                },
            ),
            Commands::Generate { seed, json } => commands::generate::run(&catalog, &seed, json),
            Commands::Saves { save_dir } => commands::saves::run(&save_dir),
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
