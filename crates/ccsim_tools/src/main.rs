//! ccsim - Command-line tools for battle setups.
//!
//! # Usage
//!
//! ```bash
//! # Show the units of a setup file
//! cargo run -p ccsim_tools -- info fleet.ccb
//!
//! # Rewrite a setup file in version 5
//! cargo run -p ccsim_tools -- convert fleet.ccb fleet5.ccb --format-version 5
//!
//! # Fleet cost of players 1 and 2
//! cargo run -p ccsim_tools -- cost fleet.ccb --ship-list data/ships.ron --player 1 --player 2
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ccsim_core::battle_order::{BattleOrderRule, HOST_REFERENCE, PHOST_REFERENCE};
use ccsim_core::config::{HostConfiguration, SimConfiguration};
use ccsim_core::fleet_cost::{compute_fleet_costs, get_involved_players, FleetCostOptions};
use ccsim_core::players::PlayerSet;
use ccsim_core::translator::NullTranslator;
use ccsim_tools::document::{read_setup_file, read_text, write_setup_file, SetupDocument};
use ccsim_tools::error::{Result, ToolError};
use ccsim_tools::report;
use ccsim_tools::validate::validate_ship_list;

#[derive(Parser)]
#[command(name = "ccsim-tools")]
#[command(about = "Tools for battle simulation setup files")]
#[command(version)]
struct Cli {
    /// Enable debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the units of a setup file
    Info {
        /// Setup file
        file: PathBuf,
    },
    /// Rewrite a setup file
    Convert {
        /// Input setup file
        input: PathBuf,
        /// Output setup file
        output: PathBuf,
        /// File version to write (3-5); default is the lowest lossless one
        #[arg(long)]
        format_version: Option<u8>,
    },
    /// Print a setup file as RON or JSON
    Export {
        /// Setup file
        file: PathBuf,
        /// Print JSON instead of RON
        #[arg(long)]
        json: bool,
    },
    /// Create a setup file from RON
    Import {
        /// RON setup document
        input: PathBuf,
        /// Output setup file
        output: PathBuf,
        /// File version to write (3-5); default is the lowest lossless one
        #[arg(long)]
        format_version: Option<u8>,
    },
    /// Fleet cost of a setup
    Cost {
        /// Setup file
        file: PathBuf,
        /// Ship list (RON)
        #[arg(long)]
        ship_list: PathBuf,
        /// Host configuration (RON)
        #[arg(long)]
        host_config: Option<PathBuf>,
        /// Simulation configuration (RON)
        #[arg(long)]
        sim_config: Option<PathBuf>,
        /// Fleet cost options (RON)
        #[arg(long)]
        options: Option<PathBuf>,
        /// Player to include; default is every player in the setup
        #[arg(short, long = "player")]
        players: Vec<i32>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Battle order of the units in a setup
    Order {
        /// Setup file
        file: PathBuf,
        /// Use PHost rules instead of Host rules
        #[arg(long)]
        phost: bool,
    },
    /// Validate a ship list
    Validate {
        /// Ship list (RON)
        #[arg(default_value = "data/ships.ron")]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Info { file } => {
            let (setup, version) = read_setup_file(&file)?;
            print!("{}", report::setup_summary(&setup, version));
        }
        Commands::Convert {
            input,
            output,
            format_version,
        } => {
            let (setup, _) = read_setup_file(&input)?;
            write_setup_file(&output, &setup, format_version)?;
        }
        Commands::Export { file, json } => {
            let (setup, _) = read_setup_file(&file)?;
            let doc = SetupDocument::from_setup(&setup);
            println!("{}", if json { doc.to_json()? } else { doc.to_ron()? });
        }
        Commands::Import {
            input,
            output,
            format_version,
        } => {
            let doc = SetupDocument::from_ron_str(&read_text(&input)?, &input.display().to_string())?;
            write_setup_file(&output, &doc.into_setup(), format_version)?;
        }
        Commands::Cost {
            file,
            ship_list,
            host_config,
            sim_config,
            options,
            players,
            json,
        } => {
            let (setup, _) = read_setup_file(&file)?;
            let ship_list = validate_ship_list(&ship_list)?;
            let host = load_or_default(host_config.as_deref(), HostConfiguration::from_ron_str)?;
            let sim = load_or_default(sim_config.as_deref(), SimConfiguration::from_ron_str)?;
            let options = load_or_default(options.as_deref(), |text, path| {
                ron::from_str::<FleetCostOptions>(text).map_err(|source| ToolError::Ron {
                    path: path.to_string(),
                    source,
                })
            })?;
            let players = if players.is_empty() {
                get_involved_players(&setup)
            } else {
                players.into_iter().collect::<PlayerSet>()
            };

            let items = compute_fleet_costs(&setup, &sim, &options, &ship_list, &host, players, &NullTranslator);
            if json {
                let text = serde_json::to_string_pretty(&items).map_err(|e| ToolError::Serialize(e.to_string()))?;
                println!("{text}");
            } else {
                print!("{}", report::cost_table(&items));
            }
        }
        Commands::Order { file, phost } => {
            let (setup, _) = read_setup_file(&file)?;
            let rule: &BattleOrderRule = if phost { &PHOST_REFERENCE } else { &HOST_REFERENCE };
            print!("{}", report::battle_order_table(&setup, rule));
        }
        Commands::Validate { path } => {
            tracing::info!("Validating ship list: {}", path.display());
            validate_ship_list(&path)?;
        }
    }
    Ok(())
}

/// Parse an optional RON file, falling back to the default value.
fn load_or_default<T, E>(path: Option<&Path>, parse: impl Fn(&str, &str) -> std::result::Result<T, E>) -> Result<T>
where
    T: Default,
    ToolError: From<E>,
{
    match path {
        Some(path) => Ok(parse(&read_text(path)?, &path.display().to_string())?),
        None => Ok(T::default()),
    }
}
