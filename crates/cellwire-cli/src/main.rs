//! cellwire CLI - cell addressing and engine forwarding from the shell

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cellwire_bridge::{EngineBridge, EngineConfig};
use cellwire_core::{base26, CellAddress, RowAddress};

#[derive(Parser)]
#[command(name = "cellwire")]
#[command(author, version, about = "Cell addressing and engine-forwarding tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a cell address from 1-based row and column indices
    Addr {
        /// Row index (1-based)
        row: u32,
        /// Column index (1-based)
        col: u32,
    },

    /// Print the column letters for a 1-based column index
    Col {
        /// Column index (1-based)
        index: u32,
    },

    /// Print the row label for a 1-based row index
    Row {
        /// Row index (1-based)
        index: u32,
    },

    /// Encode a signed integer as a base-26 numeral (A = 0)
    Encode {
        /// Integer to encode; negative values and -0 keep their sign
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Decode a signed base-26 numeral back to an integer
    Decode {
        /// Numeral such as "BA" or "-Z"
        #[arg(allow_hyphen_values = true)]
        numeral: String,
    },

    /// Read the formula stored at a cell
    Get {
        /// Cell address, e.g. "B7"
        address: String,

        /// Path to the engine executable (default: cellwire-engine on PATH)
        #[arg(short, long)]
        engine: Option<PathBuf>,
    },

    /// Replace the formula at a cell and print the resulting updates
    Set {
        /// Cell address, e.g. "B7"
        address: String,

        /// Formula text, e.g. "=A1*2"
        #[arg(allow_hyphen_values = true)]
        formula: String,

        /// Path to the engine executable (default: cellwire-engine on PATH)
        #[arg(short, long)]
        engine: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Addr { row, col } => {
            println!("{}", CellAddress::from_indices(row, col)?);
            Ok(())
        }
        Commands::Col { index } => {
            println!("{}", base26::column_to_letters(index)?);
            Ok(())
        }
        Commands::Row { index } => {
            println!("{}", RowAddress::try_from(index)?);
            Ok(())
        }
        Commands::Encode { value } => {
            println!("{}", base26::encode_signed(value)?);
            Ok(())
        }
        Commands::Decode { numeral } => {
            println!("{}", base26::decode_signed(&numeral)?);
            Ok(())
        }
        Commands::Get { address, engine } => get_formula(&address, engine).await,
        Commands::Set {
            address,
            formula,
            engine,
        } => set_formula(&address, &formula, engine).await,
    }
}

fn engine_config(engine: Option<PathBuf>) -> EngineConfig {
    EngineConfig {
        engine_path: engine,
        ..EngineConfig::default()
    }
}

async fn get_formula(address: &str, engine: Option<PathBuf>) -> Result<()> {
    let address: CellAddress = address.parse()?;

    let mut bridge = EngineBridge::spawn(engine_config(engine))?;
    let formula = bridge
        .get_formula(&address)
        .await
        .with_context(|| format!("reading formula at {address}"))?;
    println!("{formula}");

    bridge.shutdown().await?;
    Ok(())
}

async fn set_formula(address: &str, formula: &str, engine: Option<PathBuf>) -> Result<()> {
    let address: CellAddress = address.parse()?;

    let mut bridge = EngineBridge::spawn(engine_config(engine))?;
    let updates = bridge
        .set_formula(&address, formula)
        .await
        .with_context(|| format!("writing formula at {address}"))?;
    for (cell, value) in &updates {
        println!("{cell} = {value}");
    }

    bridge.shutdown().await?;
    Ok(())
}
