//! CLI argument structures
//!
//! The main CLI structure, its subcommands and the `--room` value parser.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use estimate_core::rooms::RoomType;

/// Estimate construction costs from a floor plan
#[derive(Parser)]
#[command(name = "estimate_cli")]
#[command(about = "Floor-plan construction cost estimator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings TOML (default tax, due days, currency, rate catalog)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the estimate for a floor plan
    #[command(name = "estimate")]
    Estimate {
        #[command(flatten)]
        plan: PlanArgs,

        /// Print materials, labor and totals as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the estimate document to PDF
    #[command(name = "invoice")]
    Invoice {
        #[command(flatten)]
        plan: PlanArgs,

        /// Output PDF path
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Print the active rate catalog
    #[command(name = "catalog")]
    Catalog {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Inputs shared by `estimate` and `invoice`
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Project JSON file (floors, rooms, labor, client, terms)
    #[arg(short, long, value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Add a room, e.g. `kitchen:3x4` or `bedroom:3.5x4@floor-2`
    #[arg(short, long, value_name = "TYPE:WxL[@FLOOR]", value_parser = parse_room_spec)]
    pub room: Vec<RoomSpec>,

    /// Tax percentage
    #[arg(long, value_name = "PERCENT")]
    pub tax: Option<f64>,

    /// Discount percentage
    #[arg(long, value_name = "PERCENT")]
    pub discount: Option<f64>,

    /// Add the default labor items sized to the floor area
    #[arg(long)]
    pub with_labor: bool,
}

/// A room given on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSpec {
    pub room_type: RoomType,
    pub width_m: f64,
    pub length_m: f64,
    pub floor_id: Option<String>,
}

/// Parse `TYPE:WxL[@FLOOR]`
pub fn parse_room_spec(s: &str) -> Result<RoomSpec, String> {
    let (room_type, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TYPE:WxL, got '{}'", s))?;
    let room_type: RoomType = room_type.parse().map_err(|e| format!("{}", e))?;

    let (dims, floor_id) = match rest.split_once('@') {
        Some((dims, floor)) if !floor.is_empty() => (dims, Some(floor.to_string())),
        Some(_) => return Err(format!("missing floor id after '@' in '{}'", s)),
        None => (rest, None),
    };

    let (width, length) = dims
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected dimensions WxL, got '{}'", dims))?;
    let width_m: f64 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{}'", width))?;
    let length_m: f64 = length
        .trim()
        .parse()
        .map_err(|_| format!("invalid length '{}'", length))?;

    Ok(RoomSpec {
        room_type,
        width_m,
        length_m,
        floor_id,
    })
}
