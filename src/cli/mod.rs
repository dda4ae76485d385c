//! Command-line parsing for the calibration weight planner.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the lookup/selection code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "calw",
    version,
    about = "Minimum test mass and OIML R111 weight class planner"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the minimum test mass for a target relative uncertainty.
    MinMass(MinMassArgs),
    /// Recommend the loosest standard-weight class meeting an error threshold.
    Class(ClassArgs),
    /// Run both calculations in one invocation.
    ///
    /// This is also what a bare flag list resolves to, so
    /// `calw -s 0.005 -d 0.01 -m 2000 --tur 4` works without naming a
    /// subcommand.
    Both(BothArgs),
    /// Print the MPE table in use (builtin demo or external CSV).
    Table(TableArgs),
}

/// Balance figures shared by the minimum-mass and TUR paths.
#[derive(Debug, Args, Clone)]
pub struct BalanceArgs {
    /// Balance repeatability standard deviation s (g).
    #[arg(short = 's', long, value_name = "G")]
    pub repeatability: Option<f64>,

    /// Balance readability / scale division d (g).
    #[arg(short = 'd', long, value_name = "G")]
    pub resolution: Option<f64>,
}

/// Options for the minimum-mass calculation.
#[derive(Debug, Args, Clone)]
pub struct MinMassOpts {
    /// Coverage factor k.
    #[arg(short = 'k', long, default_value_t = 2.0)]
    pub coverage: f64,

    /// Target relative uncertainty (0.001 = 0.1%).
    #[arg(long, default_value_t = 0.001)]
    pub target_rel: f64,

    /// Leave the resolution quantization term out even when -d is given.
    #[arg(long)]
    pub ignore_resolution: bool,
}

/// Options for the class recommendation.
#[derive(Debug, Args, Clone)]
pub struct ClassOpts {
    /// Nominal mass of the standard weight (g).
    #[arg(short = 'm', long, value_name = "G")]
    pub mass: Option<f64>,

    /// Target test uncertainty ratio (threshold = u_balance / TUR).
    #[arg(long, value_name = "RATIO")]
    pub tur: Option<f64>,

    /// Direct threshold on the weight's standard uncertainty (g).
    #[arg(long, value_name = "G")]
    pub max_std: Option<f64>,

    /// Direct threshold on the weight's MPE (mg).
    #[arg(long, value_name = "MG")]
    pub max_mpe: Option<f64>,

    /// External MPE table CSV (mass_g plus one column per class, MPE in mg).
    #[arg(long, value_name = "CSV")]
    pub table: Option<PathBuf>,

    /// Export the per-class scan to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the recommendation (query + scan) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Arguments for `calw min-mass`.
#[derive(Debug, Parser, Clone)]
pub struct MinMassArgs {
    #[command(flatten)]
    pub balance: BalanceArgs,

    #[command(flatten)]
    pub opts: MinMassOpts,
}

/// Arguments for `calw class`.
#[derive(Debug, Parser, Clone)]
pub struct ClassArgs {
    #[command(flatten)]
    pub balance: BalanceArgs,

    #[command(flatten)]
    pub opts: ClassOpts,
}

/// Arguments for `calw both`.
#[derive(Debug, Parser, Clone)]
pub struct BothArgs {
    #[command(flatten)]
    pub balance: BalanceArgs,

    #[command(flatten)]
    pub min_mass: MinMassOpts,

    #[command(flatten)]
    pub class: ClassOpts,
}

/// Arguments for `calw table`.
#[derive(Debug, Parser, Clone)]
pub struct TableArgs {
    /// External MPE table CSV; the builtin demo table when omitted.
    #[arg(long, value_name = "CSV")]
    pub table: Option<PathBuf>,
}
