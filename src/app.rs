//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - validates parameter combinations into run configs
//! - loads the MPE table (builtin demo or external CSV)
//! - runs the calculations
//! - prints reports and writes optional exports

use std::path::Path;

use clap::Parser;

use crate::cli::{BalanceArgs, Cli, ClassOpts, Command, MinMassOpts, TableArgs};
use crate::domain::{ClassConfig, MinMassConfig, MpeTable, TableSource, Threshold};
use crate::error::{
    AppError, EXIT_CLASS_USAGE, EXIT_MIN_MASS_USAGE, EXIT_THRESHOLD_USAGE, EXIT_TUR_USAGE,
};

/// Entry point for the `calw` binary.
pub fn run() -> Result<(), AppError> {
    // `calw -s 0.005 -m 2000 --tur 4` should behave like `calw both ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the flag-only invocation style.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    match cli.command {
        Command::MinMass(args) => handle_min_mass(&args.balance, &args.opts),
        Command::Class(args) => handle_class(&args.balance, &args.opts),
        Command::Both(args) => {
            handle_min_mass(&args.balance, &args.min_mass)?;
            handle_class(&args.balance, &args.class)
        }
        Command::Table(args) => handle_table(&args),
    }
}

fn handle_min_mass(balance: &BalanceArgs, opts: &MinMassOpts) -> Result<(), AppError> {
    let config = min_mass_config(balance, opts)?;
    let min_mass_g = crate::math::minimum_mass(
        config.repeatability_g,
        config.resolution_g,
        config.target_rel,
        config.coverage_k,
        config.include_resolution,
    )?;
    println!("{}", crate::report::format_min_mass(&config, min_mass_g));
    Ok(())
}

fn handle_class(balance: &BalanceArgs, opts: &ClassOpts) -> Result<(), AppError> {
    let config = class_config(balance, opts)?;
    let (table, source) = load_table(config.table_path.as_deref())?;
    let selection = crate::select::select_class(&table, config.mass_g, config.threshold);

    println!(
        "{}",
        crate::report::format_selection(config.mass_g, config.threshold, &source, &selection)
    );

    if let Some(path) = &config.export_scan {
        crate::io::write_scan_csv(path, config.mass_g, config.threshold, &selection)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::write_recommendation_json(
            path,
            config.mass_g,
            config.threshold,
            &source,
            &selection,
        )?;
    }
    Ok(())
}

fn handle_table(args: &TableArgs) -> Result<(), AppError> {
    let (table, source) = load_table(args.table.as_deref())?;
    println!("{}", crate::report::format_mpe_table(&table, &source));
    Ok(())
}

/// Load the active MPE table and remember where it came from.
fn load_table(path: Option<&Path>) -> Result<(MpeTable, TableSource), AppError> {
    match path {
        Some(path) => Ok((
            crate::io::load_mpe_csv(path)?,
            TableSource::Csv(path.to_path_buf()),
        )),
        None => Ok((crate::data::demo_table(), TableSource::Builtin)),
    }
}

/// Validate minimum-mass flags into a run config.
pub fn min_mass_config(balance: &BalanceArgs, opts: &MinMassOpts) -> Result<MinMassConfig, AppError> {
    let Some(repeatability_g) = balance.repeatability else {
        return Err(AppError::new(
            EXIT_MIN_MASS_USAGE,
            "Minimum-mass calculation needs --repeatability (g).",
        ));
    };
    Ok(MinMassConfig {
        repeatability_g,
        resolution_g: balance.resolution,
        coverage_k: opts.coverage,
        target_rel: opts.target_rel,
        include_resolution: !opts.ignore_resolution,
    })
}

/// Validate class-selection flags (including the TUR policy) into a run config.
pub fn class_config(balance: &BalanceArgs, opts: &ClassOpts) -> Result<ClassConfig, AppError> {
    let Some(mass_g) = opts.mass else {
        return Err(AppError::new(
            EXIT_CLASS_USAGE,
            "Class selection needs --mass (g).",
        ));
    };
    let threshold = resolve_threshold(balance, opts)?;
    Ok(ClassConfig {
        mass_g,
        threshold,
        table_path: opts.table.clone(),
        export_scan: opts.export.clone(),
        export_json: opts.export_json.clone(),
    })
}

/// Resolve the threshold basis from the mutually exclusive sources.
///
/// A direct basis (`--max-std` / `--max-mpe`) wins over `--tur`; giving both
/// direct bases is ambiguous and rejected.
fn resolve_threshold(balance: &BalanceArgs, opts: &ClassOpts) -> Result<Threshold, AppError> {
    if opts.max_std.is_some() && opts.max_mpe.is_some() {
        return Err(AppError::new(
            EXIT_THRESHOLD_USAGE,
            "Give exactly one of --max-std (g) or --max-mpe (mg).",
        ));
    }
    if let Some(mpe_mg) = opts.max_mpe {
        return Ok(Threshold::MpeMg(mpe_mg));
    }
    if let Some(std_g) = opts.max_std {
        return Ok(Threshold::StdG(std_g));
    }
    if let Some(tur) = opts.tur {
        let (Some(s), Some(d)) = (balance.repeatability, balance.resolution) else {
            return Err(AppError::new(
                EXIT_TUR_USAGE,
                "--tur needs both --repeatability (g) and --resolution (g).",
            ));
        };
        if !(tur.is_finite() && tur > 0.0) {
            return Err(AppError::new(EXIT_TUR_USAGE, "--tur must be a positive number."));
        }
        return Ok(Threshold::StdG(crate::math::balance_uncertainty(s, d) / tur));
    }
    Err(AppError::new(
        EXIT_THRESHOLD_USAGE,
        "Give a threshold basis: --max-std (g), --max-mpe (mg), or --tur.",
    ))
}

/// Rewrite argv so a bare flag list defaults to `calw both`.
///
/// Rules:
/// - `calw`                       -> unchanged (top-level help)
/// - `calw -s 0.005 ...`          -> `calw both -s 0.005 ...`
/// - `calw --help/--version/-h`   -> unchanged
/// - `calw <subcommand> ...`      -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "min-mass" | "class" | "both" | "table");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "both".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(s: Option<f64>, d: Option<f64>) -> BalanceArgs {
        BalanceArgs {
            repeatability: s,
            resolution: d,
        }
    }

    fn min_mass_opts() -> MinMassOpts {
        MinMassOpts {
            coverage: 2.0,
            target_rel: 0.001,
            ignore_resolution: false,
        }
    }

    fn class_opts() -> ClassOpts {
        ClassOpts {
            mass: Some(2000.0),
            tur: None,
            max_std: None,
            max_mpe: None,
            table: None,
            export: None,
            export_json: None,
        }
    }

    #[test]
    fn min_mass_requires_repeatability() {
        let err = min_mass_config(&balance(None, None), &min_mass_opts()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_MIN_MASS_USAGE);
    }

    #[test]
    fn class_requires_mass() {
        let mut opts = class_opts();
        opts.mass = None;
        opts.max_mpe = Some(60.0);
        let err = class_config(&balance(None, None), &opts).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_CLASS_USAGE);
    }

    #[test]
    fn both_direct_bases_are_rejected() {
        let mut opts = class_opts();
        opts.max_std = Some(0.01);
        opts.max_mpe = Some(60.0);
        let err = class_config(&balance(None, None), &opts).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_THRESHOLD_USAGE);
    }

    #[test]
    fn missing_threshold_basis_is_rejected() {
        let err = class_config(&balance(None, None), &class_opts()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_THRESHOLD_USAGE);
    }

    #[test]
    fn tur_requires_balance_figures() {
        let mut opts = class_opts();
        opts.tur = Some(4.0);
        let err = class_config(&balance(Some(0.005), None), &opts).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_TUR_USAGE);
    }

    #[test]
    fn tur_derives_a_std_threshold() {
        let mut opts = class_opts();
        opts.tur = Some(4.0);
        let config = class_config(&balance(Some(0.005), Some(0.01)), &opts).unwrap();
        let Threshold::StdG(limit) = config.threshold else {
            panic!("expected a std-uncertainty threshold");
        };
        // u_bal = sqrt(0.005^2 + (0.01/sqrt(12))^2) ~ 0.0057735 g, over TUR 4.
        assert!((limit - 0.0057735 / 4.0).abs() < 1e-6, "got {limit}");
    }

    #[test]
    fn direct_basis_wins_over_tur() {
        let mut opts = class_opts();
        opts.tur = Some(4.0);
        opts.max_mpe = Some(60.0);
        let config = class_config(&balance(None, None), &opts).unwrap();
        assert_eq!(config.threshold, Threshold::MpeMg(60.0));
    }

    #[test]
    fn bare_flags_rewrite_to_both() {
        let argv = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(rewrite_args(argv(&["calw"])), argv(&["calw"]));
        assert_eq!(rewrite_args(argv(&["calw", "--help"])), argv(&["calw", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["calw", "class", "-m", "2000"])),
            argv(&["calw", "class", "-m", "2000"])
        );
        assert_eq!(
            rewrite_args(argv(&["calw", "-s", "0.005"])),
            argv(&["calw", "both", "-s", "0.005"])
        );
    }
}
