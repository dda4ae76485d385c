//! Formatted terminal output for the three report blocks.

use crate::domain::{MinMassConfig, MpeTable, TableSource, Threshold, WeightClass};
use crate::select::{ClassSelection, MpeLookup};

/// Format the minimum-mass block.
pub fn format_min_mass(config: &MinMassConfig, min_mass_g: f64) -> String {
    let mut out = String::new();

    out.push_str("=== calw - Minimum test mass ===\n");
    out.push_str(&format!("m_min (g) = {min_mass_g:.6}\n"));
    out.push_str(&format!("- repeatability s = {} g\n", config.repeatability_g));
    match config.resolution_g {
        Some(d) => out.push_str(&format!("- resolution d = {d} g\n")),
        None => out.push_str("- resolution d = (not given)\n"),
    }
    if !config.include_resolution {
        out.push_str("- resolution quantization term excluded\n");
    }
    out.push_str(&format!("- coverage k = {}\n", config.coverage_k));
    out.push_str(&format!("- target r_rel = {}\n", config.target_rel));

    out
}

/// Format the class-selection block: query, per-class scan, recommendation.
pub fn format_selection(
    mass_g: f64,
    threshold: Threshold,
    source: &TableSource,
    selection: &ClassSelection,
) -> String {
    let mut out = String::new();

    out.push_str("=== calw - Standard weight class ===\n");
    out.push_str(&format!("Mass: {mass_g} g\n"));
    out.push_str(&format!("Threshold: {}\n", threshold.describe()));
    out.push_str(&format!("Table: {source}\n"));

    out.push_str("\nClass scan (precedence order):\n");
    for candidate in &selection.scan {
        let marker = if Some(candidate.class) == selection.chosen {
            "*"
        } else {
            " "
        };
        match candidate.lookup {
            MpeLookup::NotAvailable => {
                out.push_str(&format!("{marker} {:<3} n/a at this mass\n", candidate.class));
            }
            lookup => {
                let mpe_mg = lookup.value().unwrap_or_default();
                let src = if lookup.is_interpolated() {
                    "interpolated"
                } else {
                    "tabulated"
                };
                let verdict = if candidate.qualifies {
                    "qualifies"
                } else {
                    "exceeds threshold"
                };
                let u_std = candidate
                    .u_std_g
                    .map(|u| format!("{u:.6}"))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "{marker} {:<3} MPE={mpe_mg:>12.3} mg  u_std={u_std} g  [{src}]  {verdict}\n",
                    candidate.class,
                ));
            }
        }
    }

    out.push('\n');
    match selection.chosen {
        Some(class) => out.push_str(&format!(
            "Recommended class for {mass_g} g: {class} ({})\n",
            threshold.describe()
        )),
        None => out.push_str("No class satisfies the given table.\n"),
    }

    out
}

/// Format the active MPE table as an aligned dump.
///
/// Columns with no values anywhere in the table (e.g. E1 in the demo table)
/// are left out rather than printed as an empty column.
pub fn format_mpe_table(table: &MpeTable, source: &TableSource) -> String {
    let mut out = String::new();

    out.push_str("=== calw - MPE table (mg) ===\n");
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!("Rows: {}\n\n", table.len()));

    let classes: Vec<WeightClass> = WeightClass::ALL
        .into_iter()
        .filter(|&c| table.rows().iter().any(|r| r.get(c).is_some()))
        .collect();

    out.push_str(&format!("{:>10}", "mass_g"));
    for class in &classes {
        out.push_str(&format!(" {:>10}", class.as_str()));
    }
    out.push('\n');

    for row in table.rows() {
        out.push_str(&format!("{:>10}", row.mass_g));
        for &class in &classes {
            match row.get(class) {
                Some(v) => out.push_str(&format!(" {v:>10}")),
                None => out.push_str(&format!(" {:>10}", "")),
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo_table;
    use crate::select::select_class;

    fn base_config() -> MinMassConfig {
        MinMassConfig {
            repeatability_g: 0.005,
            resolution_g: Some(0.01),
            coverage_k: 2.0,
            target_rel: 0.001,
            include_resolution: true,
        }
    }

    #[test]
    fn min_mass_block_reports_value_and_parameters() {
        let text = format_min_mass(&base_config(), 11.547005);
        assert!(text.contains("m_min (g) = 11.547005"));
        assert!(text.contains("repeatability s = 0.005 g"));
        assert!(text.contains("coverage k = 2"));
    }

    #[test]
    fn min_mass_block_flags_excluded_resolution() {
        let mut config = base_config();
        config.include_resolution = false;
        let text = format_min_mass(&config, 10.0);
        assert!(text.contains("quantization term excluded"));
    }

    #[test]
    fn selection_block_marks_chosen_class() {
        let selection = select_class(&demo_table(), 2000.0, Threshold::MpeMg(60.0));
        let text = format_selection(2000.0, Threshold::MpeMg(60.0), &TableSource::Builtin, &selection);

        let chosen_line = text.lines().find(|l| l.starts_with('*')).unwrap();
        assert!(chosen_line.contains("E2"));
        assert!(chosen_line.contains("qualifies"));
        assert!(text.contains("Recommended class for 2000 g: E2"));
        assert!(text.contains("builtin demo table"));
    }

    #[test]
    fn selection_block_reports_no_match() {
        let selection = select_class(&demo_table(), 2000.0, Threshold::StdG(1e-9));
        let text = format_selection(2000.0, Threshold::StdG(1e-9), &TableSource::Builtin, &selection);
        assert!(text.contains("No class satisfies the given table."));
        assert!(!text.lines().any(|l| l.starts_with('*')));
    }

    #[test]
    fn selection_block_shows_unavailable_rows() {
        let selection = select_class(&demo_table(), 100_000.0, Threshold::MpeMg(60.0));
        let text =
            format_selection(100_000.0, Threshold::MpeMg(60.0), &TableSource::Builtin, &selection);
        assert!(text.contains("n/a at this mass"));
    }

    #[test]
    fn table_dump_skips_all_empty_columns() {
        let text = format_mpe_table(&demo_table(), &TableSource::Builtin);
        assert!(text.contains("mass_g"));
        assert!(text.contains("E2"));
        assert!(!text.contains("E1"));
        assert!(text.contains("50000"));
    }
}
