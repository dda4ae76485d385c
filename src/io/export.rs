//! Export the per-class scan breakdown to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Threshold;
use crate::error::{AppError, EXIT_EXPORT};
use crate::select::{ClassSelection, MpeLookup};

/// Write the scan breakdown to a CSV file.
pub fn write_scan_csv(
    path: &Path,
    mass_g: f64,
    threshold: Threshold,
    selection: &ClassSelection,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_EXPORT,
            format!("Failed to create scan CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(
        file,
        "class,mass_g,threshold_basis,threshold_value,mpe_mg,source,u_std_g,qualifies,chosen"
    )
    .map_err(|e| AppError::new(EXIT_EXPORT, format!("Failed to write scan CSV header: {e}")))?;

    for candidate in &selection.scan {
        let (mpe, source) = match candidate.lookup {
            MpeLookup::Tabulated(v) => (format!("{v:.6}"), "tabulated"),
            MpeLookup::Interpolated(v) => (format!("{v:.6}"), "interpolated"),
            MpeLookup::NotAvailable => (String::new(), "n/a"),
        };
        let chosen = Some(candidate.class) == selection.chosen;
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{}",
            candidate.class,
            mass_g,
            threshold.basis_label(),
            threshold.value(),
            mpe,
            source,
            candidate
                .u_std_g
                .map(|u| format!("{u:.9}"))
                .unwrap_or_default(),
            candidate.qualifies,
            chosen,
        )
        .map_err(|e| AppError::new(EXIT_EXPORT, format!("Failed to write scan CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo_table;
    use crate::select::select_class;

    #[test]
    fn scan_csv_lists_every_scanned_class() {
        let selection = select_class(&demo_table(), 2000.0, Threshold::MpeMg(60.0));
        let path =
            std::env::temp_dir().join(format!("calw-export-scan-{}.csv", std::process::id()));
        write_scan_csv(&path, 2000.0, Threshold::MpeMg(60.0), &selection).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("class,mass_g"));
        // Header + one row per scanned class.
        assert_eq!(contents.lines().count(), 1 + selection.scan.len());
        assert!(contents.contains("E2,2000,max_mpe_mg,60,50.000000,tabulated"));
        assert!(contents.contains(",true,true"));
    }
}
