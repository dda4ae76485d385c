//! Write recommendation JSON files.
//!
//! The JSON is the portable record of a selection run:
//! - the query (mass, threshold basis, table source)
//! - the chosen class and the full per-class scan
//!
//! The schema is defined by `domain::RecommendationFile`.

use std::fs::File;
use std::path::Path;

use chrono::Local;

use crate::domain::{RecommendationFile, ScanEntry, TableSource, Threshold};
use crate::error::{AppError, EXIT_EXPORT};
use crate::select::{ClassCandidate, ClassSelection};

/// Write a recommendation JSON file.
pub fn write_recommendation_json(
    path: &Path,
    mass_g: f64,
    threshold: Threshold,
    source: &TableSource,
    selection: &ClassSelection,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_EXPORT,
            format!("Failed to create recommendation JSON '{}': {e}", path.display()),
        )
    })?;

    let rec = RecommendationFile {
        tool: "calw".to_string(),
        generated_on: Local::now().date_naive(),
        table_source: source.to_string(),
        mass_g,
        threshold_basis: threshold.basis_label().to_string(),
        threshold_value: threshold.value(),
        chosen_class: selection.chosen,
        scan: selection.scan.iter().map(scan_entry).collect(),
    };

    serde_json::to_writer_pretty(file, &rec)
        .map_err(|e| AppError::new(EXIT_EXPORT, format!("Failed to write recommendation JSON: {e}")))?;

    Ok(())
}

fn scan_entry(candidate: &ClassCandidate) -> ScanEntry {
    ScanEntry {
        class: candidate.class,
        mpe_mg: candidate.lookup.value(),
        interpolated: candidate.lookup.is_interpolated(),
        u_std_g: candidate.u_std_g,
        qualifies: candidate.qualifies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo_table;
    use crate::domain::WeightClass;
    use crate::select::select_class;

    #[test]
    fn recommendation_json_round_trips_through_serde() {
        let selection = select_class(&demo_table(), 2000.0, Threshold::MpeMg(60.0));
        let path =
            std::env::temp_dir().join(format!("calw-export-rec-{}.json", std::process::id()));
        write_recommendation_json(
            &path,
            2000.0,
            Threshold::MpeMg(60.0),
            &TableSource::Builtin,
            &selection,
        )
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let rec: RecommendationFile = serde_json::from_str(&contents).unwrap();
        assert_eq!(rec.tool, "calw");
        assert_eq!(rec.chosen_class, Some(WeightClass::E2));
        assert_eq!(rec.scan.len(), selection.scan.len());
        assert_eq!(rec.threshold_basis, "max_mpe_mg");
        assert!(rec.scan[0].qualifies);
    }
}
