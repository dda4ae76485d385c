//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during lookup and selection
//! - exported to CSV/JSON
//! - reloaded later for comparisons

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OIML R111 accuracy class, declared tightest (E1) to loosest (M3).
///
/// E1 is representable because external tables may carry an `E1` column, but
/// the built-in demo table lists no E1 values and selection never scans it
/// (see [`SCAN_ORDER`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightClass {
    E1,
    E2,
    F1,
    F2,
    M1,
    M2,
    M3,
}

impl WeightClass {
    /// Number of classes, for per-class row storage.
    pub const COUNT: usize = 7;

    /// All classes in declaration order (tightest first).
    pub const ALL: [WeightClass; 7] = [
        WeightClass::E1,
        WeightClass::E2,
        WeightClass::F1,
        WeightClass::F2,
        WeightClass::M1,
        WeightClass::M2,
        WeightClass::M3,
    ];

    /// Class label as it appears in table headers and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            WeightClass::E1 => "E1",
            WeightClass::E2 => "E2",
            WeightClass::F1 => "F1",
            WeightClass::F2 => "F2",
            WeightClass::M1 => "M1",
            WeightClass::M2 => "M2",
            WeightClass::M3 => "M3",
        }
    }

    /// Parse a table header label, case-insensitively.
    pub fn from_label(label: &str) -> Option<WeightClass> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(label.trim()))
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for WeightClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `pad` keeps width specifiers working in aligned report output.
        f.pad(self.as_str())
    }
}

/// Selection precedence: the exact order in which classes are scanned.
///
/// The scan starts at E2 and the first class whose MPE meets the threshold
/// wins. This strict precedence is part of the tool's contract; it is not a
/// "nearest fit" search. E1 is intentionally absent from the scan.
pub const SCAN_ORDER: [WeightClass; 6] = [
    WeightClass::E2,
    WeightClass::F1,
    WeightClass::F2,
    WeightClass::M1,
    WeightClass::M2,
    WeightClass::M3,
];

/// One table row: a nominal mass and the per-class MPE values (mg).
///
/// A missing value means the class is not applicable at this mass. That is
/// distinct from zero and stays distinct through lookup and interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct MpeRow {
    pub mass_g: f64,
    mpe_mg: [Option<f64>; WeightClass::COUNT],
}

impl MpeRow {
    pub fn new(mass_g: f64) -> Self {
        Self {
            mass_g,
            mpe_mg: [None; WeightClass::COUNT],
        }
    }

    pub fn set(&mut self, class: WeightClass, mpe_mg: f64) {
        self.mpe_mg[class.index()] = Some(mpe_mg);
    }

    pub fn get(&self, class: WeightClass) -> Option<f64> {
        self.mpe_mg[class.index()]
    }

    /// Iterate the classes listed at this mass, in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = (WeightClass, f64)> + '_ {
        WeightClass::ALL
            .into_iter()
            .filter_map(|c| self.get(c).map(|v| (c, v)))
    }
}

/// Immutable MPE table, sorted ascending by nominal mass.
///
/// Loaded once per invocation (built-in demo or external CSV) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MpeTable {
    rows: Vec<MpeRow>,
}

impl MpeTable {
    /// Build a table from rows in any order.
    ///
    /// Rows are sorted by mass; a repeated mass replaces the earlier row.
    pub fn from_rows(mut rows: Vec<MpeRow>) -> Self {
        rows.sort_by(|a, b| a.mass_g.total_cmp(&b.mass_g));
        let mut deduped: Vec<MpeRow> = Vec::with_capacity(rows.len());
        for row in rows {
            if deduped.last().is_some_and(|prev| prev.mass_g == row.mass_g) {
                deduped.pop();
            }
            deduped.push(row);
        }
        Self { rows: deduped }
    }

    pub fn rows(&self) -> &[MpeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Smallest and largest tabulated mass (g).
    pub fn mass_range(&self) -> Option<(f64, f64)> {
        let first = self.rows.first()?;
        let last = self.rows.last()?;
        Some((first.mass_g, last.mass_g))
    }

    /// The row whose nominal mass equals `mass_g` exactly.
    pub fn row_at(&self, mass_g: f64) -> Option<&MpeRow> {
        let i = self.rows.partition_point(|r| r.mass_g < mass_g);
        self.rows.get(i).filter(|r| r.mass_g == mass_g)
    }

    /// The pair of rows `(lo, hi)` with `lo.mass_g < mass_g <= hi.mass_g`.
    ///
    /// Returns `None` when the mass falls outside the table range, or when it
    /// equals the smallest tabulated mass (there is no row below to pair it
    /// with). Interpolation never extrapolates.
    pub fn bracket(&self, mass_g: f64) -> Option<(&MpeRow, &MpeRow)> {
        let (min, max) = self.mass_range()?;
        if mass_g < min || mass_g > max {
            return None;
        }
        let i = self.rows.partition_point(|r| r.mass_g < mass_g);
        if i == 0 || i == self.rows.len() {
            return None;
        }
        Some((&self.rows[i - 1], &self.rows[i]))
    }
}

/// Where the active MPE table came from (for reporting).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// The built-in demo table with illustrative values.
    Builtin,
    /// An external CSV supplied via `--table`.
    Csv(PathBuf),
}

impl std::fmt::Display for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSource::Builtin => f.write_str("builtin demo table"),
            TableSource::Csv(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Error threshold for class selection. Exactly one basis per query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Direct bound on the weight's MPE (mg).
    MpeMg(f64),
    /// Bound on the standard uncertainty contributed by the weight (g).
    ///
    /// MPE values are converted with a rectangular-distribution assumption
    /// before the comparison.
    StdG(f64),
}

impl Threshold {
    /// Does a weight with the given MPE (mg) meet this threshold?
    pub fn admits(self, mpe_mg: f64) -> bool {
        match self {
            Threshold::MpeMg(limit) => mpe_mg <= limit,
            Threshold::StdG(limit) => crate::math::rectangular_std_g(mpe_mg) <= limit,
        }
    }

    /// Basis name used in exports.
    pub fn basis_label(self) -> &'static str {
        match self {
            Threshold::MpeMg(_) => "max_mpe_mg",
            Threshold::StdG(_) => "max_std_g",
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Threshold::MpeMg(v) | Threshold::StdG(v) => v,
        }
    }

    /// Human-readable basis + value, e.g. `max_std_g=0.001443 g`.
    pub fn describe(self) -> String {
        match self {
            Threshold::MpeMg(v) => format!("max_mpe_mg={v:.6} mg"),
            Threshold::StdG(v) => format!("max_std_g={v:.6} g"),
        }
    }
}

/// Minimum-mass run parameters, validated from CLI flags.
#[derive(Debug, Clone)]
pub struct MinMassConfig {
    /// Balance repeatability standard deviation s (g).
    pub repeatability_g: f64,
    /// Balance readability / scale division d (g), when known.
    pub resolution_g: Option<f64>,
    /// Coverage factor k.
    pub coverage_k: f64,
    /// Target relative uncertainty (0.001 = 0.1%).
    pub target_rel: f64,
    /// Whether the resolution quantization term enters the combination.
    pub include_resolution: bool,
}

/// Class-selection run parameters, validated from CLI flags.
#[derive(Debug, Clone)]
pub struct ClassConfig {
    /// Nominal mass of the standard weight (g).
    pub mass_g: f64,
    pub threshold: Threshold,
    /// External table CSV; the built-in demo table when absent.
    pub table_path: Option<PathBuf>,
    pub export_scan: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// A saved recommendation file (JSON).
///
/// The portable record of a selection run: the query, where the table came
/// from, the chosen class, and the full per-class scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationFile {
    pub tool: String,
    pub generated_on: NaiveDate,
    pub table_source: String,
    pub mass_g: f64,
    pub threshold_basis: String,
    pub threshold_value: f64,
    pub chosen_class: Option<WeightClass>,
    pub scan: Vec<ScanEntry>,
}

/// One scanned class in a [`RecommendationFile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEntry {
    pub class: WeightClass,
    /// Absent when the class has no value at the queried mass.
    pub mpe_mg: Option<f64>,
    pub interpolated: bool,
    /// Rectangular-distribution standard uncertainty (g), when available.
    pub u_std_g: Option<f64>,
    pub qualifies: bool,
}
