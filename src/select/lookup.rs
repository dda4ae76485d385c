//! Per-class MPE lookup over a table.

use crate::domain::{MpeTable, WeightClass};
use crate::math::interp;

/// Outcome of an MPE lookup at a queried mass.
///
/// "Not available" is a normal domain result (mass outside the table range,
/// or the class has no value at the bracketing masses), not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MpeLookup {
    /// The queried mass is a table key and the class is listed there.
    Tabulated(f64),
    /// Log-log interpolation between the bracketing rows.
    Interpolated(f64),
    /// No value can be produced without extrapolating or substituting classes.
    NotAvailable,
}

impl MpeLookup {
    pub fn value(self) -> Option<f64> {
        match self {
            MpeLookup::Tabulated(v) | MpeLookup::Interpolated(v) => Some(v),
            MpeLookup::NotAvailable => None,
        }
    }

    pub fn is_interpolated(self) -> bool {
        matches!(self, MpeLookup::Interpolated(_))
    }
}

/// Look up the MPE (mg) for `class` at `mass_g`.
///
/// Exact table hits are returned verbatim. Otherwise the mass must fall
/// inside the table range and both bracketing rows must list the class;
/// there is no extrapolation and no cross-class substitution.
pub fn mpe_for(table: &MpeTable, mass_g: f64, class: WeightClass) -> MpeLookup {
    if let Some(row) = table.row_at(mass_g) {
        if let Some(v) = row.get(class) {
            return MpeLookup::Tabulated(v);
        }
    }

    let Some((lo, hi)) = table.bracket(mass_g) else {
        return MpeLookup::NotAvailable;
    };
    let (Some(y0), Some(y1)) = (lo.get(class), hi.get(class)) else {
        return MpeLookup::NotAvailable;
    };

    MpeLookup::Interpolated(interp::log_log(lo.mass_g, y0, hi.mass_g, y1, mass_g))
}
