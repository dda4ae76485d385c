//! Threshold scan over the class precedence order.

use crate::domain::{MpeTable, SCAN_ORDER, Threshold, WeightClass};
use crate::math::rectangular_std_g;
use crate::select::lookup::{MpeLookup, mpe_for};

/// One scanned class with its lookup outcome and threshold verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassCandidate {
    pub class: WeightClass,
    pub lookup: MpeLookup,
    /// Rectangular-distribution standard uncertainty (g), when available.
    pub u_std_g: Option<f64>,
    pub qualifies: bool,
}

/// Scan result: the first qualifying class plus the full per-class scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSelection {
    pub chosen: Option<WeightClass>,
    pub scan: Vec<ClassCandidate>,
}

/// Pick the first class in [`SCAN_ORDER`] whose MPE meets `threshold`.
///
/// Classes without a value at `mass_g` are skipped, not failed. "No class
/// qualifies" is reported through `chosen: None`; it is a computed answer,
/// not an error. The full scan is kept for the diagnostic report and the
/// exports.
pub fn select_class(table: &MpeTable, mass_g: f64, threshold: Threshold) -> ClassSelection {
    let mut chosen = None;
    let mut scan = Vec::with_capacity(SCAN_ORDER.len());

    for class in SCAN_ORDER {
        let lookup = mpe_for(table, mass_g, class);
        let u_std_g = lookup.value().map(rectangular_std_g);
        let qualifies = lookup.value().is_some_and(|mpe_mg| threshold.admits(mpe_mg));
        if qualifies && chosen.is_none() {
            chosen = Some(class);
        }
        scan.push(ClassCandidate {
            class,
            lookup,
            u_std_g,
            qualifies,
        });
    }

    ClassSelection { chosen, scan }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo_table;
    use crate::domain::{MpeRow, MpeTable};

    #[test]
    fn first_qualifying_class_in_scan_order_wins() {
        // At 2000 g: E2=50, F1=120. A 60 mg bound admits E2 and rejects F1,
        // and E2 comes first in the scan.
        let selection = select_class(&demo_table(), 2000.0, Threshold::MpeMg(60.0));
        assert_eq!(selection.chosen, Some(WeightClass::E2));

        let f1 = &selection.scan[1];
        assert_eq!(f1.class, WeightClass::F1);
        assert_eq!(f1.lookup, MpeLookup::Tabulated(120.0));
        assert!(!f1.qualifies);
    }

    #[test]
    fn std_threshold_converts_rectangularly() {
        // E2 at 2000 g is 50 mg -> u = 0.05/sqrt(3) ~ 0.0289 g.
        let selection = select_class(&demo_table(), 2000.0, Threshold::StdG(0.05));
        assert_eq!(selection.chosen, Some(WeightClass::E2));

        let e2 = &selection.scan[0];
        let u = e2.u_std_g.unwrap();
        assert!((u - 0.05 / 3.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn no_class_qualifies_is_a_normal_outcome() {
        let selection = select_class(&demo_table(), 2000.0, Threshold::StdG(1e-9));
        assert_eq!(selection.chosen, None);
        assert!(selection.scan.iter().all(|c| !c.qualifies));
        // Every scanned class had a value; none qualified.
        assert!(selection.scan.iter().all(|c| c.lookup.value().is_some()));
    }

    #[test]
    fn out_of_range_mass_yields_no_candidates() {
        let selection = select_class(&demo_table(), 100_000.0, Threshold::MpeMg(f64::MAX));
        assert_eq!(selection.chosen, None);
        assert!(
            selection
                .scan
                .iter()
                .all(|c| c.lookup == MpeLookup::NotAvailable)
        );
    }

    #[test]
    fn unavailable_classes_are_skipped_not_failed() {
        // Only F1 is listed at the bracketing masses; E2 must be skipped and
        // F1 chosen even though E2 precedes it.
        let mut lo = MpeRow::new(100.0);
        lo.set(WeightClass::F1, 20.0);
        let mut hi = MpeRow::new(200.0);
        hi.set(WeightClass::F1, 30.0);
        let table = MpeTable::from_rows(vec![lo, hi]);

        let selection = select_class(&table, 150.0, Threshold::MpeMg(1000.0));
        assert_eq!(selection.chosen, Some(WeightClass::F1));
        assert_eq!(selection.scan[0].lookup, MpeLookup::NotAvailable);
    }

    #[test]
    fn interpolated_values_feed_the_threshold_check() {
        // 1414 g is between the 1000 g and 2000 g keys; E2 interpolates to
        // roughly 38.7 mg and qualifies first under a 100 mg bound.
        let selection = select_class(&demo_table(), 1414.0, Threshold::MpeMg(100.0));
        assert_eq!(selection.chosen, Some(WeightClass::E2));
        assert!(selection.scan[0].lookup.is_interpolated());
    }
}
