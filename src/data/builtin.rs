//! Built-in demo MPE table.
//!
//! Illustrative values spanning 1 g to 50 kg for classes E2 through M3.
//! E1 deliberately has no listed values at these masses and stays absent
//! throughout, never zero. For real planning work, supply an official
//! OIML R111 table via `--table`.

use crate::domain::{MpeRow, MpeTable, WeightClass};

/// Classes covered by the demo rows, in column order.
const DEMO_CLASSES: [WeightClass; 6] = [
    WeightClass::E2,
    WeightClass::F1,
    WeightClass::F2,
    WeightClass::M1,
    WeightClass::M2,
    WeightClass::M3,
];

/// Demo MPE values (mg): nominal mass plus E2, F1, F2, M1, M2, M3.
const DEMO_ROWS: [(f64, [f64; 6]); 15] = [
    (1.0, [1.0, 3.0, 10.0, 50.0, 150.0, 500.0]),
    (2.0, [1.2, 3.5, 12.0, 60.0, 180.0, 600.0]),
    (5.0, [1.5, 4.0, 15.0, 75.0, 225.0, 750.0]),
    (10.0, [2.0, 5.0, 20.0, 100.0, 300.0, 1000.0]),
    (20.0, [3.0, 8.0, 30.0, 150.0, 450.0, 1500.0]),
    (50.0, [5.0, 12.0, 50.0, 250.0, 750.0, 2500.0]),
    (100.0, [8.0, 20.0, 80.0, 400.0, 1200.0, 4000.0]),
    (200.0, [12.0, 30.0, 120.0, 600.0, 1800.0, 6000.0]),
    (500.0, [20.0, 50.0, 200.0, 1000.0, 3000.0, 10000.0]),
    (1000.0, [30.0, 80.0, 300.0, 1500.0, 4500.0, 15000.0]),
    (2000.0, [50.0, 120.0, 500.0, 2500.0, 7500.0, 25000.0]),
    (5000.0, [80.0, 200.0, 800.0, 4000.0, 12000.0, 40000.0]),
    (10000.0, [120.0, 300.0, 1200.0, 6000.0, 18000.0, 60000.0]),
    (20000.0, [200.0, 500.0, 2000.0, 10000.0, 30000.0, 100000.0]),
    (50000.0, [300.0, 800.0, 3000.0, 15000.0, 45000.0, 150000.0]),
];

/// Build the demo table.
pub fn demo_table() -> MpeTable {
    let rows = DEMO_ROWS
        .iter()
        .map(|&(mass_g, values)| {
            let mut row = MpeRow::new(mass_g);
            for (class, mpe_mg) in DEMO_CLASSES.into_iter().zip(values) {
                row.set(class, mpe_mg);
            }
            row
        })
        .collect();
    MpeTable::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_table_shape() {
        let table = demo_table();
        assert_eq!(table.len(), 15);
        assert_eq!(table.mass_range(), Some((1.0, 50_000.0)));
    }

    #[test]
    fn demo_table_spot_values() {
        let table = demo_table();
        let row = table.row_at(2000.0).unwrap();
        assert_eq!(row.get(WeightClass::E2), Some(50.0));
        assert_eq!(row.get(WeightClass::F1), Some(120.0));
        assert_eq!(row.get(WeightClass::M3), Some(25_000.0));
    }

    #[test]
    fn demo_table_lists_no_e1_values() {
        let table = demo_table();
        assert!(table.rows().iter().all(|r| r.get(WeightClass::E1).is_none()));
    }

    #[test]
    fn demo_table_masses_strictly_increase() {
        let table = demo_table();
        for pair in table.rows().windows(2) {
            assert!(pair[0].mass_g < pair[1].mass_g);
        }
    }
}
