//! Domain types used throughout the tool.
//!
//! This module defines:
//!
//! - the accuracy classes and their fixed scan order (`WeightClass`, `SCAN_ORDER`)
//! - the in-memory MPE table (`MpeTable`, `MpeRow`)
//! - threshold bases and per-mode run configs (`Threshold`, `MinMassConfig`, `ClassConfig`)
//! - the recommendation export schema (`RecommendationFile`)

pub mod types;

pub use types::*;
