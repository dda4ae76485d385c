//! Input/output helpers.
//!
//! - MPE table CSV ingest + validation (`ingest`)
//! - scan breakdown export (CSV) (`export`)
//! - recommendation JSON write (`recommendation`)

pub mod export;
pub mod ingest;
pub mod recommendation;

pub use export::*;
pub use ingest::*;
pub use recommendation::*;
