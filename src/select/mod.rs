//! MPE lookup and accuracy-class selection.
//!
//! - per-class table lookup with log-log interpolation (`lookup`)
//! - threshold scan over the class precedence order (`class`)

pub mod class;
pub mod lookup;

pub use class::*;
pub use lookup::*;
