//! Built-in MPE table data.

pub mod builtin;

pub use builtin::*;
