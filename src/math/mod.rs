//! Mathematical utilities: uncertainty combination and log-log interpolation.

pub mod interp;
pub mod uncertainty;

pub use interp::*;
pub use uncertainty::*;
