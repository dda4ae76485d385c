//! Process-level error type with stable exit codes.
//!
//! Every failure mode gets its own exit code so scripts can tell them apart.
//! Domain outcomes that are answers rather than failures ("no class
//! qualifies", "mass outside the table range") exit 0.

/// The MPE table could not be read or parsed.
pub const EXIT_TABLE_FORMAT: u8 = 1;
/// Minimum-mass parameters incomplete or invalid.
pub const EXIT_MIN_MASS_USAGE: u8 = 2;
/// Class-selection parameters incomplete.
pub const EXIT_CLASS_USAGE: u8 = 3;
/// `--tur` given without its balance prerequisites, or non-positive.
pub const EXIT_TUR_USAGE: u8 = 4;
/// Threshold basis absent or ambiguous.
pub const EXIT_THRESHOLD_USAGE: u8 = 5;
/// An export file could not be written.
pub const EXIT_EXPORT: u8 = 6;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
