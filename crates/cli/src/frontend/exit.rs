use engine::EngineError;

/// Outcome classes reported through the process exit code.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum ExitStatus {
    /// Every input was hashed.
    Success,
    /// Hashing succeeded but a digest differed from the `-e` value.
    Mismatch,
    /// Bad arguments, unknown algorithms, nothing to do.
    Usage,
    /// Some inputs could not be found or read; the rest were hashed.
    Partial,
    /// An internal failure (stalled stream, panicked thread).
    Fatal,
}

impl ExitStatus {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Usage => 1,
            Self::Partial => 2,
            Self::Fatal => 3,
            Self::Mismatch => 4,
        }
    }

    /// Classifies an engine failure.
    #[must_use]
    pub const fn from_engine_error(error: &EngineError) -> Self {
        if error.is_setup() {
            Self::Usage
        } else if error.is_internal() {
            Self::Fatal
        } else {
            Self::Partial
        }
    }
}
