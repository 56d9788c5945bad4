//! Report conventions shared by both checkers

/// Exit code when every check passed (or there was nothing to check)
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when at least one check failed
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for usage errors, such as a missing argument
pub const EXIT_USAGE: i32 = 2;

/// Overall status of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Passed,
    Failed,
}

impl Status {
    /// Derive the status from a failure count.
    pub fn from_failures(failed: usize) -> Self {
        if failed > 0 { Self::Failed } else { Self::Passed }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Self::Passed => EXIT_SUCCESS,
            Self::Failed => EXIT_FAILURE,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Passed
    }
}
