#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The run completed its scheduled duration and produced a report,
    /// regardless of how many requests failed.
    Success = 0,

    /// Invalid CLI/config input (bad flags, non-positive rate or duration,
    /// empty endpoint set, malformed target URL).
    InvalidInput = 30,

    /// Internal/runtime error (IO errors, unexpected invariants).
    RuntimeError = 40,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
