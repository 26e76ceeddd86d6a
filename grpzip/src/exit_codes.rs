#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// One or more checks failed.
    ChecksFailed = 10,

    /// Invalid CLI/proto/method input (bad flags, proto compile failure,
    /// unknown method or field).
    InvalidInput = 30,

    /// Internal/runtime error (connect failures, transport errors, IO).
    RuntimeError = 40,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn from_checks(checks_failed: bool) -> Self {
        if checks_failed {
            Self::ChecksFailed
        } else {
            Self::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_gate_mapping() {
        assert_eq!(ExitCode::from_checks(false), ExitCode::Success);
        assert_eq!(ExitCode::from_checks(true), ExitCode::ChecksFailed);
        assert_eq!(ExitCode::ChecksFailed.as_i32(), 10);
        assert_eq!(ExitCode::InvalidInput.as_i32(), 30);
        assert_eq!(ExitCode::RuntimeError.as_i32(), 40);
    }
}
