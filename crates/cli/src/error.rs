//! CLI exit codes.
//!
//! The process exits `0` on success and `1` otherwise. The variants keep the
//! reason distinguishable inside the binary even though they share a code.

/// Why the process is exiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The run finished and every phase succeeded.
    Success,

    /// The run finished with a failure outcome or hit an unexpected error.
    RunFailed,

    /// Environment, flags or telemetry setup were invalid.
    ConfigError,

    /// Ctrl+C arrived before the run finished.
    Interrupted,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        match self {
            ExitCode::Success => 0,
            ExitCode::RunFailed | ExitCode::ConfigError | ExitCode::Interrupted => 1,
        }
    }
}

impl From<&animal_etl_pipeline::RunReport> for ExitCode {
    fn from(report: &animal_etl_pipeline::RunReport) -> Self {
        if report.is_success() {
            ExitCode::Success
        } else {
            ExitCode::RunFailed
        }
    }
}
