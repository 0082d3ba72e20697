//! AffinityErrorCode trait for host-facing error strings.

/// Every error enum implements this to give hosts a stable code
/// alongside the human-readable message.
pub trait AffinityErrorCode {
    /// Returns the stable error code string (e.g., "CATALOG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted host string: `[ERROR_CODE] message`.
    fn host_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CATALOG_ERROR: &str = "CATALOG_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const ANALYSIS_ERROR: &str = "ANALYSIS_ERROR";
pub const ANALYSIS_PANIC: &str = "ANALYSIS_PANIC";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
pub const CANCELLED: &str = "CANCELLED";
