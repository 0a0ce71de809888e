//! Process exit codes for `check_bn_tests`
//! Scripts depend on these values; keep them stable.

pub const SUCCESS: i32 = 0;
pub const OPEN_FAILED: i32 = 1; // Input file could not be opened
pub const USAGE: i32 = 2; // Argument error, reported by clap
pub const SCAN_FAILED: i32 = 3; // Fatal scan error stopped the run
pub const STRICT_DIAGNOSTICS: i32 = 4; // --strict and at least one non-fatal diagnostic
pub const SUMMARY_FAILED: i32 = 5; // --summary file could not be written
