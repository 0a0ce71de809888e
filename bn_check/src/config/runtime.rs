// RUNTIME PREFERENCES (User Experience)

use super::compile_time::verification::MAX_SHIFT_BITS;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPreferences {
    /// Whether non-fatal diagnostics should make the run fail
    pub strict_exit_status: bool,

    /// Largest shift amount handed to the arithmetic engine.
    /// Clamped to the compile-time ceiling.
    pub max_shift_bits: u64,
}

impl CheckPreferences {
    /// Build preferences from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            strict_exit_status: lookup(env_vars::STRICT)
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),
            max_shift_bits: lookup(env_vars::MAX_SHIFT_BITS)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(clamp_shift_bits)
                .unwrap_or(MAX_SHIFT_BITS),
        }
    }

    /// Override the strict exit status preference
    pub fn with_strict_exit_status(mut self, strict: bool) -> Self {
        self.strict_exit_status = strict;
        self
    }

    /// Override the shift ceiling (never above the compile-time ceiling)
    pub fn with_max_shift_bits(mut self, bits: u64) -> Self {
        self.max_shift_bits = clamp_shift_bits(bits);
        self
    }
}

impl Default for CheckPreferences {
    fn default() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }
}

/// Keep user-supplied shift ceilings inside the compile-time bound
pub fn clamp_shift_bits(bits: u64) -> u64 {
    bits.min(MAX_SHIFT_BITS)
}

/// Parse boolean flags from environment variables
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const STRICT: &str = "BN_CHECK_STRICT";
    pub const MAX_SHIFT_BITS: &str = "BN_CHECK_MAX_SHIFT_BITS";
}
