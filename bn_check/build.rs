// build.rs - TOML-driven constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    scanner: ScannerLimits,
    verification: VerificationLimits,
    diagnostics: DiagnosticLimits,
}

#[derive(serde::Deserialize)]
struct ScannerLimits {
    read_buffer_capacity: usize,
}

#[derive(serde::Deserialize)]
struct VerificationLimits {
    max_shift_bits: u64,
}

#[derive(serde::Deserialize)]
struct DiagnosticLimits {
    max_memory_diagnostics: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=BN_CHECK_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=BN_CHECK_CONFIG_DIR");

    let profile = env::var("BN_CHECK_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("BN_CHECK_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of bn_check directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    // 2^32 bits is a 512 MiB result; anything larger cannot be a real test vector
    const ABSOLUTE_MAX_SHIFT_BITS: u64 = 1 << 32;
    const ABSOLUTE_MAX_MEMORY_DIAGNOSTICS: usize = 1_000_000;

    if config.verification.max_shift_bits > ABSOLUTE_MAX_SHIFT_BITS {
        panic!("LIMITS: max_shift_bits exceeds absolute maximum");
    }

    if config.diagnostics.max_memory_diagnostics == 0
        || config.diagnostics.max_memory_diagnostics > ABSOLUTE_MAX_MEMORY_DIAGNOSTICS
    {
        panic!("LIMITS: max_memory_diagnostics must be between 1 and 1000000");
    }

    if config.scanner.read_buffer_capacity < 512 {
        panic!("LIMITS: read_buffer_capacity must be at least 512 bytes");
    }

    if profile == "production" && config.verification.max_shift_bits > 1 << 24 {
        panic!("PRODUCTION: max_shift_bits too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod scanner {{
        pub const READ_BUFFER_CAPACITY: usize = {};
    }}

    pub mod verification {{
        pub const MAX_SHIFT_BITS: u64 = {};
    }}

    pub mod diagnostics {{
        pub const MAX_MEMORY_DIAGNOSTICS: usize = {};
    }}
}}
"#,
        profile,
        config.scanner.read_buffer_capacity,
        config.verification.max_shift_bits,
        config.diagnostics.max_memory_diagnostics,
    );

    fs::write(output_path, constants_code).unwrap();
}
