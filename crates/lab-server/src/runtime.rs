//! Static identifiers describing the platform and toolchain.

/// Application version reported by the health endpoint.
pub const APP_VERSION: &str = "1.0.0";

/// Compiler version string captured at build time, e.g. `rustc 1.85.0 (...)`.
pub const RUST_VERSION: &str = env!("LAB_SERVER_RUSTC_VERSION");

/// Operating system identifier (`linux`, `macos`, `windows`, ...).
pub fn platform() -> &'static str {
    std::env::consts::OS
}

/// CPU architecture identifier (`x86_64`, `aarch64`, ...).
pub fn architecture() -> &'static str {
    std::env::consts::ARCH
}
