/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
}

impl BuildMetadata {
    /// Single-line summary printed by `version`.
    pub fn summary(&self) -> String {
        format!(
            "support_enforcement {} ({} {}, built {})",
            self.version, self.git_hash, self.git_status, self.timestamp
        )
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("SUPPORT_ENFORCEMENT_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("SUPPORT_ENFORCEMENT_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("SUPPORT_ENFORCEMENT_BUILD_TIMESTAMP").unwrap_or("unknown"),
    }
}
