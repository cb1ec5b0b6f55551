//! Site config loader (strict parsing).

pub mod schema;

use std::fs;

use mysite_core::error::{Result, SiteError};

pub use schema::{
    PermissionsSection, ResourceRules, ServerSection, SiteConfig, ThrottleSection, UserSeed,
};

/// Environment variable overriding the config path.
pub const CONFIG_ENV: &str = "MYSITE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "mysite.yaml";

pub fn load_from_file(path: &str) -> Result<SiteConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| SiteError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<SiteConfig> {
    let cfg: SiteConfig = serde_yaml::from_str(s)
        .map_err(|e| SiteError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
