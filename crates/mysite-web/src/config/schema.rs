use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use mysite_core::error::{Result, SiteError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub throttle: ThrottleSection,

    #[serde(default)]
    pub permissions: PermissionsSection,

    #[serde(default)]
    pub users: Vec<UserSeed>,
}

impl SiteConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SiteError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.throttle.validate()?;

        let mut usernames = HashSet::new();
        let mut tokens = HashSet::new();
        for u in &self.users {
            if u.username.trim().is_empty() || u.token.trim().is_empty() {
                return Err(SiteError::Config("users[].username and token must not be empty".into()));
            }
            if !usernames.insert(u.username.as_str()) {
                return Err(SiteError::Config(format!("duplicate user: {}", u.username)));
            }
            if !tokens.insert(u.token.as_str()) {
                return Err(SiteError::Config(format!("duplicate token for user: {}", u.username)));
            }
        }

        // Permission names are resolved against the catalog when AppState is built.
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Absolute base URL used for links in the RSS feed.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            public_url: default_public_url(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(self.public_url.starts_with("http://") || self.public_url.starts_with("https://")) {
            return Err(SiteError::Config("server.public_url must be an http(s) URL".into()));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|_| SiteError::Config(format!("server.listen is not a socket address: {}", self.listen)))
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_public_url() -> String {
    "http://localhost:8000".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThrottleSection {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Minimum gap between two accepted requests from one client.
    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: f64,

    /// Tracked-client count above which expired entries are swept inline.
    #[serde(default = "default_max_clients")]
    pub max_clients: usize,

    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Prefer the first `X-Forwarded-For` hop over the peer address.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for ThrottleSection {
    fn default() -> Self {
        Self {
            enabled: true,
            min_interval_secs: default_min_interval_secs(),
            max_clients: default_max_clients(),
            sweep_interval_secs: default_sweep_interval_secs(),
            trust_forwarded_for: false,
        }
    }
}

impl ThrottleSection {
    pub fn validate(&self) -> Result<()> {
        self.min_interval()?;
        if self.max_clients == 0 {
            return Err(SiteError::Config("throttle.max_clients must be at least 1".into()));
        }
        if self.sweep_interval_secs == 0 {
            return Err(SiteError::Config(
                "throttle.sweep_interval_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn min_interval(&self) -> Result<Duration> {
        let secs = self.min_interval_secs;
        if !secs.is_finite() || secs <= 0.0 {
            return Err(SiteError::Config(
                "throttle.min_interval_secs must be a positive number".into(),
            ));
        }
        Duration::try_from_secs_f64(secs)
            .map_err(|e| SiteError::Config(format!("throttle.min_interval_secs: {e}")))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

fn default_true() -> bool {
    true
}
fn default_min_interval_secs() -> f64 {
    2.0
}
fn default_max_clients() -> usize {
    100_000
}
fn default_sweep_interval_secs() -> u64 {
    60
}

/// Permission catalog plus the names each resource kind checks.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionsSection {
    #[serde(default = "default_catalog")]
    pub catalog: Vec<String>,

    #[serde(default = "default_product_rules")]
    pub products: ResourceRules,

    #[serde(default = "default_order_rules")]
    pub orders: ResourceRules,

    #[serde(default = "default_article_rules")]
    pub articles: ResourceRules,
}

impl Default for PermissionsSection {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            products: default_product_rules(),
            orders: default_order_rules(),
            articles: default_article_rules(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceRules {
    /// `None` lets any authenticated subject create.
    #[serde(default)]
    pub create: Option<String>,
    pub edit: String,
    pub delete: String,
}

fn rules(create: Option<&str>, edit: &str, delete: &str) -> ResourceRules {
    ResourceRules {
        create: create.map(str::to_string),
        edit: edit.to_string(),
        delete: delete.to_string(),
    }
}

fn default_catalog() -> Vec<String> {
    [
        "can_create_product",
        "can_edit_product",
        "can_delete_product",
        "can_change_order",
        "can_delete_order",
        "can_create_article",
        "can_edit_article",
        "can_delete_article",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_product_rules() -> ResourceRules {
    rules(Some("can_create_product"), "can_edit_product", "can_delete_product")
}
fn default_order_rules() -> ResourceRules {
    rules(None, "can_change_order", "can_delete_order")
}
fn default_article_rules() -> ResourceRules {
    rules(Some("can_create_article"), "can_edit_article", "can_delete_article")
}

/// Account provisioned at startup. Authentication itself is external; the
/// token is what the external layer hands us.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSeed {
    pub username: String,
    pub token: String,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
}
