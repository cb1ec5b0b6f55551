//! Permission catalog compilation and lookup.
//!
//! A [`Permission`] can only be obtained through [`PermissionCatalog::resolve`],
//! so a route holding one is guaranteed to check a name that exists.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SiteError};

/// A permission name known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission(Arc<str>);

impl Permission {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compiled set of permission names.
#[derive(Debug, Clone, Default)]
pub struct PermissionCatalog {
    names: BTreeSet<Arc<str>>,
}

impl PermissionCatalog {
    /// Compile raw names. Rejects empty, duplicate and malformed entries.
    pub fn compile(raw: &[String]) -> Result<Self> {
        let mut names = BTreeSet::new();
        for s in raw {
            // format: lowercase ascii, digits, '_' and '.'
            let ok = !s.is_empty()
                && s
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.');
            if !ok {
                return Err(SiteError::Config(format!("invalid permission name: {s:?}")));
            }
            if !names.insert(Arc::<str>::from(s.as_str())) {
                return Err(SiteError::Config(format!("duplicate permission name: {s}")));
            }
        }
        tracing::debug!(count = names.len(), "permission catalog compiled");
        Ok(Self { names })
    }

    /// Look up a configured name. Unknown names are configuration errors.
    pub fn resolve(&self, name: &str) -> Result<Permission> {
        self.names
            .get(name)
            .map(|n| Permission(Arc::clone(n)))
            .ok_or_else(|| SiteError::Config(format!("undefined permission: {name}")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_ref())
    }
}
