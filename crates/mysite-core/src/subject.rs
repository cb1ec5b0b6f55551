//! Acting principals.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque subject identity, compared for ownership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that acts as a principal and can be shown by name.
///
/// Principal types implement this once; callers never probe which naming
/// field a given principal happens to carry.
pub trait NamedSubject {
    fn subject_id(&self) -> &SubjectId;
    fn display_name(&self) -> &str;
}

/// Authenticated principal attempting an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub id: SubjectId,
    pub username: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    /// Granted permission names.
    pub permissions: BTreeSet<String>,
}

impl Subject {
    /// Plain account with no role flags and no grants.
    pub fn new(id: SubjectId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            is_superuser: false,
            is_staff: false,
            permissions: BTreeSet::new(),
        }
    }

    pub fn with_permissions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    pub fn staff(mut self) -> Self {
        self.is_staff = true;
        self
    }

    /// Raw grant lookup. Superuser status is not considered here.
    pub fn holds(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Staff and superusers see every record of a listing, not only their own.
    pub fn sees_all(&self) -> bool {
        self.is_superuser || self.is_staff
    }
}

impl NamedSubject for Subject {
    fn subject_id(&self) -> &SubjectId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.username
    }
}
