//! Ownership-based mutation policy.

use crate::error::{Result, SiteError};
use crate::subject::{Subject, SubjectId};

use super::catalog::Permission;

/// A resource with exactly one owner, fixed at creation.
pub trait Owned {
    fn owner(&self) -> &SubjectId;
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Permit,
    Deny,
}

impl AccessDecision {
    pub fn is_permit(self) -> bool {
        matches!(self, AccessDecision::Permit)
    }

    /// Turn a deny into `SiteError::Forbidden` naming the attempted action.
    pub fn or_forbidden(self, action: &str) -> Result<()> {
        match self {
            AccessDecision::Permit => Ok(()),
            AccessDecision::Deny => Err(SiteError::Forbidden(format!("not allowed to {action}"))),
        }
    }
}

impl From<bool> for AccessDecision {
    fn from(permit: bool) -> Self {
        if permit {
            AccessDecision::Permit
        } else {
            AccessDecision::Deny
        }
    }
}

/// Edit/delete on an existing resource.
///
/// Superusers are always permitted. Anyone else needs both the named grant
/// and ownership of the resource.
pub fn can_mutate<R>(subject: &Subject, resource: &R, permission: &Permission) -> AccessDecision
where
    R: Owned + ?Sized,
{
    if subject.is_superuser {
        return AccessDecision::Permit;
    }
    (subject.holds(permission.as_str()) && subject.id == *resource.owner()).into()
}

/// Create a new resource (no instance yet, so no ownership check).
///
/// `permission` is `None` for resource kinds any authenticated subject may
/// create. Anonymous callers are always denied.
pub fn can_create(subject: Option<&Subject>, permission: Option<&Permission>) -> AccessDecision {
    let Some(subject) = subject else {
        return AccessDecision::Deny;
    };
    if subject.is_superuser {
        return AccessDecision::Permit;
    }
    match permission {
        None => AccessDecision::Permit,
        Some(p) => subject.holds(p.as_str()).into(),
    }
}
