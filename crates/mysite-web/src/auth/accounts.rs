use std::collections::BTreeSet;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use mysite_core::error::{Result, SiteError};
use mysite_core::subject::{Subject, SubjectId};

const USERNAME_MAX: usize = 150;

/// Resolves an opaque credential to the acting subject.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<Subject>;
}

/// Attributes of an account to create. The id is assigned by the registry.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub username: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub permissions: BTreeSet<String>,
}

impl NewAccount {
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }
}

/// In-memory account registry:
/// - `id -> Subject`
/// - `token -> id`
/// - `username -> id`
#[derive(Default)]
pub struct Accounts {
    subjects: DashMap<SubjectId, Subject>,
    tokens: DashMap<String, SubjectId>,
    usernames: DashMap<String, SubjectId>,
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a subject under a fresh id. `token` defaults to a random one.
    pub fn create(&self, account: NewAccount, token: Option<String>) -> Result<(Subject, String)> {
        validate_username(&account.username)?;

        let id = SubjectId::new(Uuid::new_v4().to_string());
        match self.usernames.entry(account.username.clone()) {
            Entry::Occupied(_) => {
                return Err(SiteError::Conflict(format!(
                    "username already taken: {}",
                    account.username
                )))
            }
            Entry::Vacant(v) => {
                v.insert(id.clone());
            }
        }

        let token = token.unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let subject = Subject {
            id: id.clone(),
            username: account.username,
            is_superuser: account.is_superuser,
            is_staff: account.is_staff,
            permissions: account.permissions,
        };
        self.subjects.insert(id.clone(), subject.clone());
        self.tokens.insert(token.clone(), id);
        Ok((subject, token))
    }

    pub fn get(&self, id: &SubjectId) -> Option<Subject> {
        self.subjects.get(id).map(|r| r.value().clone())
    }

    pub fn by_username(&self, username: &str) -> Option<Subject> {
        let id = self.usernames.get(username)?.value().clone();
        self.get(&id)
    }

    pub fn username_of(&self, id: &SubjectId) -> Option<String> {
        self.subjects.get(id).map(|r| r.value().username.clone())
    }

    /// Add then remove grants. Names are expected to be checked by the caller.
    pub fn update_permissions(
        &self,
        username: &str,
        grant: &BTreeSet<String>,
        revoke: &BTreeSet<String>,
    ) -> Result<Subject> {
        let id = self
            .usernames
            .get(username)
            .map(|r| r.value().clone())
            .ok_or_else(|| SiteError::NotFound(format!("user {username}")))?;
        let mut subject = self
            .subjects
            .get_mut(&id)
            .ok_or_else(|| SiteError::NotFound(format!("user {username}")))?;
        subject.permissions.extend(grant.iter().cloned());
        subject.permissions.retain(|p| !revoke.contains(p));
        Ok(subject.clone())
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

#[async_trait]
impl Authenticator for Accounts {
    async fn authenticate(&self, token: &str) -> Result<Subject> {
        let id = self
            .tokens
            .get(token)
            .map(|r| r.value().clone())
            .ok_or(SiteError::Unauthenticated)?;
        self.get(&id).ok_or(SiteError::Unauthenticated)
    }
}

/// Letters, digits and `@.+-_`, at most 150 characters.
fn validate_username(name: &str) -> Result<()> {
    let ok = !name.is_empty()
        && name.chars().count() <= USERNAME_MAX
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if ok {
        Ok(())
    } else {
        Err(SiteError::BadRequest(format!("invalid username: {name:?}")))
    }
}
