use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::subject::SubjectId;

use super::check_len;

const BIO_MAX: usize = 500;

/// Per-subject profile. Exactly one exists for every registered subject.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub user: SubjectId,
    pub bio: String,
    pub avatar: Option<String>,
}

impl Profile {
    pub fn empty(user: SubjectId) -> Self {
        Self {
            user,
            bio: String::new(),
            avatar: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilePatch {
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl ProfilePatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(bio) = &self.bio {
            check_len("bio", bio, BIO_MAX)?;
        }
        Ok(())
    }

    pub fn apply(self, p: &mut Profile) {
        if let Some(bio) = self.bio {
            p.bio = bio;
        }
        if let Some(avatar) = self.avatar {
            p.avatar = if avatar.is_empty() { None } else { Some(avatar) };
        }
    }
}
