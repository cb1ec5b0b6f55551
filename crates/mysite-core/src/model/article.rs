//! Blog articles.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::error::Result;
use crate::subject::{NamedSubject, SubjectId};

use super::check_text;

const TITLE_MAX: usize = 200;
const CATEGORY_MAX: usize = 40;
const TAG_MAX: usize = 20;

/// Author identity and display name, captured once when the article is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRef {
    pub id: SubjectId,
    pub name: String,
}

impl AuthorRef {
    pub fn of<S: NamedSubject + ?Sized>(subject: &S) -> Self {
        Self {
            id: subject.subject_id().clone(),
            name: subject.display_name().to_string(),
        }
    }
}

impl NamedSubject for AuthorRef {
    fn subject_id(&self) -> &SubjectId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: BTreeSet<String>,
    pub author: AuthorRef,
    pub pub_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Article {
    fn owner(&self) -> &SubjectId {
        &self.author.id
    }
}

/// List projection without the (possibly large) content body.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleSummary {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub tags: BTreeSet<String>,
    pub author: String,
    pub pub_date: DateTime<Utc>,
}

impl From<&Article> for ArticleSummary {
    fn from(a: &Article) -> Self {
        Self {
            id: a.id,
            title: a.title.clone(),
            category: a.category.clone(),
            tags: a.tags.clone(),
            author: a.author.display_name().to_string(),
            pub_date: a.pub_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl NewArticle {
    pub fn validate(&self) -> Result<()> {
        check_text("title", &self.title, TITLE_MAX)?;
        check_text("content", &self.content, usize::MAX)?;
        check_text("category", &self.category, CATEGORY_MAX)?;
        check_tags(&self.tags)
    }

    pub fn into_article(self, id: u64, author: AuthorRef, now: DateTime<Utc>) -> Article {
        Article {
            id,
            title: self.title,
            content: self.content,
            category: self.category,
            tags: self.tags,
            author,
            pub_date: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<BTreeSet<String>>,
}

impl ArticlePatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(t) = &self.title {
            check_text("title", t, TITLE_MAX)?;
        }
        if let Some(c) = &self.content {
            check_text("content", c, usize::MAX)?;
        }
        if let Some(c) = &self.category {
            check_text("category", c, CATEGORY_MAX)?;
        }
        if let Some(tags) = &self.tags {
            check_tags(tags)?;
        }
        Ok(())
    }

    pub fn apply(self, a: &mut Article, now: DateTime<Utc>) {
        if let Some(t) = self.title {
            a.title = t;
        }
        if let Some(c) = self.content {
            a.content = c;
        }
        if let Some(c) = self.category {
            a.category = c;
        }
        if let Some(tags) = self.tags {
            a.tags = tags;
        }
        a.updated_at = now;
    }
}

fn check_tags(tags: &BTreeSet<String>) -> Result<()> {
    for tag in tags {
        check_text("tag", tag, TAG_MAX)?;
    }
    Ok(())
}
