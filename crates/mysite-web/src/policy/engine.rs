use mysite_core::access::{can_create, can_mutate, Owned, Permission, PermissionCatalog};
use mysite_core::error::{Result, SiteError};
use mysite_core::subject::Subject;

use crate::config::{PermissionsSection, ResourceRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Product,
    Order,
    Article,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Product => "product",
            ResourceKind::Order => "order",
            ResourceKind::Article => "article",
        }
    }
}

/// Resolved permissions for one resource kind.
#[derive(Debug, Clone)]
pub struct ResourcePolicy {
    kind: ResourceKind,
    create: Option<Permission>,
    edit: Permission,
    delete: Permission,
}

impl ResourcePolicy {
    fn compile(kind: ResourceKind, catalog: &PermissionCatalog, rules: &ResourceRules) -> Result<Self> {
        let resolve = |field: &str, name: &str| {
            catalog.resolve(name).map_err(|e| {
                SiteError::Config(format!("permissions.{}s.{field}: {e}", kind.as_str()))
            })
        };
        Ok(Self {
            kind,
            create: rules
                .create
                .as_deref()
                .map(|n| resolve("create", n))
                .transpose()?,
            edit: resolve("edit", &rules.edit)?,
            delete: resolve("delete", &rules.delete)?,
        })
    }

    pub fn authorize_create(&self, subject: &Subject) -> Result<()> {
        let decision = can_create(Some(subject), self.create.as_ref());
        self.report(subject, "create", decision.is_permit());
        decision.or_forbidden(&format!("create {}", self.kind.as_str()))
    }

    pub fn authorize_edit<R: Owned + ?Sized>(&self, subject: &Subject, resource: &R) -> Result<()> {
        self.authorize(subject, resource, &self.edit, "edit")
    }

    pub fn authorize_delete<R: Owned + ?Sized>(&self, subject: &Subject, resource: &R) -> Result<()> {
        self.authorize(subject, resource, &self.delete, "delete")
    }

    fn authorize<R: Owned + ?Sized>(
        &self,
        subject: &Subject,
        resource: &R,
        permission: &Permission,
        verb: &str,
    ) -> Result<()> {
        let decision = can_mutate(subject, resource, permission);
        self.report(subject, verb, decision.is_permit());
        decision.or_forbidden(&format!("{verb} {}", self.kind.as_str()))
    }

    fn report(&self, subject: &Subject, verb: &str, permitted: bool) {
        if !permitted {
            tracing::warn!(
                user = %subject.username,
                kind = self.kind.as_str(),
                action = verb,
                "access denied"
            );
        }
    }
}

/// All compiled policies, built once and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct SitePolicies {
    pub catalog: PermissionCatalog,
    pub products: ResourcePolicy,
    pub orders: ResourcePolicy,
    pub articles: ResourcePolicy,
}

impl SitePolicies {
    pub fn compile(cfg: &PermissionsSection) -> Result<Self> {
        let catalog = PermissionCatalog::compile(&cfg.catalog)?;
        Ok(Self {
            products: ResourcePolicy::compile(ResourceKind::Product, &catalog, &cfg.products)?,
            orders: ResourcePolicy::compile(ResourceKind::Order, &catalog, &cfg.orders)?,
            articles: ResourcePolicy::compile(ResourceKind::Article, &catalog, &cfg.articles)?,
            catalog,
        })
    }

    /// Reject grants that name a permission outside the catalog.
    pub fn check_grants<'a, I>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            if !self.catalog.contains(name) {
                return Err(SiteError::BadRequest(format!("unknown permission: {name}")));
            }
        }
        Ok(())
    }
}
