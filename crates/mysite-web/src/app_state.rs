//! Shared application state.
//!
//! Built once at startup from a validated config and injected into the
//! router. It owns the request throttle, the compiled policies, the account
//! registry and the storage tables; nothing here is process-global.

use std::sync::Arc;

use mysite_core::error::{Result, SiteError};
use mysite_core::model::Profile;
use mysite_core::subject::Subject;

use crate::auth::{Accounts, Authenticator, NewAccount};
use crate::config::{SiteConfig, UserSeed};
use crate::policy::SitePolicies;
use crate::store::Store;
use crate::throttle::RequestThrottle;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: SiteConfig,
    policies: SitePolicies,
    throttle: Option<Arc<RequestThrottle>>,
    accounts: Arc<Accounts>,
    authenticator: Arc<dyn Authenticator>,
    store: Store,
}

impl AppState {
    /// Build application state. Any configuration problem (unknown permission
    /// name, bad throttle interval, bad user seed) is returned here, before
    /// the server accepts a request.
    pub fn new(cfg: SiteConfig) -> Result<Self> {
        // 1) Compile permission catalog + per-resource rules
        let policies = SitePolicies::compile(&cfg.permissions)?;

        // 2) Throttle
        let throttle = if cfg.throttle.enabled {
            Some(Arc::new(RequestThrottle::from_config(&cfg.throttle)?))
        } else {
            None
        };

        let accounts = Arc::new(Accounts::new());
        let authenticator: Arc<dyn Authenticator> = accounts.clone();

        let state = Self {
            inner: Arc::new(AppStateInner {
                policies,
                throttle,
                accounts,
                authenticator,
                store: Store::new(),
                cfg,
            }),
        };

        // 3) Seed accounts (each with its profile)
        for seed in &state.inner.cfg.users {
            state.seed_user(seed).map_err(|e| {
                SiteError::Config(format!("user seed failed (user={}): {e}", seed.username))
            })?;
        }

        tracing::info!(
            users = state.inner.accounts.len(),
            permissions = state.inner.policies.catalog.len(),
            throttle = state.inner.throttle.is_some(),
            "application state ready"
        );
        Ok(state)
    }

    pub fn cfg(&self) -> &SiteConfig {
        &self.inner.cfg
    }

    pub fn policies(&self) -> &SitePolicies {
        &self.inner.policies
    }

    pub fn throttle(&self) -> Option<&Arc<RequestThrottle>> {
        self.inner.throttle.as_ref()
    }

    pub fn accounts(&self) -> &Accounts {
        &self.inner.accounts
    }

    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    pub async fn authenticate(&self, token: &str) -> Result<Subject> {
        self.inner.authenticator.authenticate(token).await
    }

    /// Create a subject, then create its profile.
    pub fn register_user(&self, account: NewAccount, token: Option<String>) -> Result<(Subject, String)> {
        let (subject, token) = self.inner.accounts.create(account, token)?;
        self.inner
            .store
            .profiles
            .insert(subject.id.clone(), Profile::empty(subject.id.clone()));
        tracing::info!(user = %subject.username, "user registered");
        Ok((subject, token))
    }

    fn seed_user(&self, seed: &UserSeed) -> Result<Subject> {
        self.inner
            .policies
            .check_grants(seed.permissions.iter().map(String::as_str))?;

        let account = NewAccount {
            username: seed.username.clone(),
            is_superuser: seed.is_superuser,
            is_staff: seed.is_staff,
            permissions: seed.permissions.iter().cloned().collect(),
        };
        let (subject, _) = self.register_user(account, Some(seed.token.clone()))?;
        Ok(subject)
    }
}
