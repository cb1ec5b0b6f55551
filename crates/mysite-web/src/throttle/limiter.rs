//! Per-client minimum-interval limiter.
//!
//! Each client id maps to the instant of its last *accepted* request. A
//! request is accepted when the client has no record or its record is at
//! least `min_interval` old; denied attempts leave the record untouched so
//! they never extend the window.
//!
//! Concurrency note: check-and-record runs under the `DashMap` entry lock for
//! that key, so two simultaneous requests from one client cannot both pass.
//!
//! Growth: an entry older than `min_interval` can no longer cause a deny, so
//! `sweep` drops those. It runs inline once the map exceeds `max_clients`
//! and from a periodic background task.

use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use mysite_core::error::{Result, SiteError};

use crate::config::ThrottleSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    Allow,
    /// `retry_after` is the time left until the client's window closes.
    Deny { retry_after: Duration },
}

impl ThrottleDecision {
    pub fn is_allow(self) -> bool {
        matches!(self, ThrottleDecision::Allow)
    }
}

#[derive(Debug)]
pub struct RequestThrottle {
    min_interval: Duration,
    max_clients: usize,
    visits: DashMap<String, Instant>,
}

impl RequestThrottle {
    pub fn new(min_interval: Duration, max_clients: usize) -> Result<Self> {
        if min_interval.is_zero() {
            return Err(SiteError::Config("throttle interval must be positive".into()));
        }
        Ok(Self {
            min_interval,
            max_clients: max_clients.max(1),
            visits: DashMap::new(),
        })
    }

    pub fn from_config(cfg: &ThrottleSection) -> Result<Self> {
        Self::new(cfg.min_interval()?, cfg.max_clients)
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Decide for `client_id` at `now`, recording `now` on allow.
    pub fn check_and_record(&self, client_id: &str, now: Instant) -> ThrottleDecision {
        let inserted = match self.visits.entry(client_id.to_owned()) {
            Entry::Occupied(mut e) => {
                let elapsed = now.saturating_duration_since(*e.get());
                if elapsed < self.min_interval {
                    return ThrottleDecision::Deny {
                        retry_after: self.min_interval - elapsed,
                    };
                }
                e.insert(now);
                false
            }
            Entry::Vacant(v) => {
                v.insert(now);
                true
            }
        };

        // Entry guard is released above; `len`/`retain` take shard locks.
        if inserted && self.visits.len() > self.max_clients {
            let removed = self.sweep(now);
            tracing::debug!(removed, tracked = self.visits.len(), "throttle map over capacity, swept");
        }

        ThrottleDecision::Allow
    }

    /// Drop records whose window has closed. Returns how many were removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.visits.len();
        self.visits
            .retain(|_, last| now.saturating_duration_since(*last) < self.min_interval);
        before.saturating_sub(self.visits.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.visits.len()
    }

    pub fn last_seen(&self, client_id: &str) -> Option<Instant> {
        self.visits.get(client_id).map(|r| *r.value())
    }
}
