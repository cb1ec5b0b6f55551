use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use mysite_core::error::{Result, SiteError};

/// Id-keyed table. Ids start at 1 and are never reused.
pub struct Table<T> {
    rows: DashMap<u64, T>,
    seq: AtomicU64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: DashMap::new(),
            seq: AtomicU64::new(1),
        }
    }
}

impl<T: Clone> Table<T> {
    /// Allocate an id, build the row with it, store and return a copy.
    pub fn insert_with(&self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.seq.fetch_add(1, Ordering::Relaxed);
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: u64) -> Option<T> {
        self.rows.get(&id).map(|r| r.value().clone())
    }

    /// Run `f` against the stored row while holding its entry lock.
    /// `f` may refuse (e.g. authorization) by returning an error.
    pub fn try_update(&self, id: u64, what: &str, f: impl FnOnce(&mut T) -> Result<()>) -> Result<T> {
        let mut row = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| SiteError::NotFound(format!("{what} {id}")))?;
        f(row.value_mut())?;
        Ok(row.value().clone())
    }

    pub fn remove(&self, id: u64) -> Option<T> {
        self.rows.remove(&id).map(|(_, v)| v)
    }

    pub fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.rows.iter().any(|r| pred(r.value()))
    }

    /// Snapshot of all rows in id order.
    pub fn all(&self) -> Vec<T> {
        let mut rows: Vec<(u64, T)> = self
            .rows
            .iter()
            .map(|r| (*r.key(), r.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, v)| v).collect()
    }
}
