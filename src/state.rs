use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::AppResult;
use crate::models::Db;
use crate::store;

// Shared application state: the whole database behind one lock, plus the
// path it persists to. Reads take the read lock; writes take the write
// lock and save before releasing, so writers are serialized.
#[derive(Clone)]
pub struct AppState {
    db: Arc<RwLock<Db>>,
    db_path: Arc<str>,
}

impl AppState {
    pub fn new(db: Db, db_path: String) -> Self {
        AppState {
            db: Arc::new(RwLock::new(db)),
            db_path: db_path.into(),
        }
    }

    pub fn db(&self) -> RwLockReadGuard<'_, Db> {
        self.db.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn db_mut(&self) -> RwLockWriteGuard<'_, Db> {
        self.db.write().unwrap_or_else(|e| e.into_inner())
    }

    // Called by write handlers while still holding the write guard.
    pub fn persist(&self, db: &Db) -> AppResult<()> {
        store::save_db(&self.db_path, db)?;
        Ok(())
    }
}
