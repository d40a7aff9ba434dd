//! User persistence port and the bundled in-memory implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::user::User;

/// Failures surfaced by a user store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store's uniqueness constraint on the full name rejected the write.
    #[error("full name is already taken")]
    DuplicateName,

    /// The store could not serve the request.
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence port consumed by the registration service.
///
/// Implementations must enforce the full-name uniqueness constraint inside
/// `save` itself: the service's pre-check is advisory and can race.
pub trait UserStore: Send + Sync {
    fn find_by_full_name(&self, full_name: &str) -> Result<Option<User>, StoreError>;

    /// Persist a new user. Returns [`StoreError::DuplicateName`] when another
    /// user with the same full name already exists.
    fn save(&self, user: User) -> Result<User, StoreError>;
}

/// In-memory store keyed by full name.
///
/// The uniqueness check and the insert happen under one write lock, so two
/// concurrent saves of the same name cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_full_name(&self, full_name: &str) -> Result<Option<User>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(map.get(full_name).cloned())
    }

    fn save(&self, user: User) -> Result<User, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        if map.contains_key(&user.full_name) {
            return Err(StoreError::DuplicateName);
        }
        map.insert(user.full_name.clone(), user.clone());
        Ok(user)
    }
}
