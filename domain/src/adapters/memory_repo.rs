use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::{CoreError, User, UserRepository};

/// Simple in-memory repository for tests. Not thread-safe for high concurrency
/// beyond the internal mutex guarding the map.
///
/// Ids are assigned from an internal counter starting at 1, matching the
/// AUTOINCREMENT behavior of the SQLite adapter.
pub struct InMemoryRepo {
    inner: Mutex<Inner>,
}

struct Inner {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for InMemoryRepo {
    fn find_all(&self) -> Result<Vec<User>, CoreError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| CoreError::Repository("mutex poisoned".into()))?;
        // BTreeMap iteration is already ascending by id.
        Ok(inner.users.values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<User>, CoreError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| CoreError::Repository("mutex poisoned".into()))?;
        Ok(inner.users.get(&id).cloned())
    }

    fn save(&self, user: User) -> Result<User, CoreError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| CoreError::Repository("mutex poisoned".into()))?;
        match user.id {
            Some(id) => {
                if !inner.users.contains_key(&id) {
                    return Err(CoreError::NotFound);
                }
                inner.users.insert(id, user.clone());
                Ok(user)
            }
            None => {
                let id = inner.next_id;
                inner.next_id += 1;
                let persisted = User {
                    id: Some(id),
                    ..user
                };
                inner.users.insert(id, persisted.clone());
                Ok(persisted)
            }
        }
    }

    fn delete(&self, user: &User) -> Result<(), CoreError> {
        let id = user.id.ok_or(CoreError::MissingId)?;
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| CoreError::Repository("mutex poisoned".into()))?;
        match inner.users.remove(&id) {
            Some(_) => Ok(()),
            None => Err(CoreError::NotFound),
        }
    }
}
