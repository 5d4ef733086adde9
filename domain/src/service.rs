use crate::{CoreError, User, UserRepository};

/// Application service exposing the user operations.
///
/// A thin facade over the repository port: every operation is a direct
/// delegation with no additional logic. It stays generic over the
/// repository so the domain remains testable without external
/// dependencies; the store handle is passed in at construction.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List all stored users, in id order.
    pub fn list(&self) -> Result<Vec<User>, CoreError> {
        self.repo.find_all()
    }

    /// Persist a user: insert when `id` is `None`, update otherwise.
    /// The persisted state is not surfaced to the caller.
    pub fn save(&self, user: User) -> Result<(), CoreError> {
        self.repo.save(user)?;
        Ok(())
    }

    /// Remove the user matching `user.id`.
    pub fn delete(&self, user: &User) -> Result<(), CoreError> {
        self.repo.delete(user)
    }

    /// Look up the stored record for `user.id`. A user without an id, or
    /// an id with no stored row, yields `Ok(None)` rather than an error.
    pub fn find(&self, user: &User) -> Result<Option<User>, CoreError> {
        match user.id {
            Some(id) => self.repo.find_by_id(id),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_repo::InMemoryRepo;

    fn svc() -> UserService<InMemoryRepo> {
        UserService::new(InMemoryRepo::new())
    }

    #[test]
    fn save_then_list_returns_the_user() {
        let svc = svc();
        svc.save(User::new("Ana", "ana@x.com")).unwrap();

        let all = svc.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, Some(1));
        assert_eq!(all[0].name, "Ana");
        assert_eq!(all[0].email, "ana@x.com");
    }

    #[test]
    fn list_after_saving_n_users_has_length_n() {
        let svc = svc();
        for i in 0..5 {
            svc.save(User::new(format!("u{}", i), format!("u{}@e.com", i)))
                .unwrap();
        }
        let all = svc.list().unwrap();
        assert_eq!(all.len(), 5);
        for i in 0..5 {
            assert!(all.iter().any(|u| u.name == format!("u{}", i)));
        }
    }

    #[test]
    fn find_returns_saved_record() {
        let svc = svc();
        svc.save(User::new("Ana", "ana@x.com")).unwrap();

        let probe = User {
            id: Some(1),
            name: String::new(),
            email: String::new(),
        };
        let found = svc.find(&probe).unwrap().unwrap();
        assert_eq!(found.name, "Ana");
        assert_eq!(found.email, "ana@x.com");
    }

    #[test]
    fn find_unknown_id_is_none_not_error() {
        let svc = svc();
        let probe = User {
            id: Some(12345),
            name: String::new(),
            email: String::new(),
        };
        assert!(svc.find(&probe).unwrap().is_none());
    }

    #[test]
    fn find_without_id_is_none() {
        let svc = svc();
        assert!(svc.find(&User::new("Ana", "ana@x.com")).unwrap().is_none());
    }

    #[test]
    fn delete_then_list_is_empty() {
        let svc = svc();
        svc.save(User::new("Ana", "ana@x.com")).unwrap();

        let all = svc.list().unwrap();
        svc.delete(&all[0]).unwrap();
        assert!(svc.list().unwrap().is_empty());
    }

    #[test]
    fn delete_missing_propagates_not_found() {
        let svc = svc();
        let ghost = User {
            id: Some(9),
            name: "Ghost".into(),
            email: "ghost@e.com".into(),
        };
        let err = svc.delete(&ghost).unwrap_err();
        assert!(matches!(err, CoreError::NotFound));
    }
}
