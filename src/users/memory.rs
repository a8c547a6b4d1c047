use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::users::{
    model::{NewUser, User},
    repo::{StoreError, UserStore},
};

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

impl Inner {
    fn insert(&mut self, new: NewUser) -> User {
        self.next_id += 1;
        let user = User {
            id: self.next_id,
            full_name: new.full_name,
            date_of_birth: new.date_of_birth,
            email: new.email,
            password: new.password_hash,
            role: new.role,
            is_active: true,
        };
        self.rows.insert(user.id, user.clone());
        user
    }

    fn by_email(&self, email: &str) -> Option<&User> {
        self.rows.values().find(|u| u.email == email)
    }
}

/// In-process [`UserStore`] with the same uniqueness rules as the `users` table.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.by_email(&new.email).is_some() {
            return Err(StoreError::Conflict);
        }
        Ok(inner.insert(new))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.by_email(email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn deactivate(&self, id: i64) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.get_mut(&id).map(|u| {
            u.is_active = false;
            u.clone()
        }))
    }

    async fn upsert_by_email(&self, new: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.by_email(&new.email) {
            return Ok(existing.clone());
        }
        Ok(inner.insert(new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::model::Role;
    use time::macros::date;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            full_name: "Test User".into(),
            date_of_birth: date!(1990 - 01 - 01),
            email: email.into(),
            password_hash: "hash".into(),
            role,
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_and_defaults_active() {
        let store = MemoryUserStore::new();
        let a = store.create(new_user("a@mail.ru", Role::User)).await.unwrap();
        let b = store.create(new_user("b@mail.ru", Role::User)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(a.is_active && b.is_active);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryUserStore::new();
        store.create(new_user("dup@mail.ru", Role::User)).await.unwrap();
        let err = store.create(new_user("dup@mail.ru", Role::User)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }

    #[tokio::test]
    async fn deactivate_is_idempotent_and_reports_missing() {
        let store = MemoryUserStore::new();
        let u = store.create(new_user("x@mail.ru", Role::User)).await.unwrap();
        let first = store.deactivate(u.id).await.unwrap().unwrap();
        let second = store.deactivate(u.id).await.unwrap().unwrap();
        assert!(!first.is_active);
        assert!(!second.is_active);
        assert!(store.deactivate(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_keeps_existing_row() {
        let store = MemoryUserStore::new();
        let existing = store.create(new_user("boss@mail.ru", Role::User)).await.unwrap();
        let got = store
            .upsert_by_email(new_user("boss@mail.ru", Role::Admin))
            .await
            .unwrap();
        assert_eq!(got.id, existing.id);
        assert_eq!(got.role, Role::User);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }
}
