use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use chrono::Utc;
use stockroom_auth::{AuthError, AuthResult, User, UserRepository};
use stockroom_core::UserId;

#[derive(Debug, Default)]
struct UserTable {
    rows: BTreeMap<UserId, User>,
    by_username: HashMap<String, UserId>,
    by_email: HashMap<String, UserId>,
    last_id: i64,
}

/// In-memory account store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AuthError {
    AuthError::storage("user table lock poisoned")
}

impl UserRepository for InMemoryUserRepository {
    fn create(&self, user: User) -> AuthResult<User> {
        let mut table = self.table.write().map_err(|_| poisoned())?;

        if table.by_username.contains_key(user.username()) {
            return Err(AuthError::UsernameTaken {
                username: user.username().to_string(),
            });
        }
        if table.by_email.contains_key(user.email()) {
            return Err(AuthError::EmailTaken {
                email: user.email().to_string(),
            });
        }

        table.last_id += 1;
        let id = UserId::from_i64(table.last_id);
        let stored = user.with_identity(id, Utc::now());

        table.by_username.insert(stored.username().to_string(), id);
        table.by_email.insert(stored.email().to_string(), id);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    fn get_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table
            .by_username
            .get(username)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    fn get_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_look_up() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(User::new("alice", "alice@example.com", "$argon2id$stub"))
            .unwrap();
        assert_eq!(user.id_typed(), Some(UserId::from_i64(1)));

        assert_eq!(repo.get_by_username("alice").unwrap().unwrap().email(), "alice@example.com");
        assert!(repo.get_by_username("alice").unwrap().is_some());
        assert!(repo.get_by_email("alice@example.com").unwrap().is_some());
        assert!(repo.get_by_username("bob").unwrap().is_none());
    }

    #[test]
    fn usernames_and_emails_are_unique() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("alice", "alice@example.com", "h")).unwrap();

        let err = repo
            .create(User::new("alice", "other@example.com", "h"))
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken { .. }));

        let err = repo
            .create(User::new("bob", "alice@example.com", "h"))
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken { .. }));
    }

    #[test]
    fn honours_the_user_repository_contract() {
        crate::contract::user_repository(&InMemoryUserRepository::new(), "mem");
    }
}
