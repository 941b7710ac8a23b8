use std::sync::Arc;

use crate::error::AuthResult;
use crate::user::User;

/// Storage for user accounts.
///
/// `create` assigns identity and must report a username or email collision as
/// [`AuthError::UsernameTaken`](crate::AuthError::UsernameTaken) /
/// [`AuthError::EmailTaken`](crate::AuthError::EmailTaken).
pub trait UserRepository: Send + Sync {
    fn create(&self, user: User) -> AuthResult<User>;
    fn get_by_username(&self, username: &str) -> AuthResult<Option<User>>;
    fn get_by_email(&self, email: &str) -> AuthResult<Option<User>>;
}

impl<R> UserRepository for Arc<R>
where
    R: UserRepository + ?Sized,
{
    fn create(&self, user: User) -> AuthResult<User> {
        (**self).create(user)
    }

    fn get_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        (**self).get_by_username(username)
    }

    fn get_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        (**self).get_by_email(email)
    }
}
