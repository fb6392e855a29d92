use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::user_repository::{UserRepository, UserRow};

/// The two denial branches stay distinct internally; the HTTP layer collapses
/// them into a single user-facing message so responses don't reveal which
/// usernames exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginDenied {
    #[error("no account for that username")]
    UnknownUser,
    #[error("password mismatch")]
    WrongPassword,
}

#[derive(Debug)]
pub enum LoginOutcome {
    Authenticated(UserRow),
    Denied(LoginDenied),
}

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub users: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<LoginOutcome> {
        let row = match self.users.find_by_username(&req.username).await? {
            Some(r) => r,
            None => return Ok(LoginOutcome::Denied(LoginDenied::UnknownUser)),
        };
        let hash = row.password.clone().unwrap_or_default();
        let parsed = PasswordHash::new(&hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(LoginOutcome::Authenticated(UserRow {
                id: row.id,
                username: row.username,
                email: row.email,
                password: None,
            }))
        } else {
            Ok(LoginOutcome::Denied(LoginDenied::WrongPassword))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHasher, SaltString};
    use password_hash::rand_core::OsRng;
    use uuid::Uuid;

    struct OneUser {
        row: UserRow,
    }

    #[async_trait::async_trait]
    impl UserRepository for OneUser {
        async fn create_user(
            &self,
            _username: &str,
            _email: &str,
            _password: &str,
        ) -> anyhow::Result<UserRow> {
            anyhow::bail!("not used")
        }

        async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRow>> {
            Ok((username == self.row.username).then(|| self.row.clone()))
        }

        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
            Ok((id == self.row.id).then(|| self.row.clone()))
        }
    }

    fn repo_with(username: &str, password: &str) -> OneUser {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string();
        OneUser {
            row: UserRow {
                id: Uuid::new_v4(),
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: Some(hash),
            },
        }
    }

    #[tokio::test]
    async fn correct_credentials_authenticate() {
        let repo = repo_with("alice", "pw123");
        let uc = Login { users: &repo };
        let out = uc
            .execute(&LoginRequest {
                username: "alice".into(),
                password: "pw123".into(),
            })
            .await
            .unwrap();
        match out {
            LoginOutcome::Authenticated(user) => {
                assert_eq!(user.username, "alice");
                assert!(user.password.is_none());
            }
            other => panic!("expected authentication, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_username_and_bad_password_are_distinct_branches() {
        let repo = repo_with("alice", "pw123");
        let uc = Login { users: &repo };

        let missing = uc
            .execute(&LoginRequest {
                username: "mallory".into(),
                password: "pw123".into(),
            })
            .await
            .unwrap();
        match missing {
            LoginOutcome::Denied(reason) => assert_eq!(reason, LoginDenied::UnknownUser),
            other => panic!("expected denial, got {other:?}"),
        }

        let mismatch = uc
            .execute(&LoginRequest {
                username: "alice".into(),
                password: "nope".into(),
            })
            .await
            .unwrap();
        match mismatch {
            LoginOutcome::Denied(reason) => assert_eq!(reason, LoginDenied::WrongPassword),
            other => panic!("expected denial, got {other:?}"),
        }
    }
}
