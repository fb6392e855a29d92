use crate::application::ports::user_repository::{UserRepository, UserRow};

/// Minimal-variant registration: the submitted password is stored verbatim.
/// This reproduces the source app's observable behavior; see DESIGN.md
/// before building anything on top of it.
pub struct CreateAccount<'a, R: UserRepository + ?Sized> {
    pub users: &'a R,
}

impl<'a, R: UserRepository + ?Sized> CreateAccount<'a, R> {
    pub async fn execute(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> anyhow::Result<UserRow> {
        self.users.create_user(username, email, password).await
    }
}
