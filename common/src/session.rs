use crate::api::{bearer, AuthResponse, User};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn authorization(&self) -> String {
        bearer(&self.token)
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Session {
            token: response.token,
            user: response.user,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Guard {
    Allow,
    RedirectToLogin,
}

pub fn guard(access: Access, session: Option<&Session>) -> Guard {
    match (access, session) {
        (Access::Public, _) => Guard::Allow,
        (Access::Protected, Some(session)) if !session.token.is_empty() => Guard::Allow,
        (Access::Protected, _) => Guard::RedirectToLogin,
    }
}
