use common::api::{ApiError, User};
use common::session::Session;
use common::ClientConfig;
use gloo::storage::{LocalStorage, Storage};
use std::rc::Rc;
use tracing::{info, warn};
use yew::prelude::*;

use crate::api::Api;

const SESSION_KEY: &str = "infestation.session";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
}

pub enum SessionAction {
    LoggedIn(Session),
    LoggedOut,
}

impl SessionState {
    pub fn restore() -> Self {
        SessionState {
            session: LocalStorage::get(SESSION_KEY).ok(),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            SessionAction::LoggedIn(session) => {
                info!("signed in as {}", session.user.name);
                if let Err(err) = LocalStorage::set(SESSION_KEY, &session) {
                    warn!("could not persist session: {}", err);
                }
                Rc::new(SessionState {
                    session: Some(session),
                })
            }
            SessionAction::LoggedOut => {
                info!("signed out");
                LocalStorage::delete(SESSION_KEY);
                Rc::new(SessionState::default())
            }
        }
    }
}

pub type SessionContext = UseReducerHandle<SessionState>;

#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("session context to be set")
}

#[hook]
pub fn use_api() -> Api {
    let config = use_context::<ClientConfig>().unwrap_or_default();
    let session = use_session();
    Api::new(&config, session.session.as_ref())
}

// Logs out when the backend no longer accepts the token
pub fn check_unauthorized(session: &SessionContext, err: &ApiError) {
    if err.is_unauthorized() {
        session.dispatch(SessionAction::LoggedOut);
    }
}
