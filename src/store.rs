// Session flags shared by the pages of one visitor.
// Passed around as Arc<Store>, there is no process wide instance.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Tutor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub authenticated: bool,
    pub loading: bool,
    pub user: Option<SessionUser>,
    pub coins: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoginStarted,
    LoginSucceeded(SessionUser),
    LoginFailed,
    Logout,
    CoinsLoaded(u64),
}

/// Pure transition of the session flags
pub fn reduce(session: Session, action: Action) -> Session {
    match action {
        Action::LoginStarted => Session { loading: true, ..session },
        Action::LoginSucceeded(user) => Session { authenticated: true, loading: false, user: Some(user), ..session },
        Action::LoginFailed => Session { authenticated: false, loading: false, user: None, ..session },
        Action::Logout => Session::default(),
        // a balance only means something for a signed in tutor or student
        Action::CoinsLoaded(coins) if session.authenticated => Session { coins, ..session },
        Action::CoinsLoaded(_) => session,
    }
}

#[derive(Debug, Default)]
pub struct Store {
    session: RwLock<Session>,
}

impl Store {
    pub fn new(session: Session) -> Self {
        Self { session: RwLock::new(session) }
    }

    /// apply `action` and return the resulting session
    pub fn dispatch(&self, action: Action) -> Session {
        let mut guard = match self.session.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        debug!("session action {:?}", action);
        *guard = reduce(std::mem::take(&mut *guard), action);
        guard.clone()
    }

    pub fn snapshot(&self) -> Session {
        match self.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
