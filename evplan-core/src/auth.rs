//! Local user registration and login session.
//!
//! Same storage pattern as the event store, over two independent slots: the
//! registered users ([`USERS_KEY`]) and the logged-in user
//! ([`CURRENT_USER_KEY`]).

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::constants::{CURRENT_USER_KEY, USERS_KEY};
use crate::error::PlannerResult;
use crate::kv::KeyValueStore;
use crate::slot::{JsonSlot, Load};
use crate::user::{Session, User};

pub struct AuthStore {
    users: JsonSlot<Vec<User>>,
    session: JsonSlot<User>,
    write_lock: Mutex<()>,
}

impl AuthStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        AuthStore {
            users: JsonSlot::new(Arc::clone(&kv), USERS_KEY),
            session: JsonSlot::new(kv, CURRENT_USER_KEY),
            write_lock: Mutex::new(()),
        }
    }

    /// Registered users, empty if none or unreadable.
    pub async fn get_users(&self) -> Vec<User> {
        self.users.load().await.unwrap_or_default()
    }

    /// Add a user. Returns false if the username is taken or the write
    /// failed. Does not log the user in.
    pub async fn register_user(&self, user: User) -> bool {
        let username = user.username.clone();

        match self.register(Load::Lenient, user).await {
            Ok(true) => {
                tracing::info!(%username, "user registered");
                true
            }
            Ok(false) => {
                tracing::debug!(%username, "username already taken");
                false
            }
            Err(e) => {
                tracing::error!(%username, error = %e, "failed to register user");
                false
            }
        }
    }

    pub async fn try_register_user(&self, user: User) -> PlannerResult<bool> {
        self.register(Load::Strict, user).await
    }

    async fn register(&self, mode: Load, user: User) -> PlannerResult<bool> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.users.load_with(mode).await?.unwrap_or_default();
        if users.iter().any(|u| u.username == user.username) {
            return Ok(false);
        }

        users.push(user);
        self.users.save(&users).await?;
        Ok(true)
    }

    /// Log in with an exact username and password match. On success the
    /// user becomes the current session; on failure the session is left
    /// untouched.
    pub async fn login_user(&self, username: &str, password: &str) -> bool {
        match self.login(Load::Lenient, username, password).await {
            Ok(true) => {
                tracing::info!(%username, "logged in");
                true
            }
            Ok(false) => {
                tracing::debug!(%username, "invalid credentials");
                false
            }
            Err(e) => {
                tracing::error!(%username, error = %e, "failed to log in");
                false
            }
        }
    }

    pub async fn try_login_user(&self, username: &str, password: &str) -> PlannerResult<bool> {
        self.login(Load::Strict, username, password).await
    }

    async fn login(&self, mode: Load, username: &str, password: &str) -> PlannerResult<bool> {
        let _guard = self.write_lock.lock().await;

        let users = self.users.load_with(mode).await?.unwrap_or_default();
        let Some(user) = users
            .into_iter()
            .find(|u| u.username == username && u.password == password)
        else {
            return Ok(false);
        };

        self.session.save(&user).await?;
        Ok(true)
    }

    /// The logged-in user, or `None` if logged out or the session is unreadable.
    pub async fn get_current_user(&self) -> Option<User> {
        self.session.load().await
    }

    pub async fn session(&self) -> Session {
        match self.get_current_user().await {
            Some(user) => Session::LoggedIn(user),
            None => Session::LoggedOut,
        }
    }

    /// End the session. Registered users are kept.
    pub async fn logout(&self) {
        if let Err(e) = self.try_logout().await {
            tracing::error!(error = %e, "failed to log out");
        }
    }

    pub async fn try_logout(&self) -> PlannerResult<()> {
        let _guard = self.write_lock.lock().await;
        self.session.clear().await
    }
}
