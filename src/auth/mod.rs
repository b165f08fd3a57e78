//! Authentication and session management
//!
//! Login checks the stored users list: email matches case-insensitively,
//! password exactly. The signed-in user is held in memory and, when
//! configured, persisted as the `currentUser` record with the password
//! stripped.

use std::sync::{Arc, Mutex};

use log::info;
use uuid::Uuid;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::store::Store;
use crate::types::{User, UserRole, UserStatus};

/// Client for authentication and the current-user session
pub struct Auth {
    store: Store,

    /// The signed-in user for this process
    session: Arc<Mutex<Option<User>>>,

    options: ClientOptions,
}

impl Auth {
    pub(crate) fn new(store: Store, options: ClientOptions) -> Self {
        Self {
            store,
            session: Arc::new(Mutex::new(None)),
            options,
        }
    }

    /// Load the persisted current user into the in-memory session, returning
    /// it if present. Called once at startup.
    pub async fn restore_session(&self) -> Result<Option<User>, Error> {
        let stored = self.store.current_user().await?;
        if let Some(ref user) = stored {
            let mut session = self.session.lock().unwrap();
            *session = Some(user.clone());
        }
        Ok(stored)
    }

    /// Sign in with email and password
    ///
    /// Succeeds iff a stored user's email matches case-insensitively and the
    /// password matches exactly.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        let users = self.store.users().await?;
        let found = users.into_iter().find(|u| {
            let email_matches = u
                .email
                .as_deref()
                .map(|e| e.eq_ignore_ascii_case(email))
                .unwrap_or(false);
            email_matches && u.password.as_deref() == Some(password)
        });

        let Some(user) = found else {
            return Err(Error::auth("Invalid email or password"));
        };

        let user = user.without_password();
        if self.options.persist_session {
            self.store.set_current_user(&user).await?;
        }

        let mut session = self.session.lock().unwrap();
        *session = Some(user.clone());
        info!("user {} signed in", user.id);

        Ok(user)
    }

    /// Sign out, clearing the in-memory session and the persisted record
    pub async fn logout(&self) -> Result<(), Error> {
        {
            let mut session = self.session.lock().unwrap();
            *session = None;
        }
        self.store.clear_current_user().await
    }

    /// Register a new client account and sign it in
    ///
    /// Fails when the email is already registered (case-insensitively).
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> Result<User, Error> {
        if self.store.user_by_email(email).await?.is_some() {
            return Err(Error::auth("Email already registered"));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            role: UserRole::Client,
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            status: Some(UserStatus::Active),
            password: Some(password.to_string()),
        };
        self.store.save_user(&user).await?;

        let session_user = user.without_password();
        if self.options.persist_session {
            self.store.set_current_user(&session_user).await?;
        }

        let mut session = self.session.lock().unwrap();
        *session = Some(session_user.clone());
        info!("registered user {}", session_user.id);

        Ok(session_user)
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<User> {
        let session = self.session.lock().unwrap();
        session.clone()
    }

    /// Whether a user is signed in
    pub fn is_authenticated(&self) -> bool {
        let session = self.session.lock().unwrap();
        session.is_some()
    }
}
