//! Registered accounts and the current session.
//!
//! Credentials are kept in plaintext in a single table keyed by normalized
//! email; the session record is a copy of the signed-in `User` without the
//! password.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use mindtrack_core::{
    errors::{TrackError, TrackResult},
    models::user::{normalize_email, Credential, Role, User},
};

use super::load_record;
use crate::kv::write_json;
use crate::schema::{CURRENT_USER_KEY, USERS_KEY};
use crate::SharedKv;

pub const MIN_PASSWORD_LEN: usize = 6;

struct AccountState {
    users: BTreeMap<String, Credential>,
    current: Option<User>,
}

pub struct AccountStore {
    kv: SharedKv,
    email_domain: String,
    state: RwLock<AccountState>,
}

impl AccountStore {
    /// Loads the credential table and any persisted session.
    ///
    /// `email_domain` is the suffix registration requires, e.g. `@ru.is`.
    pub async fn load(kv: SharedKv, email_domain: &str) -> Self {
        let users = load_record(kv.as_ref(), USERS_KEY).await.unwrap_or_default();
        let current = load_record(kv.as_ref(), CURRENT_USER_KEY).await;

        Self {
            kv,
            email_domain: email_domain.to_lowercase(),
            state: RwLock::new(AccountState { users, current }),
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.current.clone()
    }

    /// Creates an account and signs it in.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> TrackResult<User> {
        if name.is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(TrackError::Validation("Please fill in all fields".to_string()));
        }

        let email = normalize_email(email);
        if !email.ends_with(&self.email_domain) {
            return Err(TrackError::Validation(format!(
                "You must use a university email ({})",
                self.email_domain
            )));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TrackError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackError::Validation("Name is required".to_string()));
        }

        let mut state = self.state.write().await;
        if state.users.contains_key(&email) {
            return Err(TrackError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let credential = Credential {
            name: name.to_string(),
            password: password.to_string(),
            role,
        };
        let user = credential.to_user(&email);

        let mut users = state.users.clone();
        users.insert(email.clone(), credential);
        write_json(self.kv.as_ref(), USERS_KEY, &users).await?;

        // The account only exists once the session is stored too.
        if let Err(err) = write_json(self.kv.as_ref(), CURRENT_USER_KEY, &user).await {
            if let Err(restore) = write_json(self.kv.as_ref(), USERS_KEY, &state.users).await {
                warn!(email = %email, error = %restore, "failed to restore account table");
            }
            return Err(err.into());
        }
        state.users = users;
        state.current = Some(user.clone());

        debug!(email = %user.email, role = ?user.role, "registered account");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> TrackResult<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(TrackError::Validation("Please fill in all fields".to_string()));
        }

        let email = normalize_email(email);
        let mut state = self.state.write().await;

        let user = match state.users.get(&email) {
            Some(credential) if credential.password == password => credential.to_user(&email),
            _ => {
                return Err(TrackError::Authentication(
                    "Invalid email or password".to_string(),
                ));
            }
        };

        write_json(self.kv.as_ref(), CURRENT_USER_KEY, &user).await?;
        state.current = Some(user.clone());

        debug!(email = %user.email, "signed in");
        Ok(user)
    }

    pub async fn logout(&self) -> TrackResult<()> {
        let mut state = self.state.write().await;
        self.kv.remove(CURRENT_USER_KEY).await?;
        state.current = None;

        debug!("signed out");
        Ok(())
    }

    /// Records the therapist the signed-in user picked. Returns `None`
    /// without touching storage when nobody is signed in.
    pub async fn select_therapist(&self, therapist_id: &str) -> TrackResult<Option<User>> {
        let mut state = self.state.write().await;
        let Some(current) = state.current.as_ref() else {
            return Ok(None);
        };

        let updated = User {
            selected_therapist_id: Some(therapist_id.to_string()),
            ..current.clone()
        };
        write_json(self.kv.as_ref(), CURRENT_USER_KEY, &updated).await?;
        state.current = Some(updated.clone());

        debug!(email = %updated.email, therapist_id, "selected therapist");
        Ok(Some(updated))
    }
}
