use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{
    common::{CoreError, lock},
    identity::entities::{Identity, RegisterRequest, Session},
    user::entities::{User, UserId},
};

/// The remote identity service: accounts, sign-in and bearer tokens.
pub trait IdentityRepository: Send + Sync {
    fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;
    fn sign_out(&self, session: &Session) -> impl Future<Output = Result<(), CoreError>> + Send;
    /// Resolves a bearer token. `None` for unknown, expired or revoked tokens.
    fn current_identity(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<Identity>, CoreError>> + Send;
    /// Forces a fresh token for the session's user.
    fn refresh_token(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;
}

pub trait AuthService: Send + Sync {
    /// Creates an account and its profile document.
    fn register(
        &self,
        request: RegisterRequest,
    ) -> impl Future<Output = Result<(Session, User), CoreError>> + Send;

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn sign_out(&self, session: &Session) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn refresh(&self, session: &Session) -> impl Future<Output = Result<Session, CoreError>> + Send;

    /// Builds a session from a bearer token presented by a client.
    fn resolve_session(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;
}

#[derive(Clone)]
struct Account {
    user_id: UserId,
    password: String,
    display_name: String,
}

#[derive(Default)]
struct IdentityState {
    // email -> account
    accounts: HashMap<String, Account>,
    // token -> email
    tokens: HashMap<String, String>,
}

impl IdentityState {
    fn issue_token(&mut self, email: &str, user_id: &UserId) -> Session {
        let token = uuid::Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), email.to_string());
        Session {
            user_id: user_id.clone(),
            token,
        }
    }
}

/// Identity service kept in process memory. Refreshing issues a new token and
/// leaves the old one valid, matching hosted ID-token semantics.
#[derive(Clone, Default)]
pub struct InMemoryIdentityRepository {
    state: Arc<Mutex<IdentityState>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revokes every token of the session's user, as an expiry would.
    pub fn expire(&self, session: &Session) -> Result<(), CoreError> {
        let mut state = lock(&self.state)?;
        let IdentityState { accounts, tokens } = &mut *state;
        tokens.retain(|_, email| {
            accounts
                .get(email.as_str())
                .is_none_or(|account| account.user_id != session.user_id)
        });
        Ok(())
    }
}

impl IdentityRepository for InMemoryIdentityRepository {
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, CoreError> {
        let mut state = lock(&self.state)?;
        if state.accounts.contains_key(email) {
            return Err(CoreError::EmailAlreadyInUse);
        }

        let user_id = UserId::generate();
        state.accounts.insert(
            email.to_string(),
            Account {
                user_id: user_id.clone(),
                password: password.to_string(),
                display_name: display_name.to_string(),
            },
        );
        Ok(state.issue_token(email, &user_id))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        let mut state = lock(&self.state)?;
        let user_id = match state.accounts.get(email) {
            Some(account) if account.password == password => account.user_id.clone(),
            _ => return Err(CoreError::InvalidCredentials),
        };
        Ok(state.issue_token(email, &user_id))
    }

    async fn sign_out(&self, session: &Session) -> Result<(), CoreError> {
        lock(&self.state)?.tokens.remove(&session.token);
        Ok(())
    }

    async fn current_identity(&self, token: &str) -> Result<Option<Identity>, CoreError> {
        let state = lock(&self.state)?;
        let identity = state.tokens.get(token).and_then(|email| {
            state.accounts.get(email).map(|account| Identity {
                user_id: account.user_id.clone(),
                email: email.clone(),
                display_name: Some(account.display_name.clone())
                    .filter(|name| !name.trim().is_empty()),
            })
        });
        Ok(identity)
    }

    async fn refresh_token(&self, session: &Session) -> Result<Session, CoreError> {
        let mut state = lock(&self.state)?;
        let email = state
            .tokens
            .get(&session.token)
            .cloned()
            .ok_or(CoreError::Unauthenticated)?;
        Ok(state.issue_token(&email, &session.user_id))
    }
}
