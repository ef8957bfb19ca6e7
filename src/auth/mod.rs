//! Authentication: token acquisition and the signed-in session

mod session;
mod types;

use std::sync::Arc;

use log::info;
use tokio::sync::watch;

use crate::admin::Permissions;
use crate::error::Result;
use crate::fetch::HttpClient;
use crate::users::User;

pub use session::*;
pub use types::*;

/// Client for `/auth`
#[derive(Debug, Clone)]
pub struct AuthApi {
    http: Arc<HttpClient>,
    session: Arc<watch::Sender<SessionState>>,
}

impl AuthApi {
    pub(crate) fn new(http: Arc<HttpClient>, session: Arc<watch::Sender<SessionState>>) -> Self {
        Self { http, session }
    }

    /// Initial session state for a freshly built client
    pub(crate) fn initial_state(http: &HttpClient) -> SessionState {
        if http.token().is_authenticated() {
            SessionState::TokenOnly
        } else {
            SessionState::Anonymous
        }
    }

    /// Sign in with email and password.
    ///
    /// The token endpoint takes a form body (`username`, `password`) and a
    /// 401 surfaces as "Invalid credentials".
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let response: TokenResponse = self
            .http
            .post("/auth/login")
            .form(&[("username", email), ("password", password)])
            .execute()
            .await?;

        self.accept(&response)?;
        info!("Signed in as {}", email);
        Ok(response)
    }

    /// Create an account and sign in with it
    pub async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse> {
        let response: TokenResponse = self
            .http
            .post("/auth/register")
            .json(request)?
            .execute()
            .await?;

        self.accept(&response)?;
        info!("Registered {}", request.email);
        Ok(response)
    }

    fn accept(&self, response: &TokenResponse) -> Result<()> {
        self.http.token().set_token(&response.access_token)?;
        let state = match &response.user {
            Some(user) => SessionState::authenticated(user.clone()),
            None => SessionState::TokenOnly,
        };
        self.session.send_replace(state);
        Ok(())
    }

    /// Load the profile of the token holder and publish it
    pub async fn me(&self) -> Result<User> {
        let user: User = self.http.get("/auth/me").execute().await?;
        self.session.send_replace(SessionState::authenticated(user.clone()));
        Ok(user)
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
        self.http
            .post("/auth/change-password")
            .json(request)?
            .send()
            .await
    }

    /// Drop the token locally. There is no server-side logout.
    pub fn logout(&self) -> Result<()> {
        self.session.send_replace(SessionState::Anonymous);
        self.http.token().clear_token()?;
        info!("Signed out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.http.token().is_authenticated()
    }

    /// Current session snapshot
    pub fn session(&self) -> SessionState {
        self.session.borrow().clone()
    }

    /// Receive every session change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }

    pub fn permissions(&self) -> Permissions {
        self.session.borrow().permissions()
    }

    pub fn has_permission(&self, key: &str) -> bool {
        self.session.borrow().has_permission(key)
    }
}
