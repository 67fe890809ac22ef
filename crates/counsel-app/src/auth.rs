//! Login and registration flows.
//!
//! Form validation happens synchronously, before any network call; only a
//! fully valid form reaches the backend. The resulting bearer token is handed
//! to an injected sink (the transport stores it; this layer never keeps
//! credentials).

use crate::access_guard::Route;
use counsel_core::api::{AuthApi, Credentials, Registration};
use counsel_core::error::CounselError;
use counsel_core::identity::IdentitySession;
use std::sync::Arc;

/// Receives the bearer token on sign-in (`Some`) and sign-out (`None`).
pub type TokenSink = Arc<dyn Fn(Option<&str>) + Send + Sync>;

/// A registration form as typed by the user, confirmation field included.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Validates the form; `Ok` carries the wire-ready registration (the
    /// confirmation field stays client-side).
    fn validate(&self) -> Result<Registration, CounselError> {
        let required = [
            &self.username,
            &self.email,
            &self.full_name,
            &self.password,
            &self.confirm_password,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(CounselError::validation("Please fill in all fields"));
        }
        if self.password != self.confirm_password {
            return Err(CounselError::validation("Passwords do not match"));
        }
        Ok(Registration {
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            password: self.password.clone(),
        })
    }
}

/// Drives sign-in, sign-up, session restore and sign-out, and owns the
/// resulting [`IdentitySession`].
pub struct AuthController {
    api: Arc<dyn AuthApi>,
    token_sink: TokenSink,
    identity: IdentitySession,
    busy: bool,
    error: Option<String>,
}

impl AuthController {
    pub fn new(api: Arc<dyn AuthApi>, token_sink: TokenSink) -> Self {
        Self {
            api,
            token_sink,
            identity: IdentitySession::Unresolved,
            busy: false,
            error: None,
        }
    }

    pub fn identity(&self) -> &IdentitySession {
        &self.identity
    }

    /// True while a login/register request is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Inline error from the last attempt, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Tries to restore a session from an already-stored token.
    ///
    /// Settles the identity either way: `Resolved` on success, `Cleared` when
    /// there is no valid token behind the transport.
    pub async fn restore(&mut self) {
        match self.api.me().await {
            Ok(user) => self.identity.resolve(user),
            Err(_) => self.identity.clear(),
        }
    }

    /// Signs in. Returns the role-appropriate route on success.
    pub async fn login(&mut self, username: &str, password: &str) -> Option<Route> {
        if self.busy {
            return None;
        }
        self.error = None;

        if username.trim().is_empty() || password.is_empty() {
            self.error = Some("Please enter a username and password".to_string());
            return None;
        }

        self.busy = true;
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let result = self.api.login(&credentials).await;
        self.busy = false;

        match result {
            Ok(auth) => {
                (self.token_sink)(Some(&auth.access_token));
                let route = Route::default_for(auth.user.role);
                self.identity.resolve(auth.user);
                Some(route)
            }
            Err(e) => {
                self.error = Some(e.user_message("Login failed"));
                None
            }
        }
    }

    /// Signs up. Validation failures never reach the network.
    pub async fn register(&mut self, form: &RegistrationForm) -> Option<Route> {
        if self.busy {
            return None;
        }
        self.error = None;

        let registration = match form.validate() {
            Ok(registration) => registration,
            Err(e) => {
                self.error = Some(e.user_message("Registration failed"));
                return None;
            }
        };

        self.busy = true;
        let result = self.api.register(&registration).await;
        self.busy = false;

        match result {
            Ok(auth) => {
                (self.token_sink)(Some(&auth.access_token));
                let route = Route::default_for(auth.user.role);
                self.identity.resolve(auth.user);
                Some(route)
            }
            Err(e) => {
                self.error = Some(e.user_message("Registration failed"));
                None
            }
        }
    }

    /// Signs out: clears the identity and tells the transport to drop the
    /// token.
    pub fn logout(&mut self) {
        (self.token_sink)(None);
        self.identity.clear();
    }
}
