//! The session store: owner of the authenticated identity.
//!
//! ARCHITECTURE
//! ============
//! One `SessionStore` is created at startup and handed explicitly to every
//! consumer that needs identity state; there is no ambient singleton. It
//! owns the in-memory `Session` (user, `is_authenticated`, `loading`), the
//! current credential, and the lifecycle operations. It registers itself
//! as the HTTP client's expiry observer, so a 401 on any request tears the
//! session down and raises the login redirect through the [`Navigator`]
//! seam regardless of which operation was in flight.
//!
//! ORDERING
//! ========
//! State-replacing operations draw a ticket from a monotonic sequence
//! before their request and commit their response only if nothing newer
//! has committed since. A stale response still resolves to its caller but
//! never overwrites `user`, so concurrent mutations settle on the newest
//! request rather than the last response to arrive. Logout and expiry draw
//! tickets too, which prevents an in-flight login from resurrecting a
//! session torn down while it was on the wire.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard, Weak};

use crate::net::error::ApiError;
use crate::net::http::HttpClient;
use crate::net::types::{
    AuthResponse, LoginRequest, MeResponse, MessageResponse, NewRegistration, ProfileResponse,
    ProfileUpdate, UserProfile, VerifyEmailRequest,
};
use crate::session::credentials::{Credential, CredentialStore};

/// Receiver for the forced login redirect raised on credential expiry.
pub trait Navigator: Send + Sync {
    /// Take the user to the login view.
    fn to_login(&self);
}

/// Point-in-time copy of the session state handed to guards and views.
#[derive(Clone, Debug, Default)]
pub struct SessionSnapshot {
    /// Current profile, when authenticated.
    pub user: Option<UserProfile>,
    /// True iff `user` is present and the credential was accepted.
    pub is_authenticated: bool,
    /// True only during the initial bootstrap check.
    pub loading: bool,
}

/// How `bootstrap` settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bootstrap {
    /// A stored credential was accepted; the session is authenticated.
    Authenticated,
    /// No credential was stored; cold start.
    NoCredential,
    /// A stored credential was rejected and has been discarded.
    DiscardedCredential,
}

/// Message-only error raised by session operations.
///
/// Callers get the server's wording when it provided any, else the fixed
/// per-operation fallback; no structured detail survives the wrap.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct SessionError {
    pub message: String,
}

impl SessionError {
    fn wrap(error: &ApiError, fallback: &str) -> Self {
        Self {
            message: error.server_message().unwrap_or(fallback).to_owned(),
        }
    }
}

/// Result of a successful login or registration.
#[derive(Clone, Debug)]
pub struct LoginOutcome {
    pub user: UserProfile,
    /// Whether the account still needs email verification.
    pub requires_verification: bool,
}

struct SessionState {
    user: Option<UserProfile>,
    is_authenticated: bool,
    loading: bool,
    credential: Option<Credential>,
    last_committed: u64,
}

struct Inner {
    client: Arc<HttpClient>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    state: RwLock<SessionState>,
    issued: AtomicU64,
}

impl Inner {
    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Apply a state mutation unless something newer already committed.
    fn commit(&self, ticket: u64, apply: impl FnOnce(&mut SessionState)) -> bool {
        let mut state = self.write_state();
        if ticket <= state.last_committed {
            tracing::debug!(ticket, last_committed = state.last_committed, "dropping stale session response");
            return false;
        }
        state.last_committed = ticket;
        apply(&mut state);
        true
    }

    /// Global teardown on credential expiry: both credential copies go,
    /// the state settles logged-out, and the login redirect is raised.
    fn expire(&self) {
        self.credentials.clear();
        let ticket = self.ticket();
        self.commit(ticket, |state| {
            state.credential = None;
            state.user = None;
            state.is_authenticated = false;
            state.loading = false;
        });
        self.navigator.to_login();
    }
}

/// Handle to the application's session. Cheap to clone; all clones share
/// the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Create the store and subscribe it to the client's expiry events.
    #[must_use]
    pub fn new(
        client: Arc<HttpClient>,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let inner = Arc::new(Inner {
            client,
            credentials,
            navigator,
            state: RwLock::new(SessionState {
                user: None,
                is_authenticated: false,
                loading: true,
                credential: None,
                last_committed: 0,
            }),
            issued: AtomicU64::new(0),
        });

        let weak: Weak<Inner> = Arc::downgrade(&inner);
        inner.client.on_session_expired(Arc::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.expire();
            }
        }));

        Self { inner }
    }

    /// A copy of the current session state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.state.read().unwrap_or_else(PoisonError::into_inner);
        SessionSnapshot {
            user: state.user.clone(),
            is_authenticated: state.is_authenticated,
            loading: state.loading,
        }
    }

    /// The bearer token of the active credential, if any.
    #[must_use]
    pub fn current_token(&self) -> Option<String> {
        let state = self.inner.state.read().unwrap_or_else(PoisonError::into_inner);
        state.credential.as_ref().map(|credential| credential.token.clone())
    }

    /// Startup check: adopt a stored credential if one is present and the
    /// backend still accepts it.
    ///
    /// Never fails. A rejected credential degrades silently to logged-out
    /// (diagnostics only, no user-facing notification beyond whatever the
    /// transport layer's 401 path does globally).
    pub async fn bootstrap(&self) -> Bootstrap {
        let Some(credential) = self.inner.credentials.load() else {
            let ticket = self.inner.ticket();
            self.inner.commit(ticket, |state| state.loading = false);
            return Bootstrap::NoCredential;
        };

        let ticket = self.inner.ticket();
        match self.inner.client.get::<MeResponse>("/auth/me", Some(&credential.token)).await {
            Ok(me) => {
                self.inner.commit(ticket, move |state| {
                    state.credential = Some(credential);
                    state.user = Some(me.user);
                    state.is_authenticated = true;
                    state.loading = false;
                });
                Bootstrap::Authenticated
            }
            Err(error) => {
                tracing::debug!(error = %error, "stored credential rejected during bootstrap");
                self.inner.credentials.clear();
                self.inner.commit(ticket, |state| {
                    state.credential = None;
                    state.user = None;
                    state.is_authenticated = false;
                    state.loading = false;
                });
                Bootstrap::DiscardedCredential
            }
        }
    }

    /// Authenticate with email and password.
    ///
    /// On success the returned credential is persisted with its seven-day
    /// window, installed as the active credential, and the session state
    /// replaced with the server's profile.
    ///
    /// # Errors
    ///
    /// Fails with the server's message, or "Login failed".
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, SessionError> {
        let ticket = self.inner.ticket();
        let response: AuthResponse = self
            .inner
            .client
            .post("/auth/login", &LoginRequest { email, password }, None)
            .await
            .map_err(|error| SessionError::wrap(&error, "Login failed"))?;

        Ok(self.adopt_auth(ticket, response))
    }

    /// Create an account; contract identical to [`Self::login`].
    ///
    /// # Errors
    ///
    /// Fails with the server's message, or "Registration failed".
    pub async fn register(&self, registration: &NewRegistration) -> Result<LoginOutcome, SessionError> {
        let ticket = self.inner.ticket();
        let response: AuthResponse = self
            .inner
            .client
            .post("/auth/register", registration, None)
            .await
            .map_err(|error| SessionError::wrap(&error, "Registration failed"))?;

        Ok(self.adopt_auth(ticket, response))
    }

    fn adopt_auth(&self, ticket: u64, response: AuthResponse) -> LoginOutcome {
        let AuthResponse {
            user,
            token,
            requires_verification,
        } = response;

        let credential = Credential::issued_now(token);
        let committed_credential = credential.clone();
        let committed_user = user.clone();
        let committed = self.inner.commit(ticket, move |state| {
            state.credential = Some(committed_credential);
            state.user = Some(committed_user);
            state.is_authenticated = true;
            state.loading = false;
        });

        // Persist only an adopted credential; a response superseded by a
        // logout or expiry must not reappear on the next start.
        if committed {
            if let Err(error) = self.inner.credentials.save(&credential) {
                // The in-memory session still works; only restarts lose it.
                tracing::warn!(error = %error, "failed to persist credential");
            }
        }

        LoginOutcome {
            user,
            requires_verification,
        }
    }

    /// Discard the credential everywhere and clear the session state.
    /// Idempotent; safe to call when already logged out.
    pub fn logout(&self) {
        self.inner.credentials.clear();
        let ticket = self.inner.ticket();
        self.inner.commit(ticket, |state| {
            state.credential = None;
            state.user = None;
            state.is_authenticated = false;
            state.loading = false;
        });
    }

    /// Confirm an email address with the token from the verification link.
    /// Works both logged in and out; when a user is present it is marked
    /// verified locally.
    ///
    /// # Errors
    ///
    /// Fails with the server's message, or "Email verification failed".
    pub async fn verify_email(&self, token: &str) -> Result<String, SessionError> {
        let auth = self.current_token();
        let ticket = self.inner.ticket();
        let response: MessageResponse = self
            .inner
            .client
            .post("/auth/verify-email", &VerifyEmailRequest { token }, auth.as_deref())
            .await
            .map_err(|error| SessionError::wrap(&error, "Email verification failed"))?;

        self.inner.commit(ticket, |state| {
            if let Some(user) = state.user.as_mut() {
                user.is_verified = true;
            }
        });
        Ok(response.message)
    }

    /// Ask the backend to send a fresh verification email. The server
    /// resolves the account from the attached credential; no payload and
    /// no local state change.
    ///
    /// # Errors
    ///
    /// Fails with the server's message, or "Failed to resend verification
    /// email".
    pub async fn resend_verification(&self) -> Result<String, SessionError> {
        let auth = self.current_token();
        let response: MessageResponse = self
            .inner
            .client
            .post_empty("/auth/resend-verification", auth.as_deref())
            .await
            .map_err(|error| SessionError::wrap(&error, "Failed to resend verification email"))?;
        Ok(response.message)
    }

    /// Submit profile changes; `user` is replaced wholesale with the
    /// server's returned record, never merged.
    ///
    /// # Errors
    ///
    /// Fails with the server's message, or "Profile update failed".
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, SessionError> {
        let auth = self.current_token();
        let ticket = self.inner.ticket();
        let response: ProfileResponse = self
            .inner
            .client
            .put("/users/profile", update, auth.as_deref())
            .await
            .map_err(|error| SessionError::wrap(&error, "Profile update failed"))?;

        let user = response.user;
        let committed = user.clone();
        self.inner.commit(ticket, move |state| state.user = Some(committed));
        Ok(user)
    }

    /// Re-fetch the current profile and replace `user`.
    ///
    /// # Errors
    ///
    /// Unlike the other operations this propagates the raw transport
    /// error; callers needing the classification get it intact.
    pub async fn refresh_user_data(&self) -> Result<UserProfile, ApiError> {
        let auth = self.current_token();
        let ticket = self.inner.ticket();
        let me: MeResponse = self.inner.client.get("/auth/me", auth.as_deref()).await?;

        let user = me.user;
        let committed = user.clone();
        self.inner.commit(ticket, move |state| state.user = Some(committed));
        Ok(user)
    }
}
