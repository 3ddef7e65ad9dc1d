//! Configured HTTP client with uniform response classification.
//!
//! ARCHITECTURE
//! ============
//! Every backend call goes through one `HttpClient` over a fixed base URL
//! with a bounded per-request timeout. Credentials are passed per request;
//! the client holds no authorization state of its own. Each failure is
//! classified once, notifies the user at most once, and is always re-raised
//! to the caller; the client never retries and never swallows.
//!
//! A 401 is the exception to local handling: it is not a recoverable error
//! for any caller, so the client broadcasts a session-expired event to its
//! registered observers (the session layer) and returns
//! [`ApiError::Unauthorized`].

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ApiError, ErrorBody};
use super::notify::Notifier;

/// Per-request timeout applied to every call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Callback invoked when any request observes a rejected credential.
pub type ExpiryObserver = Arc<dyn Fn() + Send + Sync>;

/// The single configured request client shared by the whole application.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    notifier: Arc<dyn Notifier>,
    expiry_observers: RwLock<Vec<ExpiryObserver>>,
}

impl HttpClient {
    /// Build a client for `base_url`. Trailing slashes are normalized away
    /// so endpoint paths can always start with `/`.
    pub fn new(base_url: &str, notifier: Arc<dyn Notifier>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            notifier,
            expiry_observers: RwLock::new(Vec::new()),
        })
    }

    /// The notifier this client reports failures through.
    #[must_use]
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Register an observer for credential-expiry events.
    pub fn on_session_expired(&self, observer: ExpiryObserver) {
        if let Ok(mut observers) = self.expiry_observers.write() {
            observers.push(observer);
        }
    }

    /// `GET` an endpoint and decode the JSON success body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] after issuing its notification.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, auth: Option<&str>) -> Result<T, ApiError> {
        let request = self.http.get(self.url(path));
        self.execute(Self::attach(request, auth)).await
    }

    /// `POST` a JSON body to an endpoint and decode the success body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] after issuing its notification.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: Option<&str>,
    ) -> Result<T, ApiError> {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(Self::attach(request, auth)).await
    }

    /// `POST` an endpoint with no request body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] after issuing its notification.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str, auth: Option<&str>) -> Result<T, ApiError> {
        let request = self.http.post(self.url(path));
        self.execute(Self::attach(request, auth)).await
    }

    /// `PUT` a JSON body to an endpoint and decode the success body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] after issuing its notification.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: Option<&str>,
    ) -> Result<T, ApiError> {
        let request = self.http.put(self.url(path)).json(body);
        self.execute(Self::attach(request, auth)).await
    }

    /// `DELETE` an endpoint and decode the JSON success body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] after issuing its notification.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str, auth: Option<&str>) -> Result<T, ApiError> {
        let request = self.http.delete(self.url(path));
        self.execute(Self::attach(request, auth)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn attach(request: reqwest::RequestBuilder, auth: Option<&str>) -> reqwest::RequestBuilder {
        match auth {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => {
                self.notifier.error("Network error. Please check your connection.");
                return Err(ApiError::Network(error));
            }
        };

        let status = response.status();
        if status.is_success() {
            return match response.json::<T>().await {
                Ok(value) => Ok(value),
                Err(error) => {
                    self.notifier.error("An unexpected error occurred.");
                    Err(ApiError::Decode(error))
                }
            };
        }

        // Error envelopes are optional; a missing or malformed body is
        // treated the same as an empty one.
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        Err(self.classify(status, body))
    }

    fn classify(&self, status: StatusCode, body: ErrorBody) -> ApiError {
        match status.as_u16() {
            401 => {
                // Hard session reset; the observers clear credentials and
                // raise the login redirect. No notification of its own.
                self.emit_session_expired();
                ApiError::Unauthorized
            }
            status @ (403 | 404) => {
                if let Some(message) = &body.message {
                    self.notifier.error(message);
                }
                ApiError::Rejected {
                    status,
                    message: body.message,
                }
            }
            422 => {
                let details = body.details.unwrap_or_default();
                if details.is_empty() {
                    match &body.message {
                        Some(message) => self.notifier.error(message),
                        None => self.notifier.error("An unexpected error occurred."),
                    }
                } else {
                    for detail in &details {
                        self.notifier.error(detail);
                    }
                }
                ApiError::Validation {
                    message: body.message,
                    details,
                }
            }
            429 => {
                self.notifier.error("Too many requests. Please try again later.");
                ApiError::RateLimited
            }
            status @ 500..=599 => {
                self.notifier.error("Server error. Please try again later.");
                ApiError::Server { status }
            }
            status => {
                match &body.message {
                    Some(message) => self.notifier.error(message),
                    None => self.notifier.error("An unexpected error occurred."),
                }
                ApiError::Unexpected {
                    status,
                    message: body.message,
                }
            }
        }
    }

    fn emit_session_expired(&self) {
        let observers = match self.expiry_observers.read() {
            Ok(observers) => observers.clone(),
            Err(_) => return,
        };
        for observer in observers {
            observer();
        }
    }
}
