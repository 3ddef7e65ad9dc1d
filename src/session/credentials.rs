//! Bearer-credential persistence.
//!
//! DESIGN
//! ======
//! The token is opaque to the client and stored with an absolute expiry
//! seven days from issuance. The file store is the native stand-in for the
//! original secure, strict-same-site browser cookie: the credential lives
//! in a JSON file under the user's config directory, owner-readable only
//! on Unix, and is never exposed through any broader channel. An expired
//! or unreadable credential is discarded on load as if absent.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Validity window applied when a credential is issued.
pub const CREDENTIAL_TTL_DAYS: i64 = 7;

/// Environment variable overriding the credential file location.
pub const CREDENTIALS_PATH_ENV: &str = "VALUERDESK_CREDENTIALS";

/// A persisted bearer token with its expiry instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// Opaque bearer token.
    pub token: String,
    /// Instant after which the credential is treated as absent.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl Credential {
    /// Wrap a freshly issued token with the standard validity window.
    #[must_use]
    pub fn issued_now(token: String) -> Self {
        Self {
            token,
            expires_at: OffsetDateTime::now_utc() + Duration::days(CREDENTIAL_TTL_DAYS),
        }
    }

    /// Whether the validity window has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= OffsetDateTime::now_utc()
    }
}

/// Storage for the single persisted credential.
pub trait CredentialStore: Send + Sync {
    /// Load the stored credential, discarding it if expired or unreadable.
    fn load(&self) -> Option<Credential>;

    /// Persist a credential, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; the caller decides whether a
    /// failed persist is fatal (the in-memory session keeps working).
    fn save(&self, credential: &Credential) -> std::io::Result<()>;

    /// Remove the stored credential. Safe to call when none exists.
    fn clear(&self);
}

/// File-backed store under the user's config directory.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Resolve the credential file location: the `VALUERDESK_CREDENTIALS`
    /// override when set, else `<config-dir>/valuerdesk/credentials.json`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CREDENTIALS_PATH_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("valuerdesk")
            .join("credentials.json")
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<Credential> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Credential>(&raw) {
            Ok(credential) if !credential.is_expired() => Some(credential),
            Ok(_) => {
                tracing::debug!(path = %self.path.display(), "stored credential expired; removing");
                self.clear();
                None
            }
            Err(error) => {
                tracing::debug!(error = %error, "stored credential unreadable; removing");
                self.clear();
                None
            }
        }
    }

    fn save(&self, credential: &Credential) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(credential)?;
        fs::write(&self.path, body)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn clear(&self) {
        if let Err(error) = fs::remove_file(&self.path) {
            if error.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(error = %error, "failed to remove credential file");
            }
        }
    }
}

/// In-memory store for tests and embedding without a filesystem.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credential>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Credential> {
        let mut slot = self.slot.lock().ok()?;
        if slot.as_ref().is_some_and(Credential::is_expired) {
            *slot = None;
        }
        (*slot).clone()
    }

    fn save(&self, credential: &Credential) -> std::io::Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(credential.clone());
        }
        Ok(())
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}
