//! Authentication session store
//!
//! Process-wide authentication state: the current bearer token, kept in
//! memory and mirrored into the OS native credential store (Keychain on
//! macOS, Secret Service on Linux, Windows Credential Manager on Windows)
//! so that a later invocation is still logged in without re-authenticating.
//!
//! Mutation happens only through [`Session::login`], [`Session::register`],
//! and [`Session::logout`]; everything else reads.

use crate::api::ApiClient;
use crate::error::{HarnessError, Result};

// ---------------------------------------------------------------------------
// TokenStore
// ---------------------------------------------------------------------------

/// Accessor for the keyring slot holding the bearer token.
///
/// The token is stored under a fixed service/account pair; there is exactly
/// one slot per machine user. The service name is parameterized so tests can
/// use a scratch slot without clobbering a real login.
#[derive(Debug, Clone)]
pub struct TokenStore {
    service: String,
}

impl TokenStore {
    /// Keyring service name used by the real client
    pub const DEFAULT_SERVICE: &'static str = "lifeharness";

    /// Keyring account name under which the token is stored
    const ACCOUNT: &'static str = "api_token";

    /// Store accessor for the default service slot
    pub fn new() -> Self {
        Self::with_service(Self::DEFAULT_SERVICE)
    }

    /// Store accessor for a custom service slot
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, Self::ACCOUNT)
            .map_err(|e| HarnessError::Keyring(e).into())
    }

    /// Persist the bearer token
    pub fn save(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .map_err(HarnessError::Keyring)?;
        Ok(())
    }

    /// Load the persisted bearer token
    ///
    /// Returns `Ok(None)` when no token has been saved, so callers can
    /// distinguish "not logged in yet" from a genuine keyring error.
    pub fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(HarnessError::Keyring(e).into()),
        }
    }

    /// Delete the persisted bearer token
    ///
    /// A no-op when no token exists, so it is safe to call on logout
    /// regardless of prior state.
    pub fn delete(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(HarnessError::Keyring(e).into()),
        }
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Authentication session: in-memory token plus its durable mirror.
///
/// Constructed once at startup via [`Session::load`], which restores any
/// previously persisted token before command dispatch runs.
pub struct Session {
    token: Option<String>,
    store: TokenStore,
}

impl Session {
    /// Restore the session from the default token store
    pub fn load() -> Result<Self> {
        Self::with_store(TokenStore::new())
    }

    /// Restore the session from a specific token store
    pub fn with_store(store: TokenStore) -> Result<Self> {
        let token = store.load()?;
        if token.is_some() {
            tracing::debug!("Restored persisted session token");
        }
        Ok(Self { token, store })
    }

    /// Whether a token is currently held
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The current bearer token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Guard for protected commands: the token, or an authentication error
    ///
    /// Evaluated at every command dispatch, never cached, so logging out
    /// makes the very next protected command fail here.
    pub fn require_token(&self) -> Result<&str> {
        self.token.as_deref().ok_or_else(|| {
            HarnessError::Authentication(
                "not logged in; run `lifeharness login` first".to_string(),
            )
            .into()
        })
    }

    /// Log in and persist the returned token
    ///
    /// The server error is propagated untouched; the caller decides user
    /// messaging.
    pub async fn login(&mut self, api: &ApiClient, email: &str, password: &str) -> Result<()> {
        let response = api.login(email, password).await?;
        self.adopt_token(response.access_token)
    }

    /// Register a new account and persist the returned token
    pub async fn register(&mut self, api: &ApiClient, email: &str, password: &str) -> Result<()> {
        let response = api.register(email, password).await?;
        self.adopt_token(response.access_token)
    }

    /// Clear both the persisted and in-memory token unconditionally
    ///
    /// No network call is made. The in-memory token is dropped first so the
    /// session reads as logged out even if the keyring delete fails.
    pub fn logout(&mut self) -> Result<()> {
        self.token = None;
        self.store.delete()
    }

    fn adopt_token(&mut self, token: String) -> Result<()> {
        self.store.save(&token)?;
        self.token = Some(token);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn in_memory_session(token: Option<&str>) -> Session {
        Session {
            token: token.map(str::to_string),
            store: TokenStore::with_service("lifeharness-test-session"),
        }
    }

    #[test]
    fn test_is_authenticated_without_token() {
        let session = in_memory_session(None);
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_is_authenticated_with_token() {
        let session = in_memory_session(Some("tok"));
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));
    }

    #[test]
    fn test_require_token_fails_without_token() {
        let session = in_memory_session(None);
        let err = session.require_token().unwrap_err();
        assert!(err.to_string().contains("not logged in"));
    }

    #[test]
    fn test_require_token_returns_token() {
        let session = in_memory_session(Some("tok"));
        assert_eq!(session.require_token().unwrap(), "tok");
    }

    // -----------------------------------------------------------------------
    // Keyring integration tests  (require system keyring; skipped in CI)
    // -----------------------------------------------------------------------

    #[test]
    #[ignore = "requires system keyring"]
    fn test_token_store_roundtrip() {
        let store = TokenStore::with_service("lifeharness-test-roundtrip");
        store.save("abc123").expect("save");
        assert_eq!(store.load().expect("load").as_deref(), Some("abc123"));
        store.delete().expect("delete");
        assert!(store.load().expect("load after delete").is_none());
    }

    #[test]
    #[ignore = "requires system keyring"]
    fn test_token_store_delete_is_idempotent() {
        let store = TokenStore::with_service("lifeharness-test-idempotent");
        store.delete().expect("first delete");
        store.delete().expect("second delete is no-op");
    }

    #[test]
    #[ignore = "requires system keyring"]
    fn test_logout_clears_both_layers() {
        let store = TokenStore::with_service("lifeharness-test-logout");
        store.save("tok").expect("save");

        let mut session = Session::with_store(store.clone()).expect("load");
        assert!(session.is_authenticated());

        session.logout().expect("logout");
        assert!(!session.is_authenticated());
        assert!(store.load().expect("load").is_none());
    }
}
