//! HTTP client wrapper for the Life Harness API
//!
//! This module builds the base REST client, injects the bearer token on
//! every request once one exists, and exposes typed resource calls for
//! auth, profile, threads, entries, and autobiography generation.
//!
//! The error taxonomy is deliberately flat: any non-success status maps to
//! [`HarnessError::Api`] carrying the HTTP status and the server's
//! `{"detail": ...}` message when present.

use crate::config::ApiConfig;
use crate::error::{HarnessError, Result};

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub mod types;

use types::{
    Answer, Autobiography, AutobiographyRequest, CoverageCell, Credentials, EntryFilter,
    LifeEntry, Profile, ProfileUpdate, SealUpdate, StepControl, StepRequest, StepResponse,
    Thread, ThreadCreate, TokenResponse,
};

/// Error body shape returned by the server on failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// Typed client for the Life Harness REST API
///
/// Holds the base URL, the underlying HTTP client, and the current bearer
/// token. The token is attached to every outgoing request when present;
/// auth endpoints work without one.
///
/// # Examples
///
/// ```no_run
/// use lifeharness::api::ApiClient;
/// use lifeharness::config::ApiConfig;
///
/// # async fn example() -> lifeharness::error::Result<()> {
/// let client = ApiClient::new(&ApiConfig::default())?.with_token(Some("tok".to_string()));
/// let threads = client.list_threads().await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client from connection configuration
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("lifeharness/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HarnessError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach (or clear) the bearer token used for subsequent requests
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Replace the bearer token in place
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// The configured base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn handle<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.json().await.map_err(|e| {
                tracing::error!("Failed to parse response body: {}", e);
                HarnessError::Http(e)
            })?;
            Ok(body)
        } else {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            tracing::warn!("Request failed with status {}", status);
            Err(HarnessError::api(status.as_u16(), detail).into())
        }
    }

    // -- auth ---------------------------------------------------------------

    /// `POST /auth/register`
    pub async fn register(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let response = self
            .request(Method::POST, "/auth/register")
            .json(&Credentials {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        self.handle(response).await
    }

    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&Credentials {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        self.handle(response).await
    }

    // -- profile ------------------------------------------------------------

    /// `GET /profile`
    pub async fn get_profile(&self) -> Result<Profile> {
        let response = self.request(Method::GET, "/profile").send().await?;
        self.handle(response).await
    }

    /// `POST /profile` (upsert)
    pub async fn upsert_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        let response = self
            .request(Method::POST, "/profile")
            .json(update)
            .send()
            .await?;
        self.handle(response).await
    }

    // -- threads ------------------------------------------------------------

    /// `GET /threads`
    pub async fn list_threads(&self) -> Result<Vec<Thread>> {
        let response = self.request(Method::GET, "/threads").send().await?;
        self.handle(response).await
    }

    /// `POST /threads`
    pub async fn create_thread(&self, create: &ThreadCreate) -> Result<Thread> {
        let response = self
            .request(Method::POST, "/threads")
            .json(create)
            .send()
            .await?;
        self.handle(response).await
    }

    /// `GET /threads/{id}`
    pub async fn get_thread(&self, id: &str) -> Result<Thread> {
        let response = self
            .request(Method::GET, &format!("/threads/{}", id))
            .send()
            .await?;
        self.handle(response).await
    }

    /// `POST /threads/{id}/step`
    ///
    /// Advances the interview by one turn. The first call of a session
    /// sends no answer; later calls send the previous answer and a
    /// `continue` or `stop` control flag.
    pub async fn step_thread(&self, id: &str, request: &StepRequest) -> Result<StepResponse> {
        tracing::debug!(
            "Stepping thread {} (control: {:?}, has_answer: {})",
            id,
            request.control,
            request.last_answer.is_some()
        );
        let response = self
            .request(Method::POST, &format!("/threads/{}/step", id))
            .json(request)
            .send()
            .await?;
        self.handle(response).await
    }

    /// Convenience wrapper sending the given answer with `control: continue`
    pub async fn continue_thread(
        &self,
        id: &str,
        last_answer: Option<Answer>,
    ) -> Result<StepResponse> {
        self.step_thread(
            id,
            &StepRequest {
                last_answer,
                control: StepControl::Continue,
            },
        )
        .await
    }

    /// Convenience wrapper sending `control: stop` with no answer
    pub async fn stop_thread(&self, id: &str) -> Result<StepResponse> {
        self.step_thread(
            id,
            &StepRequest {
                last_answer: None,
                control: StepControl::Stop,
            },
        )
        .await
    }

    // -- entries ------------------------------------------------------------

    /// `GET /entries`, with filter dimensions omitted when unset
    pub async fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<LifeEntry>> {
        let params = filter.query();
        let mut builder = self.request(Method::GET, "/entries");
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        let response = builder.send().await?;
        self.handle(response).await
    }

    /// `GET /entries/{id}`
    pub async fn get_entry(&self, id: &str) -> Result<LifeEntry> {
        let response = self
            .request(Method::GET, &format!("/entries/{}", id))
            .send()
            .await?;
        self.handle(response).await
    }

    /// `PATCH /entries/{id}/seal`
    ///
    /// The only path through which an entry's visibility and seal fields
    /// change.
    pub async fn update_seal(&self, id: &str, update: &SealUpdate) -> Result<LifeEntry> {
        let response = self
            .request(Method::PATCH, &format!("/entries/{}/seal", id))
            .json(update)
            .send()
            .await?;
        self.handle(response).await
    }

    /// `GET /entries/coverage/grid`
    pub async fn coverage_grid(&self) -> Result<Vec<CoverageCell>> {
        let response = self
            .request(Method::GET, "/entries/coverage/grid")
            .send()
            .await?;
        self.handle(response).await
    }

    // -- autobiography ------------------------------------------------------

    /// `POST /autobiography/generate`
    pub async fn generate_autobiography(
        &self,
        request: &AutobiographyRequest,
    ) -> Result<Autobiography> {
        let response = self
            .request(Method::POST, "/autobiography/generate")
            .json(request)
            .send()
            .await?;
        self.handle(response).await
    }
}
