//! Blog API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api::{AuthApi, CategoryApi, PostApi, TagApi};
use super::auth_client::AuthClient;
use super::models::{
    Category, CreateCategoryRequest, CreateTagsRequest, LoginRequest, Post, PostFilter,
    PostRequest, RegisterRequest, Tag, TokenPair, User,
};
use super::refresh::RefreshCoordinator;
use super::session::{AuthSession, SessionSink, SessionState};
use super::token_store::{KeyValueStorage, TokenStore};
use crate::error::{ApiError, BackendError, Error, Result};

/// Tunables for [`BlogClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Per-request HTTP timeout
    pub timeout: Duration,
    /// Delay between the auth-failure signal and the login redirect
    pub redirect_delay: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            redirect_delay: Duration::from_millis(300),
        }
    }
}

/// A replayable request description
#[derive(Debug, Clone)]
struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    fn with_body<B: Serialize>(method: Method, path: impl Into<String>, body: &B) -> Result<Self> {
        let mut request = Self::new(method, path);
        request.body = Some(serde_json::to_value(body)?);
        Ok(request)
    }

    fn query(mut self, params: Vec<(String, String)>) -> Self {
        self.query = params;
        self
    }
}

/// Blog API client.
///
/// Attaches the stored access token to every request and, on a 401, lets the
/// [`RefreshCoordinator`] obtain a new one before retrying the request once.
pub struct BlogClient {
    http: HttpClient,
    base_url: String,
    tokens: TokenStore,
    session: Arc<AuthSession>,
    auth: Arc<AuthClient>,
    coordinator: RefreshCoordinator,
}

impl BlogClient {
    /// Create a client for `base_url` (including the `/api/v1` prefix).
    pub fn new(
        base_url: impl Into<String>,
        storage: Arc<dyn KeyValueStorage>,
        sink: Arc<dyn SessionSink>,
        options: ClientOptions,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = HttpClient::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let tokens = TokenStore::new(storage);
        let session = Arc::new(AuthSession::new());
        let auth = Arc::new(AuthClient::new(http.clone(), base_url.clone()));
        let coordinator = RefreshCoordinator::new(
            tokens.clone(),
            session.clone(),
            sink,
            auth.clone(),
            options.redirect_delay,
        );

        Ok(Self {
            http,
            base_url,
            tokens,
            session,
            auth,
            coordinator,
        })
    }

    /// Wait for pending session signals, such as a scheduled login
    /// redirect, before the client goes away.
    pub async fn shutdown(&self) {
        self.coordinator.flush_signals().await;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Initialize the session from stored tokens.
    ///
    /// Without stored tokens the session is anonymous and no request is made.
    /// An expired access token is refreshed first when a refresh token is
    /// stored. The token is then confirmed with `GET /auth/me`.
    pub async fn restore_session(&self) -> SessionState {
        if !self.tokens.has_valid_tokens() {
            let stale = self.tokens.access_token();
            match stale.filter(|_| self.tokens.refresh_token().is_some()) {
                Some(stale) => {
                    log::debug!("Stored access token expired; refreshing");
                    if let Err(e) = self.coordinator.fresh_token(Some(stale.as_str())).await {
                        log::debug!("Could not renew stored session: {}", e);
                        self.session.sign_out();
                        return self.session.snapshot();
                    }
                }
                None => {
                    log::debug!("No valid stored tokens; session is anonymous");
                    self.session.sign_out();
                    return self.session.snapshot();
                }
            }
        }

        match self.whoami().await {
            Ok(user) => self.session.sign_in(Some(user)),
            Err(Error::Api(err))
                if matches!(err, ApiError::AuthExpired(_)) || err.status() == Some(401) =>
            {
                log::debug!("Stored session rejected: {}", err);
                if let Err(e) = self.tokens.clear() {
                    log::warn!("Failed to clear stored tokens: {}", e);
                }
                self.session.sign_out();
            }
            Err(e) => {
                // Token is still locally valid; keep the session without a profile
                log::warn!("Could not verify session: {}", e);
                self.session.sign_in(None);
            }
        }

        self.session.snapshot()
    }

    async fn start_session(&self, pair: TokenPair) -> Result<SessionState> {
        self.tokens.save(&pair)?;
        self.session.sign_in(None);

        match self.whoami().await {
            Ok(user) => self.session.sign_in(Some(user)),
            Err(e) => log::warn!("Signed in, but could not load profile: {}", e),
        }

        Ok(self.session.snapshot())
    }

    /// Send a request, refreshing the access token and retrying once on 401.
    async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let mut retried = false;

        loop {
            let token = self.tokens.access_token();
            let response = self.dispatch(&request, token.as_deref()).await?;

            if response.status() == StatusCode::UNAUTHORIZED && !retried {
                log::debug!(
                    "{} {} returned 401; coordinating token refresh",
                    request.method,
                    request.path
                );
                retried = true;
                self.coordinator.fresh_token(token.as_deref()).await?;
                continue;
            }

            return decode(response).await;
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        access_token: Option<&str>,
    ) -> std::result::Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        log::debug!("{} {}", request.method, request.path);

        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = access_token {
            builder = builder.header(
                AUTHORIZATION,
                format!("{} {}", self.tokens.token_type(), token),
            );
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        builder.send().await.map_err(ApiError::from)
    }
}

/// Decode a response body, normalizing non-success statuses.
///
/// An empty success body decodes as JSON `null`, which is what `()` expects.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

    if !status.is_success() {
        return Err(ApiError::Backend(BackendError::from_response(status, &text)).into());
    }

    let body = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(body).map_err(|e| {
        ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
    })
}

#[async_trait]
impl AuthApi for BlogClient {
    async fn login(&self, email: &str, password: &str) -> Result<SessionState> {
        let pair = self
            .auth
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        self.start_session(pair).await
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<SessionState> {
        let pair = self
            .auth
            .register(&RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        self.start_session(pair).await
    }

    async fn logout(&self) -> Result<()> {
        self.coordinator.settled().await;

        match self.tokens.refresh_token() {
            Some(refresh_token) => {
                let authorization = self.tokens.authorization();
                if let Err(e) = self
                    .auth
                    .logout(&refresh_token, authorization.as_deref())
                    .await
                {
                    log::warn!("Server-side logout failed: {}", e);
                }
            }
            None => log::debug!("No refresh token stored; logging out locally"),
        }

        self.tokens.clear()?;
        self.session.sign_out();
        Ok(())
    }

    async fn whoami(&self) -> Result<User> {
        self.execute(ApiRequest::get("/auth/me")).await
    }
}

#[async_trait]
impl PostApi for BlogClient {
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>> {
        self.execute(ApiRequest::get("/posts").query(filter.to_query_params()))
            .await
    }

    async fn get_post(&self, id: &str) -> Result<Post> {
        self.execute(ApiRequest::get(format!("/posts/{}", id))).await
    }

    async fn list_drafts(&self) -> Result<Vec<Post>> {
        self.execute(ApiRequest::get("/posts/drafts")).await
    }

    async fn create_post(&self, request: &PostRequest) -> Result<Post> {
        self.execute(ApiRequest::with_body(Method::POST, "/posts", request)?)
            .await
    }

    async fn update_post(&self, id: &str, request: &PostRequest) -> Result<Post> {
        self.execute(ApiRequest::with_body(
            Method::PUT,
            format!("/posts/{}", id),
            request,
        )?)
        .await
    }

    async fn delete_post(&self, id: &str) -> Result<()> {
        self.execute(ApiRequest::delete(format!("/posts/{}", id)))
            .await
    }
}

#[async_trait]
impl CategoryApi for BlogClient {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.execute(ApiRequest::get("/categories")).await
    }

    async fn create_category(&self, name: &str) -> Result<Category> {
        let body = CreateCategoryRequest {
            name: name.to_string(),
        };
        self.execute(ApiRequest::with_body(Method::POST, "/categories", &body)?)
            .await
    }

    async fn delete_category(&self, id: &str) -> Result<()> {
        self.execute(ApiRequest::delete(format!("/categories/{}", id)))
            .await
    }
}

#[async_trait]
impl TagApi for BlogClient {
    async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.execute(ApiRequest::get("/tags")).await
    }

    async fn create_tags(&self, names: &[String]) -> Result<Vec<Tag>> {
        let body = CreateTagsRequest {
            names: names.to_vec(),
        };
        self.execute(ApiRequest::with_body(Method::POST, "/tags", &body)?)
            .await
    }

    async fn delete_tag(&self, id: &str) -> Result<()> {
        self.execute(ApiRequest::delete(format!("/tags/{}", id)))
            .await
    }
}
