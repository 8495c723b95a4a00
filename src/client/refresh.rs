//! Token refresh coordination
//!
//! At most one refresh call is in flight at a time. The first request to hit
//! a 401 becomes the leader and performs the refresh; every request that hits
//! a 401 while the refresh is running queues behind it and is released, in
//! arrival order, with the outcome once it settles.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::models::TokenPair;
use super::session::{AuthSession, SessionSink};
use super::token_store::TokenStore;
use crate::error::ApiError;

const ABANDONED: &str = "token refresh was abandoned";
const NO_REFRESH_TOKEN: &str = "no refresh token available";
const SESSION_ENDED: &str = "session has ended";

/// Exchanges a refresh token for a new token pair.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError>;
}

/// A request parked until the in-flight refresh settles.
type PendingRequest = oneshot::Sender<Result<String, ApiError>>;

#[derive(Default)]
enum RefreshState {
    #[default]
    Idle,
    Refreshing(VecDeque<PendingRequest>),
}

/// What a caller should do after reporting a 401.
enum Role {
    /// Another refresh already replaced the stale token
    Current(String),
    /// The session was torn down since the request was sent
    Ended,
    /// A refresh is running; wait for it
    Queued(oneshot::Receiver<Result<String, ApiError>>),
    /// Perform the refresh
    Leader,
}

/// Serializes token refreshes and fans the outcome out to waiting requests.
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
    tokens: TokenStore,
    session: Arc<AuthSession>,
    sink: Arc<dyn SessionSink>,
    refresher: Arc<dyn TokenRefresher>,
    redirect_delay: Duration,
    redirects: Mutex<Vec<JoinHandle<()>>>,
}

impl RefreshCoordinator {
    pub fn new(
        tokens: TokenStore,
        session: Arc<AuthSession>,
        sink: Arc<dyn SessionSink>,
        refresher: Arc<dyn TokenRefresher>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            state: Mutex::new(RefreshState::Idle),
            tokens,
            session,
            sink,
            refresher,
            redirect_delay,
            redirects: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether a refresh call is currently in flight
    #[cfg(test)]
    pub fn is_refreshing(&self) -> bool {
        matches!(*self.lock(), RefreshState::Refreshing(_))
    }

    /// Get an access token to replace `stale`, the token a request was
    /// rejected with.
    ///
    /// Starts a refresh if none is running, joins the running one otherwise.
    /// If the stored token already differs from `stale`, it is returned
    /// without any network call; if the tokens were cleared since, the
    /// request fails without starting a new refresh.
    pub async fn fresh_token(&self, stale: Option<&str>) -> Result<String, ApiError> {
        match self.join(stale) {
            Role::Current(token) => {
                log::debug!("Access token already replaced; replaying with current token");
                Ok(token)
            }
            Role::Ended => Err(ApiError::AuthExpired(SESSION_ENDED.to_string())),
            Role::Queued(rx) => rx.await.unwrap_or_else(|_| Err(abandoned())),
            Role::Leader => {
                let lease = RefreshLease {
                    coordinator: self,
                    settled: false,
                };
                let outcome = self.run_refresh().await;
                lease.settle(outcome)
            }
        }
    }

    /// Wait until no refresh is in flight. Returns at once when idle.
    pub async fn settled(&self) {
        let rx = {
            let mut state = self.lock();
            match &mut *state {
                RefreshState::Idle => return,
                RefreshState::Refreshing(queue) => {
                    let (tx, rx) = oneshot::channel();
                    queue.push_back(tx);
                    rx
                }
            }
        };
        let _ = rx.await;
    }

    /// Wait until every scheduled login redirect has been delivered.
    pub async fn flush_signals(&self) {
        let handles = {
            let mut redirects = self.redirects.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *redirects)
        };
        for handle in handles {
            if let Err(e) = handle.await {
                log::debug!("Login redirect task failed: {}", e);
            }
        }
    }

    fn join(&self, stale: Option<&str>) -> Role {
        let mut state = self.lock();
        if let RefreshState::Refreshing(queue) = &mut *state {
            let (tx, rx) = oneshot::channel();
            queue.push_back(tx);
            log::debug!("Refresh in flight; queued request ({} waiting)", queue.len());
            return Role::Queued(rx);
        }

        match self.tokens.access_token() {
            Some(current) if stale != Some(current.as_str()) => return Role::Current(current),
            // Tokens were cleared after this request was sent
            None if stale.is_some() => return Role::Ended,
            _ => {}
        }

        *state = RefreshState::Refreshing(VecDeque::new());
        Role::Leader
    }

    async fn run_refresh(&self) -> Result<String, ApiError> {
        let Some(refresh_token) = self.tokens.refresh_token() else {
            return Err(ApiError::AuthExpired(NO_REFRESH_TOKEN.to_string()));
        };

        log::debug!("Refreshing access token");
        let pair = self
            .refresher
            .refresh(&refresh_token)
            .await
            .map_err(|e| match e {
                ApiError::AuthExpired(reason) => ApiError::AuthExpired(reason),
                other => ApiError::AuthExpired(format!("token refresh failed: {}", other)),
            })?;

        // The in-memory view is updated even when persisting fails
        if let Err(e) = self.tokens.save(&pair) {
            log::warn!("Failed to persist refreshed tokens: {}", e);
        }

        Ok(pair.access_token)
    }

    fn finish(&self, outcome: &Result<String, ApiError>) {
        match outcome {
            Ok(token) => {
                let queue = self.take_queue();
                log::debug!("Token refreshed; replaying {} queued requests", queue.len());
                for pending in queue {
                    let _ = pending.send(Ok(token.clone()));
                }
            }
            Err(err) => {
                log::debug!("Token refresh failed: {}", err);
                if let Err(e) = self.tokens.clear() {
                    log::warn!("Failed to clear stored tokens: {}", e);
                }
                self.session.sign_out();

                let queue = self.take_queue();
                for pending in queue {
                    let _ = pending.send(Err(err.clone()));
                }

                self.sink.auth_failed(err);
                self.schedule_redirect();
            }
        }
    }

    fn abandon(&self) {
        let queue = self.take_queue();
        log::debug!("Refresh abandoned; rejecting {} queued requests", queue.len());
        for pending in queue {
            let _ = pending.send(Err(abandoned()));
        }
    }

    fn take_queue(&self) -> VecDeque<PendingRequest> {
        match std::mem::take(&mut *self.lock()) {
            RefreshState::Refreshing(queue) => queue,
            RefreshState::Idle => VecDeque::new(),
        }
    }

    fn schedule_redirect(&self) {
        let sink = Arc::clone(&self.sink);
        let delay = self.redirect_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sink.redirect_to_login();
        });
        self.redirects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(handle);
    }
}

fn abandoned() -> ApiError {
    ApiError::AuthExpired(ABANDONED.to_string())
}

/// Held by the leader for the duration of a refresh. Dropping it unsettled
/// returns the coordinator to idle.
struct RefreshLease<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl RefreshLease<'_> {
    fn settle(mut self, outcome: Result<String, ApiError>) -> Result<String, ApiError> {
        self.settled = true;
        self.coordinator.finish(&outcome);
        outcome
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.coordinator.abandon();
        }
    }
}
