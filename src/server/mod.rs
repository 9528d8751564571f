//! HTTP transport for the recomputation pipeline
//!
//! | Route | Body | Response |
//! |-------|------|----------|
//! | `GET /api/health` | | `{"status": "ok"}` |
//! | `GET /api/dataset` | | [DatasetInfo](crate::data::DatasetInfo) |
//! | `POST /api/curve` | `{filters, brands}` | [Snapshot] of a stateless cycle |
//! | `POST /api/sessions` | | `{id, snapshot}` for a new session |
//! | `POST /api/sessions/{id}` | [Change] | [Snapshot] |
//! | `DELETE /api/sessions/{id}` | | `204` |
//!
//! Every error, including a malformed id or body, is answered with `{"error": ...}`.
//! Sessions unused for `server.session_idle_secs` are dropped in the background.

mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use dashmap::DashMap;
use std::sync::{Arc, Mutex, PoisonError, TryLockError};
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::ServerSettings;
use crate::data::Dataset;
use crate::pipeline::{Change, Session, Snapshot};
use crate::SharecurveError;

pub use handlers::{ApiError, CurveRequest, SessionCreated};

/// A session and the last time a client touched it
struct SessionSlot {
    session: Session,
    last_used: Instant,
}

type SharedSlot = Arc<Mutex<SessionSlot>>;

/// State shared by all handlers
///
/// The dataset is read-only. The map lock is only held to look a session up; each
/// session then has its own lock for the duration of its cycle, so cycles of one
/// session never overlap and other sessions are not held up.
pub struct AppState {
    pub dataset: Arc<Dataset>,
    sessions: DashMap<Uuid, SharedSlot>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            sessions: DashMap::new(),
        }
    }

    /// Register a new session and run its first cycle
    pub fn open_session(&self) -> (Uuid, Snapshot) {
        let mut session = Session::new(Arc::clone(&self.dataset));
        let snapshot = session.refresh();
        let id = Uuid::new_v4();
        let slot = SessionSlot {
            session,
            last_used: Instant::now(),
        };
        self.sessions.insert(id, Arc::new(Mutex::new(slot)));
        tracing::info!(%id, open = self.sessions.len(), "session opened");
        (id, snapshot)
    }

    /// Run a cycle for an existing session
    pub fn update_session(&self, id: Uuid, change: Change) -> Result<Snapshot, ApiError> {
        let slot = self
            .sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(ApiError::SessionNotFound(id))?;

        let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.last_used = Instant::now();
        Ok(slot.session.apply(change))
    }

    pub fn close_session(&self, id: Uuid) -> Result<(), ApiError> {
        self.sessions
            .remove(&id)
            .map(|_| tracing::info!(%id, "session closed"))
            .ok_or(ApiError::SessionNotFound(id))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop sessions nobody has used for longer than `max_idle`
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        match Instant::now().checked_sub(max_idle) {
            Some(cutoff) => self.evict_unused_since(cutoff),
            None => 0,
        }
    }

    /// Drop sessions last used at or before `cutoff`
    ///
    /// A session whose cycle is running right now is in use and always kept.
    pub fn evict_unused_since(&self, cutoff: Instant) -> usize {
        let mut evicted = 0;
        self.sessions.retain(|_, slot| {
            let keep = match slot.try_lock() {
                Ok(slot) => slot.last_used > cutoff,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().last_used > cutoff,
                Err(TryLockError::WouldBlock) => true,
            };
            if !keep {
                evicted += 1;
            }
            keep
        });
        if evicted > 0 {
            tracing::info!(evicted, open = self.sessions.len(), "idle sessions evicted");
        }
        evicted
    }
}

/// Build the axum router with all routes
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/dataset", get(handlers::dataset_info))
        .route("/api/curve", post(handlers::curve))
        .route("/api/sessions", post(handlers::create_session))
        .route(
            "/api/sessions/{id}",
            post(handlers::update_session).delete(handlers::delete_session),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the web server and run until Ctrl+C
pub async fn serve(dataset: Arc<Dataset>, settings: &ServerSettings) -> Result<(), SharecurveError> {
    let state = Arc::new(AppState::new(dataset));
    let reaper = settings
        .session_idle()
        .map(|max_idle| tokio::spawn(evict_idle_sessions(Arc::clone(&state), max_idle)));
    let app = router(state);

    let address = settings.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Some(reaper) = reaper {
        reaper.abort();
    }
    served?;
    tracing::info!("server stopped");
    Ok(())
}

async fn evict_idle_sessions(state: Arc<AppState>, max_idle: Duration) {
    let period = (max_idle / 4).max(Duration::from_secs(1));
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        state.evict_idle(max_idle);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
