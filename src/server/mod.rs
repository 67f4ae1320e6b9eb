pub mod keep_alive;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::humanizer::Humanizer;
use crate::io::{PageView, render_page};
use crate::llm::{ChatClient, rewrite_with_llm};
use crate::models::{Engine, OutputMode, Outcome, Rejection, UNPROCESSABLE_MESSAGE};

pub const HEALTHZ_PATH: &str = "/v1/healthz";
pub const HUMANIZE_PATH: &str = "/v1/humanize";
const HEALTHZ_STATUS: &str = "ok";
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Shown when the form asks for the LLM engine but none is configured
pub const LLM_DISABLED_MESSAGE: &str = "Language model rewriting is not enabled on this server.";

/// Server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind, e.g. `0.0.0.0:5000`
    pub listen_addr: String,
    /// URL pinged periodically to keep a hosted instance awake
    pub keep_alive_url: Option<String>,
    /// Interval between keep-alive pings
    pub keep_alive_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            keep_alive_url: None,
            keep_alive_interval: Duration::from_secs(10 * 60),
        }
    }
}

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    humanizer: Arc<Humanizer>,
    llm: Option<Arc<ChatClient>>,
    seed: Option<u64>,
}

impl AppState {
    pub fn new(humanizer: Humanizer) -> Self {
        Self {
            humanizer: Arc::new(humanizer),
            llm: None,
            seed: None,
        }
    }

    /// Offer the LLM engine on the form
    pub fn with_llm(mut self, client: ChatClient) -> Self {
        self.llm = Some(Arc::new(client));
        self
    }

    /// Seed every request's generator identically (reproducible output)
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn rng(&self, request_seed: Option<u64>) -> StdRng {
        match request_seed.or(self.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ShutdownEvent {
    Pending,
    CtrlC,
    SigTerm,
    ListenerFailed,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("listen address may not be empty")]
    EmptyListenAddr,
    #[error("invalid listen address `{address}`: {source}")]
    InvalidListenAddr {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to determine local address: {source}")]
    LocalAddr {
        #[source]
        source: std::io::Error,
    },
    #[error("axum server error: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Deserialize)]
struct HumanizeForm {
    #[serde(default)]
    input_text: String,
    #[serde(default)]
    engine: Engine,
}

#[derive(Debug, Deserialize)]
struct HumanizeRequest {
    text: String,
    #[serde(default)]
    mode: OutputMode,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum HumanizeStatus {
    Humanized,
    Rejected,
}

#[derive(Debug, Serialize)]
struct HumanizeResponse {
    status: HumanizeStatus,
    output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<Rejection>,
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route(HUMANIZE_PATH, post(humanize_api))
        .route(HEALTHZ_PATH, get(healthz))
        .layer(middleware::from_fn(request_span))
        .with_state(state)
}

pub async fn serve(config: ServerConfig, state: AppState) -> Result<(), ServerError> {
    let listen_addr = parse_listen_addr(&config.listen_addr)?;
    let listener = bind_listener(listen_addr).await?;

    let local_addr = listener
        .local_addr()
        .map_err(|source| ServerError::LocalAddr { source })?;
    info!(%local_addr, llm = state.llm.is_some(), "humanizer server listening");

    let pinger = config
        .keep_alive_url
        .clone()
        .map(|url| keep_alive::spawn_keep_alive(url, config.keep_alive_interval));

    let (shutdown_tx, shutdown_rx) = watch::channel(ShutdownEvent::Pending);
    let shutdown_future = broadcast_shutdown(shutdown_tx);

    let app = build_router(state);
    let mut server_future = Box::pin(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_future)
            .await
    });
    let mut drain_timeout = Box::pin(drain_timeout_future(shutdown_rx.clone()));

    let result = tokio::select! {
        result = server_future.as_mut() => result.map_err(|source| ServerError::Serve { source }),
        _ = drain_timeout.as_mut() => Ok(()),
    };

    if let Some(pinger) = pinger {
        pinger.abort();
    }

    let final_event = *shutdown_rx.borrow();
    if final_event == ShutdownEvent::Pending {
        info!("server stopped without external shutdown signal");
    } else {
        info!(?final_event, "server shutdown complete");
    }

    result
}

async fn request_span(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "request",
        %request_id,
        method = %request.method(),
        path = %request.uri().path()
    );

    async move {
        let response = next.run(request).await;
        info!(status = %response.status(), "request completed");
        response
    }
    .instrument(span)
    .await
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&PageView {
        llm_available: state.llm.is_some(),
        ..Default::default()
    }))
}

async fn submit(State(state): State<AppState>, Form(form): Form<HumanizeForm>) -> Html<String> {
    // Submitted text is never logged, only its size
    info!(bytes = form.input_text.len(), engine = ?form.engine, "form submitted");

    let output = if form.input_text.trim().is_empty() {
        String::new()
    } else {
        match form.engine {
            Engine::Rules => {
                let mut rng = state.rng(None);
                state
                    .humanizer
                    .process(&form.input_text, OutputMode::Markup, &mut rng)
                    .into_display()
            }
            Engine::Llm => match &state.llm {
                Some(client) => {
                    rewrite_with_llm(
                        client.as_ref(),
                        &form.input_text,
                        OutputMode::Markup,
                        state.humanizer.config().min_words,
                    )
                    .await
                }
                None => {
                    warn!("LLM engine requested but not configured");
                    LLM_DISABLED_MESSAGE.to_string()
                }
            },
        }
    };

    Html(render_page(&PageView {
        input: &form.input_text,
        output_markup: &output,
        engine: form.engine,
        llm_available: state.llm.is_some(),
    }))
}

async fn humanize_api(
    State(state): State<AppState>,
    Json(request): Json<HumanizeRequest>,
) -> Json<HumanizeResponse> {
    let mut rng = state.rng(request.seed);
    let response = match state.humanizer.process(&request.text, request.mode, &mut rng) {
        Outcome::Humanized(output) => HumanizeResponse {
            status: HumanizeStatus::Humanized,
            output,
            rejection: None,
        },
        Outcome::Rejected(rejection) => HumanizeResponse {
            status: HumanizeStatus::Rejected,
            output: UNPROCESSABLE_MESSAGE.to_string(),
            rejection: Some(rejection),
        },
    };
    Json(response)
}

async fn healthz() -> impl IntoResponse {
    Json(HealthzResponse {
        status: HEALTHZ_STATUS,
    })
}

async fn wait_for_shutdown() -> ShutdownEvent {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => ShutdownEvent::CtrlC,
            Err(error) => {
                warn!(%error, "failed to capture Ctrl+C signal");
                ShutdownEvent::ListenerFailed
            }
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => match term.recv().await {
                Some(_) => ShutdownEvent::SigTerm,
                None => ShutdownEvent::ListenerFailed,
            },
            Err(error) => {
                warn!(%error, "failed to capture SIGTERM");
                ShutdownEvent::ListenerFailed
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending();

    tokio::select! {
        event = ctrl_c => event,
        event = sigterm => event,
    }
}

fn parse_listen_addr(addr: &str) -> Result<SocketAddr, ServerError> {
    let trimmed = addr.trim();
    if trimmed.is_empty() {
        return Err(ServerError::EmptyListenAddr);
    }

    trimmed
        .parse()
        .map_err(|source| ServerError::InvalidListenAddr {
            address: trimmed.to_string(),
            source,
        })
}

async fn bind_listener(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            address: addr.to_string(),
            source,
        })
}

fn broadcast_shutdown(
    sender: watch::Sender<ShutdownEvent>,
) -> impl Future<Output = ()> + Send + 'static {
    async move {
        let event = wait_for_shutdown().await;
        if let Err(error) = sender.send(event) {
            warn!(?event, %error, "failed to broadcast shutdown event");
        }
    }
}

fn drain_timeout_future(
    mut receiver: watch::Receiver<ShutdownEvent>,
) -> impl Future<Output = ()> + Send + 'static {
    async move {
        if receiver.changed().await.is_ok() {
            let event = *receiver.borrow_and_update();
            info!(?event, "shutdown signal received; draining connections");
            tokio::time::sleep(DRAIN_TIMEOUT).await;
            warn!(
                ?event,
                seconds = DRAIN_TIMEOUT.as_secs(),
                "graceful shutdown timed out; continuing shutdown"
            );
        }
    }
}
