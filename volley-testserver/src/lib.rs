use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::{Duration, sleep};

pub const PATH_HEALTH: &str = "/health";
pub const PATH_INFO: &str = "/api/info";
pub const PATH_COMPARISON: &str = "/api/comparison";
pub const PATH_METRICS: &str = "/api/metrics";
pub const PATH_ERROR: &str = "/error";
pub const PATH_SLOW: &str = "/slow";
pub const PATH_HANG: &str = "/hang";

#[derive(Debug, Clone, Default)]
pub struct TestServerStats {
    requests_total: Arc<AtomicU64>,
    health_checks: Arc<AtomicU64>,
}

impl TestServerStats {
    fn inc_requests_total(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    fn inc_health_checks(&self) {
        self.health_checks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }

    pub fn health_checks(&self) -> u64 {
        self.health_checks.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct InfoResponse {
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct MetricsResponse {
    requests_total: u64,
    health_checks: u64,
}

async fn handle_health(State(stats): State<TestServerStats>) -> Json<HealthResponse> {
    stats.inc_requests_total();
    stats.inc_health_checks();
    Json(HealthResponse { status: "ok" })
}

async fn handle_info(State(stats): State<TestServerStats>) -> Json<InfoResponse> {
    stats.inc_requests_total();
    Json(InfoResponse {
        service: "volley-testserver",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn handle_comparison(State(stats): State<TestServerStats>) -> Json<serde_json::Value> {
    stats.inc_requests_total();
    Json(serde_json::json!({ "instances": [] }))
}

async fn handle_metrics(State(stats): State<TestServerStats>) -> Json<MetricsResponse> {
    stats.inc_requests_total();
    Json(MetricsResponse {
        requests_total: stats.requests_total(),
        health_checks: stats.health_checks(),
    })
}

async fn handle_error(State(stats): State<TestServerStats>) -> (StatusCode, &'static str) {
    stats.inc_requests_total();
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

#[derive(Debug, Deserialize)]
struct SlowParams {
    ms: Option<u64>,
}

async fn handle_slow(
    State(stats): State<TestServerStats>,
    Query(params): Query<SlowParams>,
) -> &'static str {
    stats.inc_requests_total();
    sleep(Duration::from_millis(params.ms.unwrap_or(50))).await;
    "slow"
}

async fn handle_hang(State(stats): State<TestServerStats>) -> &'static str {
    stats.inc_requests_total();
    // Never responds; the caller's timeout decides.
    std::future::pending::<()>().await;
    "unreachable"
}

pub fn router(stats: TestServerStats) -> Router {
    Router::new()
        .route(PATH_HEALTH, get(handle_health))
        .route(PATH_INFO, get(handle_info))
        .route(PATH_COMPARISON, get(handle_comparison))
        .route(PATH_METRICS, get(handle_metrics))
        .route(PATH_ERROR, get(handle_error))
        .route(PATH_SLOW, get(handle_slow))
        .route(PATH_HANG, get(handle_hang))
        .with_state(stats)
}

pub struct TestServer {
    addr: SocketAddr,
    base_url: String,
    stats: TestServerStats,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let stats = TestServerStats::default();
        let app = router(stats.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = serve.await;
        });

        let base_url = format!("http://{addr}");

        Ok(Self {
            addr,
            base_url,
            stats,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn stats(&self) -> &TestServerStats {
        &self.stats
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if self.shutdown_tx.is_some()
            && let Some(task) = self.task.take()
        {
            task.abort();
        }
    }
}
