//! Test helpers: in-memory backend and an app server on an ephemeral port

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use bikawo_functions::{
    app_state::AppState,
    config::FailurePolicies,
    models::{job::ExternalJob, rate_limit::WindowStats},
    routes,
    services::backend::{Backend, BackendError},
};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the managed backend.
///
/// `check_mission_timeouts` drains the pending pool atomically, which is the
/// contract the real stored procedure provides.
#[derive(Default)]
pub struct FakeBackend {
    pub pending_expired: AtomicU64,
    pub failing: AtomicBool,
    pub window: Mutex<WindowStats>,
    pub jobs: Mutex<Vec<ExternalJob>>,
    pub categories: Mutex<Vec<String>>,
    pub sweep_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn with_expired(count: u64) -> Arc<Self> {
        let backend = Self::default();
        backend.pending_expired.store(count, Ordering::SeqCst);
        Arc::new(backend)
    }

    pub fn failing() -> Arc<Self> {
        let backend = Self::default();
        backend.failing.store(true, Ordering::SeqCst);
        Arc::new(backend)
    }

    fn check(&self) -> Result<(), BackendError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendError::Status {
                status: 503,
                body: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn check_mission_timeouts(&self) -> Result<u64, BackendError> {
        self.sweep_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.pending_expired.swap(0, Ordering::SeqCst))
    }

    async fn rate_limit_window(
        &self,
        _identifier: &str,
        _action: &str,
        _window_minutes: u32,
    ) -> Result<WindowStats, BackendError> {
        self.check()?;
        Ok(self.window.lock().unwrap().clone())
    }

    async fn fetch_external_jobs(&self, category: &str) -> Result<Vec<ExternalJob>, BackendError> {
        self.check()?;
        self.categories.lock().unwrap().push(category.to_string());
        Ok(self.jobs.lock().unwrap().clone())
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        self.check()
    }
}

pub fn state_with(backend: Arc<FakeBackend>, policies: FailurePolicies) -> AppState {
    AppState::new(backend, policies)
}

/// Serve `router` on an ephemeral 127.0.0.1 port and return its base URL.
pub async fn serve_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server error");
    });

    format!("http://{}", addr)
}

/// Serve the full application router and return its base URL.
pub async fn spawn_app(state: AppState) -> String {
    serve_router(routes::with_layers(routes::router(state))).await
}

pub fn sample_job(id: &str) -> ExternalJob {
    ExternalJob {
        id: id.to_string(),
        title: Some("Garde périscolaire".to_string()),
        description: Some("Sortie d'école et goûter".to_string()),
        category: Some("childcare".to_string()),
        hourly_rate: Some(14.0),
        location: Some("Lyon".to_string()),
        provider: Some("Nounou Express".to_string()),
        platform: Some("jobboard".to_string()),
        external_url: Some(format!("https://jobs.example.com/{}", id)),
        availability: Some(vec!["weekdays".to_string()]),
        extra: Default::default(),
    }
}
