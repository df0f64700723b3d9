//! HTTP API handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::cluster::{MembershipSource, ServiceRegistry};
use crate::error::{RenderError, StatusError};
use crate::metrics;
use crate::view::{render, RenderFormat, ViewModel};

/// Consecutive render failures after which the fault is reported as persistent.
pub const PERSISTENT_FAILURE_THRESHOLD: u64 = 3;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Membership snapshot source.
    pub membership: Arc<dyn MembershipSource>,
    /// Service registry snapshot source.
    pub registry: Arc<dyn ServiceRegistry>,
    /// Render failures since the last successful render.
    pub render_failures: Arc<AtomicU64>,
}

impl AppState {
    /// Create app state over the two cluster sources.
    pub fn new(membership: Arc<dyn MembershipSource>, registry: Arc<dyn ServiceRegistry>) -> Self {
        Self {
            membership,
            registry,
            render_failures: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create app state from a single value implementing both sources.
    pub fn from_cluster<C>(cluster: Arc<C>) -> Self
    where
        C: MembershipSource + ServiceRegistry + 'static,
    {
        Self::new(cluster.clone(), cluster)
    }

    /// Number of render failures since the last success.
    pub fn consecutive_render_failures(&self) -> u64 {
        self.render_failures.load(Ordering::SeqCst)
    }

    fn record_render_success(&self) {
        self.render_failures.store(0, Ordering::SeqCst);
    }

    fn record_render_failure(&self, format: RenderFormat, err: &RenderError) {
        let count = self.render_failures.fetch_add(1, Ordering::SeqCst) + 1;
        metrics::inc_render_failures(&format.to_string());

        if count >= PERSISTENT_FAILURE_THRESHOLD {
            error!(
                "Persistent render failure ({} consecutive) for {} response: {}",
                count, format, err
            );
        } else {
            error!("Failed to render {} response: {}", format, err);
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

impl IntoResponse for StatusError {
    fn into_response(self) -> Response {
        let status = match &self {
            StatusError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// `GET /services{extension}`: JSON for `.json`, the HTML page otherwise.
pub async fn services_with_extension(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Response {
    match page.strip_prefix("services") {
        Some(extension) if !extension.is_empty() => {
            respond(&state, "services_ext", RenderFormat::from_extension(extension))
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// `GET /servers`: alias of the extension route with no extension.
pub async fn servers(State(state): State<AppState>) -> Response {
    respond(&state, "servers", RenderFormat::from_extension(""))
}

/// `GET /services`: the HTML page.
pub async fn services_page(State(state): State<AppState>) -> Response {
    respond(&state, "services", RenderFormat::Html)
}

fn respond(state: &AppState, route: &'static str, format: RenderFormat) -> Response {
    metrics::inc_requests(route, &format.to_string());

    match build_body(state, format) {
        Ok(body) => ([(header::CONTENT_TYPE, format.content_type())], body).into_response(),
        Err(e) => e.into_response(),
    }
}

fn build_body(state: &AppState, format: RenderFormat) -> Result<String, StatusError> {
    let _timer = metrics::LatencyTimer::new(format.to_string());

    let view = ViewModel::assemble(state.membership.as_ref(), state.registry.as_ref())
        .map_err(|e| {
            warn!("Cannot build status view: {}", e);
            metrics::inc_upstream_failures(e.source_name);
            e
        })?;

    debug!(
        "Rendering {} view with {} members and {} services",
        format,
        view.members.len(),
        view.services.len()
    );

    match render(&view, format) {
        Ok(body) => {
            state.record_render_success();
            Ok(body)
        }
        Err(e) => {
            state.record_render_failure(format, &e);
            Err(e.into())
        }
    }
}
