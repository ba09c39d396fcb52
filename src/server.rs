use crate::config::ServiceConfig;
use crate::error::ReconcileError;
use crate::query::{ReconcileParams, ReconcileRequest};
use crate::Reconciler;
use anyhow::Context;
use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Query, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

pub const RECONCILE_PATH: &str = "/reconcile";
const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

pub fn router(reconciler: Arc<Reconciler>) -> Router {
    Router::new()
        .route(RECONCILE_PATH, get(reconcile).post(reconcile))
        .layer(middleware::from_fn(allow_any_origin))
        .with_state(reconciler)
}

/// `GET|POST /reconcile`. Form fields are read from the body on POST and
/// from the query string on GET; a body that is not a form counts as empty.
pub async fn reconcile(
    State(reconciler): State<Arc<Reconciler>>,
    args: Result<Query<ReconcileParams>, QueryRejection>,
    form: Result<Form<ReconcileParams>, FormRejection>,
) -> Result<Json<Value>, ReconcileError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("reconcile", %request_id);

    async move {
        let args = args.map(|Query(p)| p).unwrap_or_else(|e| {
            debug!(error = %e, "ignoring unreadable query string");
            ReconcileParams::default()
        });
        let form = form.map(|Form(p)| p).unwrap_or_else(|e| {
            debug!(error = %e, "no form body");
            ReconcileParams::default()
        });

        let request = ReconcileRequest::from_params(&form, &args)?;
        debug!(?request, "parsed reconcile request");
        let body = reconciler.respond(request).await?;
        Ok::<_, ReconcileError>(Json(body))
    }
    .instrument(span)
    .await
}

/// Open CORS: every origin, preflight answered without touching the handler.
pub async fn allow_any_origin(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let requested_headers = request
            .headers()
            .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
            .cloned();

        let mut response = StatusCode::NO_CONTENT.into_response();
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        if let Some(requested) = requested_headers {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested);
        }
        return response;
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

pub async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    let reconciler = Arc::new(Reconciler::new(&config).context("failed to build archive client")?);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    info!(
        addr = %config.bind,
        search_url = %reconciler.archive().search_url(),
        timeout_secs = config.timeout.as_secs_f64(),
        "reconciliation service listening"
    );

    axum::serve(listener, router(reconciler))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            error!(error = %e, "cannot listen for Ctrl+C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
