use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing, Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::info;
use url::Url;

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

/// Template parameters the fake relay requires before it accepts a message.
const REQUIRED_PARAMS: [&str; 3] = ["name", "email", "message"];

/// Runs the fake mail relay until the process is stopped.
pub async fn start_server(host: IpAddr, port: u16, public_key: String) -> anyhow::Result<()> {
    let listener = bind(host, port).await?;

    info!("Starting mail relay testing server on {host}:{port}");
    info!("Mail relay send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Public key: {public_key:?}");
    info!("Requests are accepted if the user id matches the public key and all template params are set");

    serve(listener, public_key).await
}

/// Starts the fake mail relay on an ephemeral local port in the background and
/// returns its send endpoint.
pub async fn spawn(public_key: impl Into<String>) -> anyhow::Result<Url> {
    let listener = bind([127, 0, 0, 1].into(), 0).await?;
    let addr = listener.local_addr()?;
    let public_key = public_key.into();

    tokio::spawn(async move {
        if let Err(err) = serve(listener, public_key).await {
            tracing::error!("Mail relay testing server failed: {err:#}");
        }
    });

    send_endpoint(addr)
}

fn send_endpoint(addr: SocketAddr) -> anyhow::Result<Url> {
    format!("http://{addr}{SEND_ROUTE}")
        .parse()
        .context("Failed to build send endpoint URL")
}

async fn bind(host: IpAddr, port: u16) -> anyhow::Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))
}

async fn serve(listener: TcpListener, public_key: String) -> anyhow::Result<()> {
    let router = Router::new()
        .route(SEND_ROUTE, routing::post(send))
        .with_state(Arc::<str>::from(public_key));

    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    #[serde(default)]
    template_params: serde_json::Map<String, serde_json::Value>,
}

async fn send(
    state: State<Arc<str>>,
    Json(request): Json<SendRequest>,
) -> (StatusCode, &'static str) {
    if request.user_id != *state.0 {
        return (StatusCode::BAD_REQUEST, "The public key is invalid");
    }

    if request.service_id.is_empty() || request.template_id.is_empty() {
        return (StatusCode::BAD_REQUEST, "The service ID and template ID are required");
    }

    let complete = REQUIRED_PARAMS.iter().all(|param| {
        request
            .template_params
            .get(*param)
            .and_then(|value| value.as_str())
            .is_some_and(|value| !value.is_empty())
    });
    if !complete {
        return (StatusCode::BAD_REQUEST, "Template parameters are incomplete");
    }

    info!(
        service_id = %request.service_id,
        template_id = %request.template_id,
        "Accepted contact message"
    );

    (StatusCode::OK, "OK")
}
