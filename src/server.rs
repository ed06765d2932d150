//! HTTP/1 boundary: routing, JSON bodies, and the accept loop.

use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use log::{debug, error, info};
use tokio::net::TcpListener;

use crate::data::{FilteredView, RecordFilter};
use crate::response::{build_dashboard, FilterOptions};
use crate::state::AppState;

pub type ResponseBody = BoxBody<Bytes, std::io::Error>;

static NOTFOUND: &[u8] = b"Not found";
static INTERNAL_ERROR: &[u8] = b"Internal Server Error";

fn full(bytes: impl Into<Bytes>) -> ResponseBody {
    Full::new(bytes.into()).map_err(|e| match e {}).boxed()
}

fn json_response(body: Vec<u8>) -> Result<Response<ResponseBody>> {
    Response::builder()
        .header(CONTENT_TYPE, "application/json")
        .body(full(body))
        .map_err(|e| anyhow!("Failed to build response: {}", e))
}

fn not_found() -> Response<ResponseBody> {
    let mut resp = Response::new(full(NOTFOUND));
    *resp.status_mut() = StatusCode::NOT_FOUND;
    resp
}

fn internal_error() -> Response<ResponseBody> {
    let mut resp = Response::new(full(INTERNAL_ERROR));
    *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    resp
}

/// `GET /api/data`: filter, aggregate, and serialize on the blocking pool.
async fn handle_data(query: Option<&str>, state: &AppState) -> Result<Response<ResponseBody>> {
    let filter = RecordFilter::from_query(query.unwrap_or(""));
    let store = state.store();

    let body = tokio::task::spawn_blocking(move || {
        let view = FilteredView::new(&store, &filter);
        debug!("{} of {} records match {:?}", view.len(), store.len(), filter);
        serde_json::to_vec(&build_dashboard(&view))
    })
    .await
    .context("dashboard job did not complete")?
    .context("serializing dashboard")?;

    json_response(body)
}

/// `GET /api/options`: every industry and country in the dataset.
fn handle_options(state: &AppState) -> Result<Response<ResponseBody>> {
    let store = state.store();
    let options = FilterOptions {
        industries: store.industries.clone(),
        countries: store.countries.clone(),
    };
    json_response(serde_json::to_vec(&options).context("serializing options")?)
}

/// Dispatch one request by method and path.
pub async fn route(
    method: &Method,
    path: &str,
    query: Option<&str>,
    state: &AppState,
) -> Result<Response<ResponseBody>> {
    debug!("{method} {path}");
    match (method, path) {
        (&Method::GET | &Method::HEAD, "/api/data") => handle_data(query, state).await,
        (&Method::GET | &Method::HEAD, "/api/options") => handle_options(state),
        _ => {
            info!("{} Request to unknown endpoint: {}", method, path);
            Ok(not_found())
        }
    }
}

async fn handle_request<B>(req: Request<B>, state: Arc<AppState>) -> Response<ResponseBody> {
    let (parts, _body) = req.into_parts();
    route(&parts.method, parts.uri.path(), parts.uri.query(), &state)
        .await
        .unwrap_or_else(|e| {
            error!("Request handling failed: {e:#}");
            internal_error()
        })
}

/// Accept connections until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                let (stream, peer) = match accept_result {
                    Ok(conn) => conn,
                    Err(e) => {
                        error!("Failed to accept connection: {e}");
                        continue;
                    }
                };
                debug!("Connection from {peer}");

                let io = TokioIo::new(stream);
                let state = Arc::clone(&state);

                tokio::task::spawn(async move {
                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { Ok::<_, Infallible>(handle_request(req, state).await) }
                    });
                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection: {err}");
                    }
                });
            }
            _ = &mut shutdown => {
                info!("Shutting down");
                return Ok(());
            }
        }
    }
}

/// Resolve on SIGINT or SIGTERM.
#[cfg(unix)]
pub async fn shutdown_signal() -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).context("Failed to setup SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to setup SIGINT handler")?;
    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM"),
        _ = sigint.recv() => info!("Received SIGINT"),
    }
    Ok(())
}

#[cfg(not(unix))]
pub async fn shutdown_signal() -> Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Received Ctrl-C");
    Ok(())
}

/// Reload the dataset on the blocking pool. Load errors are logged inside
/// [`AppState::reload`] and leave the previous store live.
pub async fn reload_in_background(state: Arc<AppState>) {
    if let Err(e) = tokio::task::spawn_blocking(move || state.reload()).await {
        error!("Dataset reload task failed: {e}");
    }
}

/// Reload the dataset every time the process receives SIGHUP.
#[cfg(unix)]
pub fn spawn_reload_on_hangup(state: Arc<AppState>) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sighup = signal(SignalKind::hangup()).context("Failed to setup SIGHUP handler")?;
    tokio::task::spawn(async move {
        while sighup.recv().await.is_some() {
            info!("Received SIGHUP, reloading {}", state.data_path().display());
            reload_in_background(Arc::clone(&state)).await;
        }
    });
    Ok(())
}
