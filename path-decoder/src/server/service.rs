use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use super::handler::handle;
use super::tap::{target_of_request_line, RawRequestTarget, RequestLineTap};
use super::AppState;

/// Bind `cfg.listen_addr()` and serve until `shutdown` resolves.
pub async fn serve(state: Arc<AppState>, shutdown: impl Future<Output = ()>) -> Result<()> {
    let listen = state.cfg.listen_addr();
    let listener = TcpListener::bind(&listen)
        .await
        .with_context(|| format!("bind {listen} failed"))?;
    tracing::info!("path-decoder listening on {}", listen);

    serve_on(listener, state, shutdown).await;
    Ok(())
}

/// Accept loop over an already bound listener. HTTP/1.1 only, one request per
/// connection so the captured request line always belongs to the request served.
pub async fn serve_on(listener: TcpListener, state: Arc<AppState>, shutdown: impl Future<Output = ()>) {
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("path-decoder shutdown");
                return;
            }
            res = listener.accept() => {
                let (stream, peer) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        tracing::warn!("accept error: {}", e);
                        continue;
                    }
                };

                let state = state.clone();
                tokio::spawn(async move {
                    let tap = RequestLineTap::new(stream);
                    let request_line = tap.request_line();
                    let io = TokioIo::new(tap);

                    let svc = service_fn(move |mut req: Request<Incoming>| {
                        if let Some(target) = request_line.get().and_then(|l| target_of_request_line(l)) {
                            req.extensions_mut().insert(RawRequestTarget(target.to_string()));
                        }
                        handle(req, Some(peer), state.clone())
                    });

                    let mut builder = hyper::server::conn::http1::Builder::new();
                    builder.keep_alive(false);
                    if let Err(e) = builder.serve_connection(io, svc).await {
                        tracing::warn!(peer = %peer, "conn error: {}", e);
                    }
                });
            }
        }
    }
}
