use std::future::Future;

use tokio::net::TcpListener;

use crate::{router::router, state::AppContext};

/// Runs the HTTP server until `shutdown` resolves, then tears the context
/// down. The listener stops admitting connections and drains in-flight
/// requests before any dependency is released; a serve error is logged and
/// does not skip the teardown.
pub async fn serve<F>(context: AppContext, listener: TcpListener, shutdown: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(context.database.clone(), context.cache.clone());

    tracing::info!("listening on {:?}", listener.local_addr().unwrap());
    if let Err(error) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        tracing::error!(error = %error, "server exited with error");
    }

    context.teardown().await;
}
