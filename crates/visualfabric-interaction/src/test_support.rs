//! In-process HTTP server for adapter tests.

use axum::Router;
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("test listener should bind");
    let addr = listener.local_addr().expect("test listener should have an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server should run");
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("test listener should bind");
    let addr = listener.local_addr().expect("test listener should have an address");
    drop(listener);
    format!("http://{}", addr)
}
