//! HealthServer - runs the health router on its own task.
//!
//! The server owns a shutdown channel and its join handle, so the supervisor
//! can stop it and wait for in-flight requests to finish.

use std::io;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

/// Spawns the health server.
pub struct HealthServer;

impl HealthServer {
    /// Bind a listener on `addr`.
    pub async fn bind(addr: SocketAddr) -> io::Result<TcpListener> {
        TcpListener::bind(addr).await
    }

    /// Serve `router` on `listener` from a new task.
    pub fn spawn(listener: TcpListener, router: Router) -> io::Result<HealthServerHandle> {
        let local_addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    // Either an explicit stop or a dropped handle ends the server
                    let _ = shutdown_rx.await;
                })
                .await
        });

        debug!(%local_addr, "Health server task spawned");
        Ok(HealthServerHandle {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            task,
        })
    }
}

/// Lifecycle handle for a running health server.
#[derive(Debug)]
pub struct HealthServerHandle {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<io::Result<()>>,
}

impl HealthServerHandle {
    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Signal shutdown and wait for the server task to exit.
    pub async fn shutdown(mut self) -> io::Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        match self.task.await {
            Ok(result) => result,
            Err(join_err) => Err(io::Error::new(io::ErrorKind::Other, join_err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn raw_get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn serves_until_shutdown() {
        let listener = HealthServer::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let router = Router::new().route("/ping", get(|| async { "pong" }));
        let handle = HealthServer::spawn(listener, router).unwrap();
        let addr = handle.local_addr();

        assert_ne!(addr.port(), 0);
        let response = raw_get(addr, "/ping").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("pong"));

        handle.shutdown().await.unwrap();
        assert!(TcpStream::connect(addr).await.is_err());
    }
}
