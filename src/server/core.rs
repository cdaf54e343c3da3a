use log::{error, info, warn};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, watch};

use crate::client::ClientRegistry;
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::server::session::handle_connection;
use crate::server::stats::spawn_stats_reporter;

/// The relay: one listener, one registry shared by every connection.
pub struct Server {
    client_registry: Arc<Mutex<ClientRegistry>>,
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Binds the listener described by `config`.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let socket = config.listen_socket();
        let listener = TcpListener::bind(&socket).await?;
        info!("Server bound to {}", listener.local_addr()?);

        Ok(Self {
            client_registry: Arc::new(Mutex::new(ClientRegistry::new())),
            listener,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections until `shutdown` resolves, then closes the
    /// listener and gives queued writes a grace period to flush. Connected
    /// clients are not notified.
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            "Mouffette Server started on ws://{}",
            self.listener
                .local_addr()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| self.config.listen_socket())
        );

        let (stop_tx, stop_rx) = watch::channel(false);
        let stats = spawn_stats_reporter(
            Arc::clone(&self.client_registry),
            self.config.stats_interval(),
            stop_rx,
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down Mouffette Server...");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        let client_registry = Arc::clone(&self.client_registry);

                        // Spawn a task per connection so the accept loop never blocks
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(stream, addr, client_registry).await {
                                warn!("WebSocket handshake with {} failed: {}", addr, e);
                            }
                        });
                    }
                    Err(e) => {
                        error!("Error accepting connection: {}", e);
                    }
                },
            }
        }

        let _ = stop_tx.send(true);
        let _ = stats.await;
        drop(self.listener);

        tokio::time::sleep(self.config.shutdown_grace()).await;
        info!("Server closed gracefully");
    }
}
