//! Listener bootstrap: bind, serve, shut down.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, RouteTable};
use crate::config::Config;
use crate::error::{Result, ServiceError};

/// A bound listener paired with the router it will serve.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    addr: SocketAddr,
    router: Router,
}

impl Server {
    /// Bind the configured address and attach `table`.
    ///
    /// A bind failure is reported as [`ServiceError::Startup`].
    pub async fn bind(config: &Config, table: RouteTable) -> Result<Self> {
        let requested = config.socket_addr()?;
        let listener = TcpListener::bind(requested)
            .await
            .map_err(|source| ServiceError::Startup {
                addr: requested,
                source,
            })?;
        let addr = listener
            .local_addr()
            .map_err(|source| ServiceError::Startup {
                addr: requested,
                source,
            })?;

        Ok(Self {
            listener,
            addr,
            router: create_router(table),
        })
    }

    /// The address actually bound; differs from the request when port 0 was asked for.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr;
        info!("HTTP server listening on {}", addr);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| ServiceError::Startup { addr, source })?;

        info!("HTTP server on {} stopped", addr);
        Ok(())
    }
}

/// Bind with the standard routes and serve until `shutdown` resolves.
pub async fn serve<F>(config: &Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let server = Server::bind(config, RouteTable::standard()).await?;
    server.run(shutdown).await
}
