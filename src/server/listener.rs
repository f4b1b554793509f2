use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::net::tcp::OwnedWriteHalf;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::http::connection::Connection;
use crate::http::parser::ParserConfig;
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;

/// Writer handed to handlers for a TCP connection.
pub type TcpResponseWriter = ResponseWriter<OwnedWriteHalf>;

pub struct Server {
    listener: TcpListener,
    parser: ParserConfig,
}

impl Server {
    pub async fn bind(cfg: &ServerConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&cfg.listen_addr).await?;
        info!("Listening on {}", listener.local_addr()?);
        Ok(Self {
            listener,
            parser: cfg.parser_config(),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the returned future is dropped, running
    /// each one on its own task.
    pub async fn serve<H, Fut>(self, handler: H) -> anyhow::Result<()>
    where
        H: Fn(Request, TcpResponseWriter) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        loop {
            let (socket, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    continue;
                }
            };
            info!("Accepted connection from {}", peer);

            let handler = handler.clone();
            let conn = Connection::from_tcp(socket, self.parser.clone());
            tokio::spawn(async move {
                if let Err(e) = conn.run(handler).await {
                    error!("Connection error from {}: {}", peer, e);
                }
            });
        }
    }
}
