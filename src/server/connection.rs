// Connection handling
// Serves a single accepted TCP connection.

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::handler;
use crate::logger;

/// Serve one connection on its own task.
///
/// Wraps the stream in `TokioIo` and serves HTTP/1.1 with keep-alive.
/// Requests on different connections proceed independently; the only
/// shared state is the read-only config.
pub fn handle_connection(stream: tokio::net::TcpStream, config: Arc<ServerConfig>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| {
                let config = Arc::clone(&config);
                async move { handler::handle_request(req, config).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
