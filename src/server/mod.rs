// Server module entry point
// Listener construction, accept loop and shutdown signalling.

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::bind_listener;

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::logger;

/// Accept connections until a shutdown signal arrives.
///
/// Each accepted connection is served on its own task; accept errors are
/// logged and the loop keeps going. Returning `Ok(())` means a clean
/// shutdown, which the process turns into exit code 0.
pub async fn run(listener: TcpListener, config: Arc<ServerConfig>) -> std::io::Result<()> {
    let shutdown = signal::shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _peer_addr)) => {
                        connection::handle_connection(stream, Arc::clone(&config));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                // In-flight connections finish on their own tasks.
                break;
            }
        }
    }

    Ok(())
}
