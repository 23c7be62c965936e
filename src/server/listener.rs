// Listener construction
// Builds the TCP listener the accept loop runs on.

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create the listening socket for `addr`.
///
/// SO_REUSEADDR is set so a restart does not trip over sockets in
/// TIME_WAIT. SO_REUSEPORT is deliberately not set: two live instances
/// on the same port would be a deployment mistake, and the second bind
/// must fail.
///
/// # Errors
///
/// Returns the underlying `io::Error` when the socket cannot be created
/// or the address is already in use; the caller treats this as fatal.
pub fn bind_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    #[tokio::test]
    async fn test_second_bind_on_same_port_fails() {
        let any = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
        let first = bind_listener(any).unwrap();
        let bound = first.local_addr().unwrap();
        assert!(bind_listener(bound).is_err());
    }
}
