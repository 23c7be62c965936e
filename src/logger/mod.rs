//! Logging
//!
//! The output contract is deliberately small: exactly one startup line on
//! stdout with the listening URL, and timestamped diagnostics on stderr
//! for conditions worth an operator's attention.

use chrono::Local;
use std::net::SocketAddr;
use std::path::Path;

/// Write a timestamped line to stderr.
fn write_error(level: &str, message: &str) {
    eprintln!(
        "[{}] [{level}] {message}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
}

/// The single startup line: the listening URL, to stdout.
pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    let host = if addr.ip().is_unspecified() {
        "localhost".to_string()
    } else {
        addr.ip().to_string()
    };
    println!(
        "Serving {} at http://{host}:{}",
        root.display(),
        addr.port()
    );
}

pub fn log_error(message: &str) {
    write_error("ERROR", message);
}

pub fn log_warning(message: &str) {
    write_error("WARN", message);
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error("ERROR", &format!("Failed to serve connection: {err:?}"));
}
