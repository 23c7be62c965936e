//! Static asset server library
//!
//! Serves the contents of a `public` directory next to the executable
//! over HTTP: GET/HEAD with inferred Content-Type, `index.html` for
//! directories, conditional GET and byte ranges, 404 for everything
//! else.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
