//! Server configuration
//!
//! Everything here is fixed at process start: the port is a constant and
//! the asset root is derived from the executable's own location. There is
//! no config file, no CLI surface and no environment lookup.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Port the server listens on.
pub const DEFAULT_PORT: u16 = 3000;

/// Name of the asset directory, resolved next to the executable.
pub const ASSET_DIR: &str = "public";

/// Index file tried when a request resolves to a directory.
pub const INDEX_FILE: &str = "index.html";

/// Immutable server configuration, shared read-only across connections.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (all interfaces).
    pub addr: SocketAddr,
    /// Canonicalized asset root directory.
    pub root: PathBuf,
}

impl ServerConfig {
    /// Resolve the configuration for this process.
    ///
    /// The asset root is `<dir of executable>/public`, canonicalized. A
    /// missing or unreadable root is a fatal startup error.
    pub fn resolve() -> io::Result<Self> {
        let exe = std::env::current_exe()?;
        let exe_dir = exe.parent().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "executable has no parent directory",
            )
        })?;
        Self::with_root(exe_dir.join(ASSET_DIR))
    }

    /// Build a configuration around an explicit asset root.
    pub fn with_root(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().canonicalize().map_err(|e| {
            io::Error::new(
                e.kind(),
                format!(
                    "asset directory '{}' is not accessible: {e}",
                    root.as_ref().display()
                ),
            )
        })?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("asset root '{}' is not a directory", root.display()),
            ));
        }
        Ok(Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            root,
        })
    }
}
