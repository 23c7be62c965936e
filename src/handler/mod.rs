//! Request handling
//!
//! Method validation and dispatch in `router`, filesystem resolution and
//! asset responses in `static_files`.

pub mod router;
pub mod static_files;

pub use router::handle_request;
