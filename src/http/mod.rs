//! HTTP protocol layer
//!
//! Protocol-level building blocks shared by the request handler: MIME
//! inference, conditional-request checks, Range parsing and response
//! builders. Nothing in here touches the filesystem.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

pub use range::parse_range_header;
pub use response::{
    build_method_not_allowed, build_not_found, build_not_modified, build_options_response,
    build_range_not_satisfiable, build_redirect,
};
