//! Static file serving
//!
//! Resolves request paths inside the asset root and builds the response:
//! file bytes with inferred Content-Type, `index.html` for directories,
//! 404 for everything else. The traversal guard canonicalizes the
//! candidate path and requires it to stay under the (already canonical)
//! root, so symlinks follow native filesystem semantics and anything
//! escaping the root is refused.

use crate::config::{ServerConfig, INDEX_FILE};
use crate::handler::router::RequestContext;
use crate::http::range::RangeSpec;
use crate::http::{self, cache, mime, response::AssetHeaders};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Result of mapping a request path onto the asset root.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    /// A regular file to serve.
    File(PathBuf),
    /// A directory reached without a trailing slash; redirect to `path/`.
    Directory,
    /// Nothing servable at this path.
    NotFound,
}

/// Map a request path onto the asset root.
///
/// The relative path is joined under `root` and canonicalized; a result
/// outside `root` (traversal, symlink escape) is rejected. Directory
/// paths with a trailing slash fall through to their `index.html`.
pub fn resolve_path(root: &Path, request_path: &str) -> Resolved {
    let relative = Path::new(request_path.trim_start_matches('/'));

    // Refuse whole `..` components before touching the filesystem. A `..`
    // inside a filename ("jquery..min.js") is a Normal component and
    // passes through untouched.
    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return Resolved::NotFound;
    }
    let mut candidate = root.join(relative);

    if candidate.is_dir() {
        if !request_path.ends_with('/') {
            return Resolved::Directory;
        }
        candidate = candidate.join(INDEX_FILE);
    }

    // Missing files land here; that is the ordinary 404 path.
    let Ok(canonical) = candidate.canonicalize() else {
        return Resolved::NotFound;
    };
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        return Resolved::NotFound;
    }
    if !canonical.is_file() {
        return Resolved::NotFound;
    }
    Resolved::File(canonical)
}

/// Serve the asset a request resolves to.
pub async fn serve_asset(
    ctx: &RequestContext<'_>,
    config: &ServerConfig,
) -> Response<Full<Bytes>> {
    let file_path = match resolve_path(&config.root, ctx.path) {
        Resolved::File(path) => path,
        Resolved::Directory => {
            return http::build_redirect(&format!("{}/", ctx.path));
        }
        Resolved::NotFound => {
            return http::build_not_found(ctx.method, ctx.path);
        }
    };

    let metadata = match fs::metadata(&file_path).await {
        Ok(m) => m,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to stat '{}': {e}",
                file_path.display()
            ));
            return http::build_not_found(ctx.method, ctx.path);
        }
    };
    let modified = metadata.modified().ok();
    let etag = cache::generate_etag(metadata.len(), modified);

    // Conditional GET: ETag wins; Last-Modified is only consulted when the
    // client sent no ETag validator.
    if cache::etag_matches(ctx.if_none_match.as_deref(), &etag)
        || (ctx.if_none_match.is_none()
            && cache::unmodified_since(ctx.if_modified_since.as_deref(), modified))
    {
        return http::build_not_modified(&etag);
    }

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            // The file vanished between resolution and read.
            logger::log_error(&format!(
                "Failed to read '{}': {e}",
                file_path.display()
            ));
            return http::build_not_found(ctx.method, ctx.path);
        }
    };

    let last_modified = modified.map(cache::http_date);
    let headers = AssetHeaders {
        content_type: mime::content_type_for(
            file_path.extension().and_then(|e| e.to_str()),
        ),
        etag: &etag,
        last_modified: last_modified.as_deref(),
    };

    let total_size = content.len();
    match http::parse_range_header(ctx.range.as_deref(), total_size) {
        RangeSpec::Partial { start, end } => http::response::build_partial_response(
            Bytes::from(content[start..=end].to_vec()),
            &headers,
            start,
            end,
            total_size,
            ctx.is_head,
        ),
        RangeSpec::Unsatisfiable => http::build_range_not_satisfiable(total_size),
        RangeSpec::Full => http::response::build_asset_response(
            Bytes::from(content),
            &headers,
            ctx.is_head,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    /// Create a throwaway asset root populated with a few files.
    fn asset_root() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pubserv-test-{}-{}",
            std::process::id(),
            DIR_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        stdfs::create_dir_all(dir.join("docs")).unwrap();
        stdfs::write(dir.join("index.html"), b"<h1>home</h1>").unwrap();
        stdfs::write(dir.join("app.css"), b"body{}").unwrap();
        stdfs::write(dir.join("docs/index.html"), b"<h1>docs</h1>").unwrap();
        stdfs::write(dir.join("docs/guide.txt"), b"guide").unwrap();
        stdfs::write(dir.join("jquery..min.js"), b"window.$=1;").unwrap();
        dir.canonicalize().unwrap()
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            method: "GET",
            path,
            is_head: false,
            if_none_match: None,
            if_modified_since: None,
            range: None,
        }
    }

    #[test]
    fn test_resolve_plain_file() {
        let root = asset_root();
        assert_eq!(
            resolve_path(&root, "/app.css"),
            Resolved::File(root.join("app.css"))
        );
    }

    #[test]
    fn test_resolve_root_to_index() {
        let root = asset_root();
        assert_eq!(
            resolve_path(&root, "/"),
            Resolved::File(root.join("index.html"))
        );
    }

    #[test]
    fn test_resolve_directory_without_slash_redirects() {
        let root = asset_root();
        assert_eq!(resolve_path(&root, "/docs"), Resolved::Directory);
    }

    #[test]
    fn test_resolve_directory_with_slash_to_index() {
        let root = asset_root();
        assert_eq!(
            resolve_path(&root, "/docs/"),
            Resolved::File(root.join("docs/index.html"))
        );
    }

    #[test]
    fn test_resolve_missing_file() {
        let root = asset_root();
        assert_eq!(resolve_path(&root, "/nope.js"), Resolved::NotFound);
    }

    #[test]
    fn test_resolve_blocks_traversal() {
        let root = asset_root();
        assert_eq!(
            resolve_path(&root, "/../../etc/passwd"),
            Resolved::NotFound
        );
        assert_eq!(
            resolve_path(&root, "/docs/../../../etc/passwd"),
            Resolved::NotFound
        );
    }

    #[test]
    fn test_resolve_parent_of_root_is_not_a_redirect() {
        // `/..` must not resolve to the root directory and answer 301.
        let root = asset_root();
        assert_eq!(resolve_path(&root, "/.."), Resolved::NotFound);
        assert_eq!(resolve_path(&root, "/../"), Resolved::NotFound);
    }

    #[test]
    fn test_resolve_filename_containing_double_dots() {
        let root = asset_root();
        assert_eq!(
            resolve_path(&root, "/jquery..min.js"),
            Resolved::File(root.join("jquery..min.js"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_blocks_symlink_escape() {
        let root = asset_root();
        std::os::unix::fs::symlink("/etc/passwd", root.join("pw")).unwrap();
        assert_eq!(resolve_path(&root, "/pw"), Resolved::NotFound);
    }

    #[tokio::test]
    async fn test_serve_returns_file_bytes() {
        let config = ServerConfig::with_root(asset_root()).unwrap();
        let resp = serve_asset(&ctx("/app.css"), &config).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/css");
        assert_eq!(resp.headers()["Content-Length"], "6");
    }

    #[tokio::test]
    async fn test_serve_missing_is_404() {
        let config = ServerConfig::with_root(asset_root()).unwrap();
        let resp = serve_asset(&ctx("/missing.png"), &config).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_serve_directory_redirect() {
        let config = ServerConfig::with_root(asset_root()).unwrap();
        let resp = serve_asset(&ctx("/docs"), &config).await;
        assert_eq!(resp.status(), 301);
        assert_eq!(resp.headers()["Location"], "/docs/");
    }

    #[tokio::test]
    async fn test_serve_conditional_get() {
        let config = ServerConfig::with_root(asset_root()).unwrap();
        let first = serve_asset(&ctx("/docs/guide.txt"), &config).await;
        let etag = first.headers()["ETag"].to_str().unwrap().to_string();

        let mut revalidate = ctx("/docs/guide.txt");
        revalidate.if_none_match = Some(etag.clone());
        let resp = serve_asset(&revalidate, &config).await;
        assert_eq!(resp.status(), 304);
        assert_eq!(resp.headers()["ETag"].to_str().unwrap(), etag);
    }

    #[tokio::test]
    async fn test_serve_range_request() {
        let config = ServerConfig::with_root(asset_root()).unwrap();
        let mut partial = ctx("/docs/guide.txt");
        partial.range = Some("bytes=0-2".to_string());
        let resp = serve_asset(&partial, &config).await;
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 0-2/5");
        assert_eq!(resp.headers()["Content-Length"], "3");
    }

    #[tokio::test]
    async fn test_serve_unsatisfiable_range() {
        let config = ServerConfig::with_root(asset_root()).unwrap();
        let mut partial = ctx("/docs/guide.txt");
        partial.range = Some("bytes=50-".to_string());
        let resp = serve_asset(&partial, &config).await;
        assert_eq!(resp.status(), 416);
        assert_eq!(resp.headers()["Content-Range"], "bytes */5");
    }

    #[tokio::test]
    async fn test_serve_head_has_empty_body() {
        let config = ServerConfig::with_root(asset_root()).unwrap();
        let mut head = ctx("/app.css");
        head.is_head = true;
        let resp = serve_asset(&head, &config).await;
        assert_eq!(resp.status(), 200);
        // Content-Length still reflects the file size.
        assert_eq!(resp.headers()["Content-Length"], "6");
    }
}
