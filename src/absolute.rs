//! Absolute URL composition from a request URL and a normalized path.

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum AbsoluteUrlError {
    #[error("invalid request URL `{url}`")]
    RequestUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("cannot resolve `{path}` against `{base}`")]
    Resolve {
        base: String,
        path: String,
        #[source]
        source: url::ParseError,
    },
}

/// Resolve `path` against `request_url` (RFC 3986 reference resolution).
///
/// With `force_https`, an `http://` result is rewritten to `https://`, for
/// deployments behind a TLS-terminating proxy.
///
/// # Examples
/// ```
/// use mounturl::absolute::absolute_url;
/// assert_eq!(
///     absolute_url("http://localhost/prefix/db", "/prefix/db/table", false).unwrap(),
///     "http://localhost/prefix/db/table"
/// );
/// ```
pub fn absolute_url(
    request_url: &str,
    path: &str,
    force_https: bool,
) -> Result<String, AbsoluteUrlError> {
    let base = Url::parse(request_url).map_err(|source| AbsoluteUrlError::RequestUrl {
        url: request_url.to_string(),
        source,
    })?;

    let joined = base.join(path).map_err(|source| AbsoluteUrlError::Resolve {
        base: request_url.to_string(),
        path: path.to_string(),
        source,
    })?;

    let url = joined.to_string();
    Ok(match url.strip_prefix("http://") {
        Some(rest) if force_https => format!("https://{rest}"),
        _ => url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_replaces_request_path() {
        assert_eq!(
            absolute_url("http://localhost/a/b", "/c/d", false).unwrap(),
            "http://localhost/c/d"
        );
    }

    #[test]
    fn test_relative_path_duplicates_prefix() {
        // Why normalized paths must start with `/`
        let resolved = absolute_url("http://localhost/base_url/", "base_url/x", false).unwrap();
        assert_eq!(resolved, "http://localhost/base_url/base_url/x");
    }

    #[test]
    fn test_force_https() {
        assert_eq!(
            absolute_url("http://example.com/", "/x", true).unwrap(),
            "https://example.com/x"
        );
        assert_eq!(
            absolute_url("https://example.com/", "/x", true).unwrap(),
            "https://example.com/x"
        );
        assert_eq!(
            absolute_url("http://example.com/", "/x", false).unwrap(),
            "http://example.com/x"
        );
    }

    #[test]
    fn test_keeps_query_string() {
        assert_eq!(
            absolute_url("http://localhost/", "/db/t/1.blob?_blob_column=data", false).unwrap(),
            "http://localhost/db/t/1.blob?_blob_column=data"
        );
    }

    #[test]
    fn test_invalid_request_url() {
        let err = absolute_url("not a url", "/x", false).unwrap_err();
        assert!(matches!(err, AbsoluteUrlError::RequestUrl { .. }));
        assert!(err.to_string().contains("not a url"));
    }
}
