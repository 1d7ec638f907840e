//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// The first group is raised by the entity layer itself; the second group
/// ([`is_transport`](ErrorKind::is_transport)) comes out of the gateway and is
/// passed through untouched.
///
/// | ErrorKind         | Retriable | Action                          |
/// |-------------------|-----------|---------------------------------|
/// | `DataFormat`      | No        | Payload does not match the model |
/// | `Unsupported`     | No        | Resource has no fetch endpoint  |
/// | `NotFound`        | No        | Record doesn't exist            |
/// | `Configuration`   | No        | Fix token or base URL           |
/// | `InvalidArgument` | No        | Fix the call site               |
/// | `Unavailable`     | Yes       | Retry with backoff              |
/// | `Timeout`         | Yes       | Retry with backoff              |
/// | `RateLimited`     | Yes       | Use `retry_after()` delay       |
/// | `Connection`      | Yes       | Retry with backoff              |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A record is not a JSON object, or lacks a field the model requires.
    ///
    /// Detected lazily, the first time the field is read.
    #[error("unexpected data format")]
    DataFormat,

    /// The operation is not available for this resource type.
    ///
    /// Raised by `get`, `list` and `detail` on link-only resources, always,
    /// without contacting the server.
    #[error("unsupported operation")]
    Unsupported,

    /// Requested record does not exist.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// Configuration error (missing API token, invalid base URL).
    #[error("configuration error")]
    Configuration,

    /// The caller violated an API precondition.
    ///
    /// Example: asking for a nested collection without a parent id.
    #[error("invalid argument")]
    InvalidArgument,

    /// The API token was rejected.
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// The API token is valid but may not read this resource.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// Rate limit exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    #[error("rate limited")]
    RateLimited,

    /// Service temporarily unavailable.
    ///
    /// HTTP: 502, 503
    #[error("service unavailable")]
    Unavailable,

    /// Request timed out.
    ///
    /// HTTP: 504 Gateway Timeout or client-side timeout
    #[error("timeout")]
    Timeout,

    /// Internal server error.
    ///
    /// HTTP: 500 and unmapped 5xx
    #[error("internal error")]
    Internal,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// Any other HTTP-level failure.
    #[error("transport error")]
    Transport,

    /// The response body was not valid JSON.
    #[error("invalid response")]
    InvalidResponse,

    /// Unknown or unexpected error.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` if this error kind is generally safe to retry.
    ///
    /// ```rust
    /// use glassfrog::ErrorKind;
    ///
    /// assert!(ErrorKind::Timeout.is_retriable());
    /// assert!(!ErrorKind::NotFound.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unavailable
                | ErrorKind::Timeout
                | ErrorKind::RateLimited
                | ErrorKind::Connection
        )
    }

    /// Returns `true` for failures reported by the gateway rather than the
    /// entity layer.
    ///
    /// `NotFound` is excluded: the entity layer gives a 404 its own meaning.
    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unauthorized
                | ErrorKind::Forbidden
                | ErrorKind::RateLimited
                | ErrorKind::Unavailable
                | ErrorKind::Timeout
                | ErrorKind::Internal
                | ErrorKind::Connection
                | ErrorKind::Transport
                | ErrorKind::InvalidResponse
                | ErrorKind::Unknown
        )
    }

    /// Creates an `ErrorKind` from an HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::RateLimited,
            500 => ErrorKind::Internal,
            502 | 503 => ErrorKind::Unavailable,
            504 => ErrorKind::Timeout,
            _ if (400..500).contains(&status) => ErrorKind::Transport,
            _ if status >= 500 => ErrorKind::Internal,
            _ => ErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retriable() {
        assert!(ErrorKind::Unavailable.is_retriable());
        assert!(ErrorKind::Timeout.is_retriable());
        assert!(ErrorKind::RateLimited.is_retriable());
        assert!(ErrorKind::Connection.is_retriable());

        assert!(!ErrorKind::DataFormat.is_retriable());
        assert!(!ErrorKind::Unsupported.is_retriable());
        assert!(!ErrorKind::NotFound.is_retriable());
        assert!(!ErrorKind::Configuration.is_retriable());
        assert!(!ErrorKind::Unauthorized.is_retriable());
        assert!(!ErrorKind::Internal.is_retriable());
    }

    #[test]
    fn test_is_transport() {
        assert!(ErrorKind::Unauthorized.is_transport());
        assert!(ErrorKind::Internal.is_transport());
        assert!(ErrorKind::Connection.is_transport());
        assert!(ErrorKind::InvalidResponse.is_transport());

        assert!(!ErrorKind::NotFound.is_transport());
        assert!(!ErrorKind::DataFormat.is_transport());
        assert!(!ErrorKind::Unsupported.is_transport());
        assert!(!ErrorKind::Configuration.is_transport());
        assert!(!ErrorKind::InvalidArgument.is_transport());
    }

    #[test]
    fn test_from_http_status() {
        assert_eq!(ErrorKind::from_http_status(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_http_status(403), ErrorKind::Forbidden);
        assert_eq!(ErrorKind::from_http_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_http_status(429), ErrorKind::RateLimited);
        assert_eq!(ErrorKind::from_http_status(500), ErrorKind::Internal);
        assert_eq!(ErrorKind::from_http_status(502), ErrorKind::Unavailable);
        assert_eq!(ErrorKind::from_http_status(503), ErrorKind::Unavailable);
        assert_eq!(ErrorKind::from_http_status(504), ErrorKind::Timeout);

        // Remaining 4xx are plain transport failures
        assert_eq!(ErrorKind::from_http_status(400), ErrorKind::Transport);
        assert_eq!(ErrorKind::from_http_status(422), ErrorKind::Transport);

        assert_eq!(ErrorKind::from_http_status(501), ErrorKind::Internal);
        assert_eq!(ErrorKind::from_http_status(301), ErrorKind::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorKind::DataFormat.to_string(), "unexpected data format");
        assert_eq!(ErrorKind::Unsupported.to_string(), "unsupported operation");
        assert_eq!(ErrorKind::NotFound.to_string(), "not found");
        assert_eq!(ErrorKind::Configuration.to_string(), "configuration error");
        assert_eq!(ErrorKind::Transport.to_string(), "transport error");
    }

    #[test]
    fn test_error_kind_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ErrorKind::NotFound);
        set.insert(ErrorKind::Unsupported);
        set.insert(ErrorKind::NotFound);
        assert_eq!(set.len(), 2);
    }
}
