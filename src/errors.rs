use thiserror::Error;

/// HTTP error classification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpErrorKind {
    #[error("Client error (status: {status:?}): {message}")]
    Client {
        status: Option<String>,
        message: String,
    },
    #[error("Server error: {message}")]
    Server { message: String },
    #[error("Unexpected status: {message}")]
    Unexpected { message: String },
}

/// Main audit error type.
///
/// Every variant is fatal to a run; nothing in the crate retries.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// The credential file lacks one or more required cookies
    #[error("Missing cookies: {}", .fields.join(", "))]
    MissingCredentials { fields: Vec<String> },

    /// The search endpoint returned no match for the username
    #[error("Unable to resolve user id for '{0}'")]
    UserNotFound(String),

    /// The matched user carries no usable numeric id
    #[error("User id missing in response for '{0}'")]
    MissingIdentifier(String),

    /// Non-2xx response from any endpoint
    #[error("HTTP error (status {status}) at {url}: {kind}")]
    Http {
        status: u16,
        url: String,
        kind: HttpErrorKind,
    },

    /// Transport-level failure (DNS, TLS, connection reset, body read)
    #[error("Generic request error: {0}")]
    GenericRequest(String),

    /// Expected structural path absent or wrong-typed in a paginated response
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Body was not valid JSON, or a value could not be serialized
    #[error("Json parse error: {0}")]
    JsonParse(String),

    /// Configuration value out of range or unreadable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Filesystem failure while reading credentials or writing reports
    #[error("I/O error: {0}")]
    Io(String),
}

// Convenience constructors for common error patterns
impl Error {
    /// Create an HTTP client error (4xx)
    pub fn client_error(
        status: u16,
        url: impl Into<String>,
        api_status: Option<String>,
        message: String,
    ) -> Self {
        Error::Http {
            status,
            url: url.into(),
            kind: HttpErrorKind::Client {
                status: api_status,
                message,
            },
        }
    }

    /// Create an HTTP server error (5xx)
    pub fn server_error(status: u16, url: impl Into<String>, message: String) -> Self {
        Error::Http {
            status,
            url: url.into(),
            kind: HttpErrorKind::Server { message },
        }
    }

    pub fn json_parse(msg: impl Into<String>) -> Self {
        Error::JsonParse(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedResponse(msg.into())
    }

    pub fn io(context: impl std::fmt::Display, err: std::io::Error) -> Self {
        Error::Io(format!("{context}: {err}"))
    }

    /// HTTP status code, when the error came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
