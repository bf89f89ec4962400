//! Error types for the Okta MCP server.
//!
//! Errors are layered the same way the server is: configuration problems,
//! transport problems, and everything that comes back from Okta itself.
//! [`OktaMcpError::kind`] flattens them into an [`ErrorKind`] tag because the
//! propagation policy differs per kind: configuration errors fail fast,
//! unsupported transports may fall back, upstream errors pass through as-is.
//!
//! No variant ever carries the API token.

/// Main error type for server operations.
#[derive(Debug, thiserror::Error)]
pub enum OktaMcpError {
    /// Missing or invalid settings
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The requested run mode could not be served
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-success response returned by the Okta API
    #[error("Okta API error ({status}){}: {summary}", code_suffix(.error_code))]
    Api {
        status: u16,
        error_code: Option<String>,
        summary: String,
    },

    /// Network-level failure talking to Okta (timeouts included)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tool arguments that fail validation
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Internal server errors
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// One or more required variables are absent or empty
    #[error("{}", missing_required_message(.variables))]
    MissingRequired { variables: Vec<&'static str> },

    /// A numeric variable could not be parsed or is out of range
    #[error("Invalid value '{value}' for {variable}: {reason}")]
    InvalidNumeric {
        variable: &'static str,
        value: String,
        reason: String,
    },

    /// A variable is present but unusable; the value is deliberately omitted
    #[error("Invalid {variable}: {reason}")]
    InvalidValue {
        variable: &'static str,
        reason: String,
    },
}

/// Errors raised while starting or running a transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The runtime does not provide this run mode
    #[error("Transport '{mode}' is not supported: {reason}")]
    Unsupported { mode: String, reason: String },

    /// The listening address could not be bound
    #[error("Unable to listen on {address}: {source}")]
    Unreachable {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while serving
    #[error("Transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`OktaMcpError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingRequired,
    InvalidNumeric,
    InvalidConfiguration,
    Unreachable,
    Unsupported,
    Upstream,
    InvalidArguments,
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code surfaced in tool error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequired => "CONFIGURATION_MISSING",
            Self::InvalidNumeric => "CONFIGURATION_INVALID_NUMERIC",
            Self::InvalidConfiguration => "CONFIGURATION_INVALID",
            Self::Unreachable => "TRANSPORT_UNREACHABLE",
            Self::Unsupported => "TRANSPORT_UNSUPPORTED",
            Self::Upstream => "OKTA_API_ERROR",
            Self::InvalidArguments => "INVALID_ARGUMENTS",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl OktaMcpError {
    /// Classify this error for propagation decisions.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(ConfigurationError::MissingRequired { .. }) => {
                ErrorKind::MissingRequired
            }
            Self::Configuration(ConfigurationError::InvalidNumeric { .. }) => {
                ErrorKind::InvalidNumeric
            }
            Self::Configuration(ConfigurationError::InvalidValue { .. }) => {
                ErrorKind::InvalidConfiguration
            }
            Self::Transport(TransportError::Unsupported { .. }) => ErrorKind::Unsupported,
            Self::Transport(_) => ErrorKind::Unreachable,
            Self::Api { .. } | Self::Http(_) => ErrorKind::Upstream,
            Self::InvalidArguments { .. } => ErrorKind::InvalidArguments,
            Self::Json(_) | Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// True when Okta answered 404 for the requested object.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl ConfigurationError {
    /// Create an invalid numeric value error
    pub fn invalid_numeric(
        variable: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidNumeric {
            variable,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(variable: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            variable,
            reason: reason.into(),
        }
    }
}

impl TransportError {
    /// Create an unsupported transport error
    pub fn unsupported(mode: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            mode: mode.into(),
            reason: reason.into(),
        }
    }
}

fn code_suffix(error_code: &Option<String>) -> String {
    error_code
        .as_deref()
        .map(|code| format!(" {code}"))
        .unwrap_or_default()
}

fn missing_required_message(variables: &[&'static str]) -> String {
    let plural = if variables.len() > 1 { "s" } else { "" };
    format!(
        "Okta configuration required. Set {} environment variable{plural}.",
        variables.join(" and ")
    )
}

// Result type aliases for convenience
pub type OktaResult<T> = Result<T, OktaMcpError>;
pub type ConfigResult<T> = Result<T, ConfigurationError>;
pub type TransportResult<T> = Result<T, TransportError>;
