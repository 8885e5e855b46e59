//! Error types for calls to the rooftop solar service.

use std::fmt;

use crate::models::Coordinates;

/// Result type for solar service calls.
pub type SolarResult<T> = Result<T, SolarApiError>;

/// Structured context for solar service errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The call being made (e.g. "find_building", "wait_until_ready")
    pub operation: Option<String>,
    /// Coordinates the call was made for
    pub coordinates: Option<Coordinates>,
    /// Additional details about the error
    pub details: Option<String>,
    /// Whether repeating the call could succeed
    pub retryable: bool,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref coords) = self.coordinates {
            parts.push(format!("at={}", coords));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Failure talking to the building lookup or imagery readiness endpoints.
#[derive(Debug, thiserror::Error)]
pub enum SolarApiError {
    /// Connection, DNS or TLS failure before a response arrived.
    #[error("Transport error: {message} {context}")]
    Transport {
        message: String,
        context: ErrorContext,
    },

    /// The service answered with a non-success status.
    #[error("Unexpected status {status}: {body} {context}")]
    Status {
        status: u16,
        body: String,
        context: ErrorContext,
    },

    /// The response body did not match the expected shape.
    #[error("Decode error: {message} {context}")]
    Decode {
        message: String,
        context: ErrorContext,
    },

    /// The call did not complete in time.
    #[error("Timed out: {message} {context}")]
    Timeout {
        message: String,
        context: ErrorContext,
    },

    /// Client construction or configuration problem.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl SolarApiError {
    pub fn transport(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Transport {
            message: message.into(),
            context: context.retryable(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>, context: ErrorContext) -> Self {
        let context = if status == 429 || status >= 500 {
            context.retryable()
        } else {
            context
        };
        Self::Status {
            status,
            body: body.into(),
            context,
        }
    }

    pub fn decode(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Decode {
            message: message.into(),
            context,
        }
    }

    pub fn timeout(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Timeout {
            message: message.into(),
            context: context.retryable(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Transport { context, .. }
            | Self::Status { context, .. }
            | Self::Decode { context, .. }
            | Self::Timeout { context, .. } => Some(context),
            Self::Configuration { .. } => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.context().map(|c| c.retryable).unwrap_or(false)
    }
}
