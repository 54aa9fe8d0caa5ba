//! Standard errors used by all functions in the crate.

use crate::signing::SigningError;
use std::fmt;

/// Error collecting all possible failures of the bank clients.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Reqwest error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    /// Error returned by a bank API endpoint.
    #[error("{0}")]
    ApiError(#[from] ApiError),
    /// Error building the request signature.
    ///
    /// Raised before any network call is made.
    #[error("Error signing request: {0}")]
    SigningError(#[from] SigningError),
    /// The bank exposes this endpoint but this client does not wrap it yet.
    #[error("{0} is not supported by this client")]
    Unsupported(&'static str),
    /// Catch-all variant for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::HttpError(e),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Other)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// Bank HTTP APIs error.
#[derive(thiserror::Error, Debug)]
pub struct ApiError {
    /// HTTP status returned by the server.
    pub status: u16,
    /// The error body, parsed into whichever shape this bank uses.
    pub body: ApiErrorBody,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bank HTTP error {}", self.status)?;

        match &self.body {
            ApiErrorBody::OAuth {
                error,
                error_description,
            } => {
                write!(f, ": {}", error)?;
                if let Some(ref description) = error_description {
                    write!(f, " ({})", description)?;
                }
            }
            ApiErrorBody::Gateway { errors } => {
                for error in errors {
                    write!(f, "\n- {}: {}", error.category, error.message)?;
                }
            }
            ApiErrorBody::TppMessages { tpp_messages } => {
                for message in tpp_messages {
                    write!(f, "\n- {}: {}", message.category, message.text)?;
                }
            }
            ApiErrorBody::Unknown => {}
        }

        Ok(())
    }
}

/// Body of an error response, in one of the shapes used by the wrapped banks.
///
/// Which shape a given endpoint produces is a property of the bank (and for
/// Triodos, of the API area: OAuth endpoints answer in the OAuth shape, XS2A
/// endpoints in TPP messages), so callers usually match on the variant they
/// expect and fall through for the rest.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ApiErrorBody {
    /// OAuth-style `{error, error_description}` body.
    OAuth {
        error: String,
        error_description: Option<String>,
    },
    /// ABN AMRO `{errors: [{category, message, code}]}` envelope.
    Gateway { errors: Vec<GatewayError> },
    /// Berlin Group `{tppMessages: [{category, text}]}` envelope.
    TppMessages {
        #[serde(rename = "tppMessages")]
        tpp_messages: Vec<TppMessage>,
    },
    /// Anything else: non-JSON bodies and shapes we do not recognize.
    Unknown,
}

/// Single entry of an ABN AMRO error envelope.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub category: String,
    pub message: String,
    pub code: Option<String>,
}

/// Single entry of a Berlin Group error envelope.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TppMessage {
    pub category: String,
    pub text: String,
}
