mod error_handling;
mod signing;

pub(crate) use error_handling::ErrorHandlingMiddleware;
pub(crate) use signing::SigningMiddleware;
