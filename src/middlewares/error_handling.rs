use crate::error::{ApiError, ApiErrorBody, Error};
use async_trait::async_trait;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Reqwest middleware which translates error responses returned from the bank
/// APIs into [`Error::ApiError`](crate::error::Error)s.
///
/// Only 4xx and 5xx statuses are treated as errors. Redirects pass through
/// untouched: the authorize endpoints answer with a 302 whose `Location`
/// header is the whole point of the call.
pub struct ErrorHandlingMiddleware;

#[async_trait]
impl Middleware for ErrorHandlingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        // Capture the response
        let response = next.run(req, extensions).await?;

        // Build an ApiError if the response is a client or server error
        if response.status().is_client_error() || response.status().is_server_error() {
            tracing::debug!("Failed HTTP request. Status code: {}", response.status());

            let api_error = api_error_from_response(response).await?;
            return Err(Error::ApiError(api_error).into());
        }

        Ok(response)
    }
}

async fn api_error_from_response(response: Response) -> reqwest_middleware::Result<ApiError> {
    let status = response.status().as_u16();

    // Parse the response body into whichever error shape this bank uses
    let bytes = response.bytes().await?;
    let body: ApiErrorBody = serde_json::from_slice(&bytes).unwrap_or(ApiErrorBody::Unknown);

    Ok(ApiError { status, body })
}
