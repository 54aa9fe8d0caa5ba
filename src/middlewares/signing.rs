use crate::{
    common::{DATE_HEADER, DIGEST_HEADER, SIGNATURE_HEADER, X_REQUEST_ID_HEADER},
    error::Error,
    signing::RequestSigner,
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header::HeaderValue, Request, Response};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;
use uuid::Uuid;

/// Middleware to attach a bank's message signature to all outgoing requests.
///
/// For every request, in order: injects the bank's static default headers
/// (certificate headers, client id) unless the request already carries them,
/// stamps a fresh `X-Request-ID`, adds a `Date` header when the signature
/// scheme covers it, computes the body `Digest`, and signs the covered
/// headers into the `Signature` header.
pub struct SigningMiddleware {
    pub(crate) signer: RequestSigner,
    pub(crate) default_headers: Vec<(&'static str, HeaderValue)>,
}

#[async_trait]
impl Middleware for SigningMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        // Static bank headers; per-request values win
        for (name, value) in &self.default_headers {
            if !req.headers().contains_key(*name) {
                req.headers_mut().insert(*name, value.clone());
            }
        }

        // Fresh correlation id on every request. Any caller-supplied value is
        // replaced: the id is part of the signed material and must never be
        // reused.
        let request_id = Uuid::new_v4().to_string();
        req.headers_mut()
            .insert(X_REQUEST_ID_HEADER, header_value(&request_id)?);

        if self.signer.scheme().covers(DATE_HEADER) {
            let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
            req.headers_mut().insert(DATE_HEADER, header_value(&date)?);
        }

        // Digest the body; a request without one digests the empty string
        let body = match req.body() {
            Some(body) => body
                .as_bytes()
                .ok_or_else(|| anyhow::anyhow!("Cannot sign a streaming request body"))?,
            None => &[],
        };
        let digest = self.signer.digest_header_value(body);
        req.headers_mut().insert(DIGEST_HEADER, header_value(&digest)?);

        // Build and attach the signature over the covered headers
        let signature = self
            .signer
            .signature_header_value(req.headers())
            .map_err(Error::from)?;
        req.headers_mut()
            .insert(SIGNATURE_HEADER, header_value(&signature)?);

        next.run(req, extensions).await
    }
}

fn header_value(value: &str) -> reqwest_middleware::Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| reqwest_middleware::Error::Middleware(e.into()))
}
