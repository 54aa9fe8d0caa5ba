use std::sync::Arc;

use urlencoding::encode;

use super::client::RabobankClientInner;
use super::model::ConsentDetails;
use crate::Error;

/// Consent details service.
#[derive(Debug, Clone)]
pub struct ConsentsApi {
    inner: Arc<RabobankClientInner>,
}

impl ConsentsApi {
    pub(crate) fn new(inner: Arc<RabobankClientInner>) -> Self {
        Self { inner }
    }

    /// Fetches the scopes and status of a consent object.
    ///
    /// The consent id arrives in the `metadata` field of the token response
    /// ([`AccessToken::consent_id`](super::AccessToken::consent_id)). The
    /// gateway authenticates this call by the message signature and the
    /// `X-IBM-Client-Id` header alone; no bearer token is involved.
    #[tracing::instrument(name = "Get Consent Details", skip(self))]
    pub async fn details(&self, consent_id: &str) -> Result<ConsentDetails, Error> {
        let res = self
            .inner
            .api_client
            .get(
                self.inner
                    .api_url
                    .join(&format!(
                        "/openapi/sandbox/oauth2-premium/v1/consents/{}",
                        encode(consent_id)
                    ))
                    .unwrap(),
            )
            .send()
            .await?;

        Ok(res.json().await?)
    }
}
