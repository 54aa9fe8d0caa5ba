use std::sync::Arc;

use urlencoding::encode;

use super::client::AbnAmroClientInner;
use super::model::{
    CreatedPayment, SepaPayment, SepaPaymentRequest, StandingOrder, StandingOrderPaymentRequest,
    XborderPayment, XborderPaymentRequest,
};
use crate::common::API_KEY_HEADER;
use crate::{Error, Token};

/// Payment initiation services.
///
/// A payment starts out `STORED`; the PSU authorizes it through the
/// authorization URL (with the transaction id in the `transactionId`
/// parameter), after which a PUT executes it.
#[derive(Debug, Clone)]
pub struct PaymentsApi {
    inner: Arc<AbnAmroClientInner>,
}

impl PaymentsApi {
    pub(crate) fn new(inner: Arc<AbnAmroClientInner>) -> Self {
        Self { inner }
    }

    /// Registers a SEPA credit transfer.
    #[tracing::instrument(name = "Create SEPA Payment", skip(self, access_token, request))]
    pub async fn create_sepa_payment(
        &self,
        access_token: &Token,
        request: &SepaPaymentRequest,
    ) -> Result<CreatedPayment, Error> {
        let res = self
            .inner
            .client
            .post(self.inner.api_url.join("/v1/payments").unwrap())
            .bearer_auth(access_token.expose_secret())
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Fetches the status of a SEPA payment.
    #[tracing::instrument(name = "Get SEPA Payment", skip(self, access_token))]
    pub async fn get_sepa_payment(
        &self,
        access_token: &Token,
        transaction_id: &str,
    ) -> Result<SepaPayment, Error> {
        let res = self
            .inner
            .client
            .get(
                self.inner
                    .api_url
                    .join(&format!("/v1/payments/{}", encode(transaction_id)))
                    .unwrap(),
            )
            .bearer_auth(access_token.expose_secret())
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Executes an authorized SEPA payment.
    ///
    /// The access token must come from the authorization code issued when
    /// the PSU consented to this transaction.
    #[tracing::instrument(name = "Execute SEPA Payment", skip(self, access_token))]
    pub async fn put_sepa_payment(
        &self,
        access_token: &Token,
        transaction_id: &str,
    ) -> Result<SepaPayment, Error> {
        let res = self
            .inner
            .client
            .put(
                self.inner
                    .api_url
                    .join(&format!("/v1/payments/{}", encode(transaction_id)))
                    .unwrap(),
            )
            .bearer_auth(access_token.expose_secret())
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Cancels a registered payment. Returns whether the bank confirmed the
    /// cancellation.
    #[tracing::instrument(name = "Cancel SEPA Payment", skip(self, access_token))]
    pub async fn delete_sepa_payment(
        &self,
        access_token: &Token,
        transaction_id: &str,
    ) -> Result<bool, Error> {
        let res = self
            .inner
            .client
            .delete(
                self.inner
                    .api_url
                    .join(&format!("/v1/payments/{}", encode(transaction_id)))
                    .unwrap(),
            )
            .bearer_auth(access_token.expose_secret())
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .send()
            .await?;

        Ok(res.status() == reqwest::StatusCode::OK)
    }

    /// Registers a cross-border credit transfer.
    #[tracing::instrument(name = "Create Cross-Border Payment", skip(self, access_token, request))]
    pub async fn create_cross_border_payment(
        &self,
        access_token: &Token,
        request: &XborderPaymentRequest,
    ) -> Result<XborderPayment, Error> {
        let res = self
            .inner
            .client
            .post(self.inner.api_url.join("/v1/payments/xborder").unwrap())
            .bearer_auth(access_token.expose_secret())
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Executes an authorized cross-border payment.
    #[tracing::instrument(name = "Execute Cross-Border Payment", skip(self, access_token))]
    pub async fn put_cross_border_payment(
        &self,
        access_token: &Token,
        transaction_id: &str,
    ) -> Result<XborderPayment, Error> {
        let res = self
            .inner
            .client
            .put(
                self.inner
                    .api_url
                    .join(&format!("/v1/payments/xborder/{}", encode(transaction_id)))
                    .unwrap(),
            )
            .bearer_auth(access_token.expose_secret())
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Registers a SEPA standing order.
    #[tracing::instrument(
        name = "Create Standing Order Payment",
        skip(self, access_token, request)
    )]
    pub async fn create_standing_order_payment(
        &self,
        access_token: &Token,
        request: &StandingOrderPaymentRequest,
    ) -> Result<StandingOrder, Error> {
        let res = self
            .inner
            .client
            .post(self.inner.api_url.join("/v1/payments/standingorder").unwrap())
            .bearer_auth(access_token.expose_secret())
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        Ok(res.json().await?)
    }
}
