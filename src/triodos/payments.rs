use std::sync::Arc;

use urlencoding::encode;

use super::client::TriodosClientInner;
use super::model::{
    Authorisation, AuthorisationStatus, InitiateCrossBorderPaymentRequest,
    InitiateSepaPaymentRequest, InitiatedPayment, PaymentDetails, PaymentStatus,
};
use crate::common::{PSU_IP_ADDRESS_HEADER, TPP_REDIRECT_URI_HEADER};
use crate::{Error, Token};

/// Payment initiation and the SCA flow around it.
#[derive(Debug, Clone)]
pub struct PaymentsApi {
    inner: Arc<TriodosClientInner>,
}

impl PaymentsApi {
    pub(crate) fn new(inner: Arc<TriodosClientInner>) -> Self {
        Self { inner }
    }

    /// Initiates a SEPA credit transfer.
    ///
    /// The returned links drive the SCA flow for the payment, in the same way
    /// consent registration does for account information.
    #[tracing::instrument(
        name = "Initiate SEPA Payment",
        skip(self, request, psu_ip_address, redirect_uri)
    )]
    pub async fn initiate_sepa_payment(
        &self,
        request: &InitiateSepaPaymentRequest,
        psu_ip_address: &str,
        redirect_uri: &str,
    ) -> Result<InitiatedPayment, Error> {
        let res = self
            .inner
            .client
            .post(
                self.inner
                    .base_url
                    .join(&format!(
                        "/xs2a-bg/{}/v1/payments/sepa-credit-transfers",
                        encode(&self.inner.tenant)
                    ))
                    .unwrap(),
            )
            .header(PSU_IP_ADDRESS_HEADER, psu_ip_address)
            .header(TPP_REDIRECT_URI_HEADER, redirect_uri)
            .json(request)
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Fetches the transaction status of a SEPA payment.
    #[tracing::instrument(name = "Get SEPA Payment Status", skip(self))]
    pub async fn sepa_payment_status(&self, payment_id: &str) -> Result<PaymentStatus, Error> {
        let res = self
            .inner
            .client
            .get(
                self.inner
                    .base_url
                    .join(&format!(
                        "/xs2a-bg/{}/v1/payments/sepa-credit-transfers/{}/status",
                        encode(&self.inner.tenant),
                        encode(payment_id)
                    ))
                    .unwrap(),
            )
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Fetches a SEPA payment.
    #[tracing::instrument(name = "Get SEPA Payment Details", skip(self))]
    pub async fn sepa_payment_details(&self, payment_id: &str) -> Result<PaymentDetails, Error> {
        let res = self
            .inner
            .client
            .get(
                self.inner
                    .base_url
                    .join(&format!(
                        "/xs2a-bg/{}/v1/payments/sepa-credit-transfers/{}",
                        encode(&self.inner.tenant),
                        encode(payment_id)
                    ))
                    .unwrap(),
            )
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Fetches the SCA status of a payment authorisation.
    #[tracing::instrument(name = "Get SEPA Payment Authorisation Status", skip(self))]
    pub async fn sepa_payment_authorisation_status(
        &self,
        payment_id: &str,
        authorisation_id: &str,
    ) -> Result<AuthorisationStatus, Error> {
        let res = self
            .inner
            .client
            .get(
                self.inner
                    .base_url
                    .join(&format!(
                        "/xs2a-bg/{}/v1/payments/sepa-credit-transfers/{}/authorisations/{}",
                        encode(&self.inner.tenant),
                        encode(payment_id),
                        encode(authorisation_id)
                    ))
                    .unwrap(),
            )
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Submits a payment authorisation after the PSU completed SCA.
    #[tracing::instrument(name = "Submit SEPA Payment Authorisation", skip(self, access_token))]
    pub async fn submit_sepa_payment_authorisation(
        &self,
        access_token: &Token,
        payment_id: &str,
        authorisation_id: &str,
    ) -> Result<Authorisation, Error> {
        let res = self
            .inner
            .client
            .put(
                self.inner
                    .base_url
                    .join(&format!(
                        "/xs2a-bg/{}/v1/payments/sepa-credit-transfers/{}/authorisations/{}",
                        encode(&self.inner.tenant),
                        encode(payment_id),
                        encode(authorisation_id)
                    ))
                    .unwrap(),
            )
            .bearer_auth(access_token.expose_secret())
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Initiates a cross-border credit transfer.
    #[tracing::instrument(
        name = "Initiate Cross Border Payment",
        skip(self, request, psu_ip_address, redirect_uri)
    )]
    pub async fn initiate_cross_border_payment(
        &self,
        request: &InitiateCrossBorderPaymentRequest,
        psu_ip_address: &str,
        redirect_uri: &str,
    ) -> Result<InitiatedPayment, Error> {
        let res = self
            .inner
            .client
            .post(
                self.inner
                    .base_url
                    .join(&format!(
                        "/xs2a-bg/{}/v1/payments/cross-border-credit-transfers",
                        encode(&self.inner.tenant)
                    ))
                    .unwrap(),
            )
            .header(PSU_IP_ADDRESS_HEADER, psu_ip_address)
            .header(TPP_REDIRECT_URI_HEADER, redirect_uri)
            .json(request)
            .send()
            .await?;

        Ok(res.json().await?)
    }
}
