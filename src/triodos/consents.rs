use std::sync::Arc;

use reqwest::StatusCode;
use urlencoding::encode;

use super::client::TriodosClientInner;
use super::model::{Authorisation, Consent, ConsentStatusResponse, RegisterConsentRequest};
use crate::common::{PSU_IP_ADDRESS_HEADER, TPP_REDIRECT_URI_HEADER};
use crate::{Error, Token};

/// Account information consents and their SCA authorisations.
#[derive(Debug, Clone)]
pub struct ConsentsApi {
    inner: Arc<TriodosClientInner>,
}

impl ConsentsApi {
    pub(crate) fn new(inner: Arc<TriodosClientInner>) -> Self {
        Self { inner }
    }

    /// Registers an account information consent.
    ///
    /// `psu_ip_address` is the address of the PSU's own HTTP request and
    /// `redirect_uri` is where the PSU lands after the SCA redirect.
    #[tracing::instrument(name = "Register Consent", skip(self, request, psu_ip_address, redirect_uri))]
    pub async fn register_consent(
        &self,
        request: &RegisterConsentRequest,
        psu_ip_address: &str,
        redirect_uri: &str,
    ) -> Result<Consent, Error> {
        let res = self
            .inner
            .client
            .post(
                self.inner
                    .base_url
                    .join(&format!("/xs2a-bg/{}/v1/consents", encode(&self.inner.tenant)))
                    .unwrap(),
            )
            .header(PSU_IP_ADDRESS_HEADER, psu_ip_address)
            .header(TPP_REDIRECT_URI_HEADER, redirect_uri)
            .json(request)
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Fetches the status of a consent.
    #[tracing::instrument(name = "Get Consent Status", skip(self))]
    pub async fn status(&self, consent_id: &str) -> Result<ConsentStatusResponse, Error> {
        let res = self
            .inner
            .client
            .get(
                self.inner
                    .base_url
                    .join(&format!(
                        "/xs2a-bg/{}/v1/consents/{}/status",
                        encode(&self.inner.tenant),
                        encode(consent_id)
                    ))
                    .unwrap(),
            )
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Deletes a consent. Returns whether the bank confirmed the deletion
    /// with a 204.
    #[tracing::instrument(name = "Delete Consent", skip(self))]
    pub async fn delete(&self, consent_id: &str) -> Result<bool, Error> {
        let res = self
            .inner
            .client
            .delete(
                self.inner
                    .base_url
                    .join(&format!(
                        "/xs2a-bg/{}/v1/consents/{}",
                        encode(&self.inner.tenant),
                        encode(consent_id)
                    ))
                    .unwrap(),
            )
            .send()
            .await?;

        Ok(res.status() == StatusCode::NO_CONTENT)
    }

    /// Submits a consent authorisation after the PSU completed SCA.
    #[tracing::instrument(name = "Submit Consent Authorisation", skip(self, access_token))]
    pub async fn submit_authorisation(
        &self,
        access_token: &Token,
        consent_id: &str,
        authorisation_id: &str,
    ) -> Result<Authorisation, Error> {
        let res = self
            .inner
            .client
            .put(
                self.inner
                    .base_url
                    .join(&format!(
                        "/xs2a-bg/{}/v1/consents/{}/authorisations/{}",
                        encode(&self.inner.tenant),
                        encode(consent_id),
                        encode(authorisation_id)
                    ))
                    .unwrap(),
            )
            .bearer_auth(access_token.expose_secret())
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Fetching a consent body is not offered by the sandbox gateway.
    pub async fn get(&self, _consent_id: &str) -> Result<(), Error> {
        Err(Error::Unsupported("Fetching a consent"))
    }

    /// Listing consent authorisations is not offered by the sandbox gateway.
    pub async fn authorisations(&self, _consent_id: &str) -> Result<(), Error> {
        Err(Error::Unsupported("Listing consent authorisations"))
    }

    /// Creating an explicit authorisation is not offered by the sandbox
    /// gateway; registering a consent already starts one.
    pub async fn create_authorisation(&self, _consent_id: &str) -> Result<(), Error> {
        Err(Error::Unsupported("Creating a consent authorisation"))
    }

    /// Reading a consent authorisation status is not offered by the sandbox
    /// gateway.
    pub async fn authorisation_status(
        &self,
        _consent_id: &str,
        _authorisation_id: &str,
    ) -> Result<(), Error> {
        Err(Error::Unsupported("Fetching a consent authorisation status"))
    }
}
