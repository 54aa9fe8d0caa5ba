use std::sync::Arc;

use urlencoding::encode;

use super::client::TriodosClientInner;
use super::model::{AccountBalances, AccountList, AccountTransactions, TransactionsQuery};
use crate::common::{CONSENT_ID_HEADER, PSU_IP_ADDRESS_HEADER};
use crate::{Error, Token};

/// Account information under a valid consent.
///
/// All operations here need the PSU's access token, the id of a consent
/// covering the data, and optionally the PSU's IP address when the PSU
/// triggered the call directly.
#[derive(Debug, Clone)]
pub struct AccountsApi {
    inner: Arc<TriodosClientInner>,
}

impl AccountsApi {
    pub(crate) fn new(inner: Arc<TriodosClientInner>) -> Self {
        Self { inner }
    }

    /// Lists the accounts the consent grants access to.
    #[tracing::instrument(name = "List Accounts", skip(self, access_token, psu_ip_address))]
    pub async fn list(
        &self,
        access_token: &Token,
        consent_id: &str,
        psu_ip_address: Option<&str>,
    ) -> Result<AccountList, Error> {
        let mut req = self
            .inner
            .client
            .get(
                self.inner
                    .base_url
                    .join(&format!("/xs2a-bg/{}/v1/accounts", encode(&self.inner.tenant)))
                    .unwrap(),
            )
            .bearer_auth(access_token.expose_secret())
            .header(CONSENT_ID_HEADER, consent_id);
        if let Some(psu_ip_address) = psu_ip_address {
            req = req.header(PSU_IP_ADDRESS_HEADER, psu_ip_address);
        }

        let res = req.send().await?;

        Ok(res.json().await?)
    }

    /// Fetches the balances of one account.
    #[tracing::instrument(name = "Get Account Balances", skip(self, access_token, psu_ip_address))]
    pub async fn balances(
        &self,
        access_token: &Token,
        consent_id: &str,
        account_id: &str,
        psu_ip_address: Option<&str>,
    ) -> Result<AccountBalances, Error> {
        let mut req = self
            .inner
            .client
            .get(
                self.inner
                    .base_url
                    .join(&format!(
                        "/xs2a-bg/{}/v1/accounts/{}/balances",
                        encode(&self.inner.tenant),
                        encode(account_id)
                    ))
                    .unwrap(),
            )
            .bearer_auth(access_token.expose_secret())
            .header(CONSENT_ID_HEADER, consent_id);
        if let Some(psu_ip_address) = psu_ip_address {
            req = req.header(PSU_IP_ADDRESS_HEADER, psu_ip_address);
        }

        let res = req.send().await?;

        Ok(res.json().await?)
    }

    /// Fetches the transactions of one account within a booking window.
    #[tracing::instrument(
        name = "Get Account Transactions",
        skip(self, access_token, query, psu_ip_address)
    )]
    pub async fn transactions(
        &self,
        access_token: &Token,
        consent_id: &str,
        account_id: &str,
        query: &TransactionsQuery,
        psu_ip_address: Option<&str>,
    ) -> Result<AccountTransactions, Error> {
        let mut req = self
            .inner
            .client
            .get(
                self.inner
                    .base_url
                    .join(&format!(
                        "/xs2a-bg/{}/v1/accounts/{}/transactions",
                        encode(&self.inner.tenant),
                        encode(account_id)
                    ))
                    .unwrap(),
            )
            .query(query)
            .bearer_auth(access_token.expose_secret())
            .header(CONSENT_ID_HEADER, consent_id);
        if let Some(psu_ip_address) = psu_ip_address {
            req = req.header(PSU_IP_ADDRESS_HEADER, psu_ip_address);
        }

        let res = req.send().await?;

        Ok(res.json().await?)
    }

    /// Fetching a single account is not offered by the sandbox gateway.
    pub async fn get(
        &self,
        _access_token: &Token,
        _consent_id: &str,
        _account_id: &str,
    ) -> Result<(), Error> {
        Err(Error::Unsupported("Fetching a single account"))
    }
}
