use std::sync::Arc;

use urlencoding::encode;

use super::client::RabobankClientInner;
use super::model::{Account, AccountList};
use crate::{Error, Token};

/// Business Account Insight.
///
/// Calls are signed like every API-host request and additionally carry the
/// PSU's bearer token.
#[derive(Debug, Clone)]
pub struct AccountsApi {
    inner: Arc<RabobankClientInner>,
}

impl AccountsApi {
    pub(crate) fn new(inner: Arc<RabobankClientInner>) -> Self {
        Self { inner }
    }

    /// Lists the accounts the consent grants access to.
    #[tracing::instrument(name = "List Accounts", skip(self, access_token))]
    pub async fn list(&self, access_token: &Token) -> Result<AccountList, Error> {
        let res = self
            .inner
            .api_client
            .get(
                self.inner
                    .api_url
                    .join("/openapi/sandbox/payments/insight/accounts")
                    .unwrap(),
            )
            .bearer_auth(access_token.expose_secret())
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Fetches a single account.
    #[tracing::instrument(name = "Get Account Details", skip(self, access_token))]
    pub async fn details(
        &self,
        access_token: &Token,
        account_id: &str,
    ) -> Result<Account, Error> {
        let res = self
            .inner
            .api_client
            .get(
                self.inner
                    .api_url
                    .join(&format!(
                        "/openapi/sandbox/payments/insight/accounts/{}",
                        encode(account_id)
                    ))
                    .unwrap(),
            )
            .bearer_auth(access_token.expose_secret())
            .send()
            .await?;

        Ok(res.json().await?)
    }
}
