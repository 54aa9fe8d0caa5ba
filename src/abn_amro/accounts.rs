use std::sync::Arc;

use urlencoding::encode;

use super::client::AbnAmroClientInner;
use super::model::{
    AccountBalance, AccountDetails, ConsentInfo, FundsAvailability, TransactionsPage,
    TransactionsQuery,
};
use crate::common::API_KEY_HEADER;
use crate::{Error, Token};

/// Account information services.
///
/// Every call is authenticated with the PSU's bearer token plus the
/// `API-Key` header identifying the subscribed application.
#[derive(Debug, Clone)]
pub struct AccountsApi {
    inner: Arc<AbnAmroClientInner>,
}

impl AccountsApi {
    pub(crate) fn new(inner: Arc<AbnAmroClientInner>) -> Self {
        Self { inner }
    }

    /// Fetches holder name, currency and account number of one account.
    #[tracing::instrument(name = "Get Account Details", skip(self, access_token))]
    pub async fn details(
        &self,
        access_token: &Token,
        account_number: &str,
    ) -> Result<AccountDetails, Error> {
        let res = self
            .inner
            .client
            .get(
                self.inner
                    .api_url
                    .join(&format!("/v1/accounts/{}/details", encode(account_number)))
                    .unwrap(),
            )
            .bearer_auth(access_token.expose_secret())
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Fetches the book balance of one account.
    #[tracing::instrument(name = "Get Account Balances", skip(self, access_token))]
    pub async fn balances(
        &self,
        access_token: &Token,
        account_number: &str,
    ) -> Result<AccountBalance, Error> {
        let res = self
            .inner
            .client
            .get(
                self.inner
                    .api_url
                    .join(&format!("/v1/accounts/{}/balances", encode(account_number)))
                    .unwrap(),
            )
            .bearer_auth(access_token.expose_secret())
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Fetches one page of transactions on an account.
    ///
    /// Without filters the bank answers with the last 50 booked
    /// transactions; follow [`TransactionsPage::next_page_key`] for more.
    #[tracing::instrument(name = "Get Account Transactions", skip(self, access_token, query))]
    pub async fn transactions(
        &self,
        access_token: &Token,
        account_number: &str,
        query: &TransactionsQuery,
    ) -> Result<TransactionsPage, Error> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(book_date_from) = query.book_date_from {
            params.push(("bookDateFrom", book_date_from.format("%Y-%m-%d").to_string()));
        }
        if let Some(book_date_to) = query.book_date_to {
            params.push(("bookDateTo", book_date_to.format("%Y-%m-%d").to_string()));
        }
        if let Some(next_page_key) = &query.next_page_key {
            params.push(("nextPageKey", next_page_key.clone()));
        }
        if !query.include_properties.is_empty() {
            let properties = query
                .include_properties
                .iter()
                .map(|property| property.as_str())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("includeProperties", properties));
        }

        let res = self
            .inner
            .client
            .get(
                self.inner
                    .api_url
                    .join(&format!(
                        "/v1/accounts/{}/transactions",
                        encode(account_number)
                    ))
                    .unwrap(),
            )
            .query(&params)
            .bearer_auth(access_token.expose_secret())
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Checks whether the account holds at least `amount`.
    #[tracing::instrument(name = "Check Account Funds", skip(self, access_token))]
    pub async fn funds(
        &self,
        access_token: &Token,
        account_number: &str,
        amount: f64,
        currency: Option<&str>,
    ) -> Result<FundsAvailability, Error> {
        let mut params: Vec<(&str, String)> = vec![("amount", amount.to_string())];
        if let Some(currency) = currency {
            params.push(("currency", currency.to_string()));
        }

        let res = self
            .inner
            .client
            .get(
                self.inner
                    .api_url
                    .join(&format!("/v1/accounts/{}/funds", encode(account_number)))
                    .unwrap(),
            )
            .query(&params)
            .bearer_auth(access_token.expose_secret())
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .send()
            .await?;

        Ok(res.json().await?)
    }

    /// Fetches the consent the access token was issued under.
    #[tracing::instrument(name = "Get Consent Info", skip(self, access_token))]
    pub async fn consent_info(&self, access_token: &Token) -> Result<ConsentInfo, Error> {
        let res = self
            .inner
            .client
            .get(self.inner.api_url.join("/v1/consentinfo").unwrap())
            .bearer_auth(access_token.expose_secret())
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .send()
            .await?;

        Ok(res.json().await?)
    }
}
