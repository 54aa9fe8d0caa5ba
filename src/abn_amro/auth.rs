use std::sync::Arc;

use reqwest::Url;

use crate::{
    abn_amro::{
        client::AbnAmroClientInner,
        model::{AccessToken, AccessTokenRequest, AuthorizationUrlRequest},
    },
    Error,
};

/// Authorization and token endpoints.
#[derive(Debug, Clone)]
pub struct AuthApi {
    inner: Arc<AbnAmroClientInner>,
}

impl AuthApi {
    pub(crate) fn new(inner: Arc<AbnAmroClientInner>) -> Self {
        Self { inner }
    }

    /// Build the URL the PSU must visit to grant consent.
    ///
    /// The gateway redirects back to the registered redirect URL with a
    /// `code` query parameter to exchange through [`AuthApi::access_token`].
    pub fn authorization_url(&self, request: &AuthorizationUrlRequest) -> Url {
        let mut url = self
            .inner
            .authorize_url
            .join("/as/authorization.oauth2")
            .unwrap();

        let scope = request
            .scopes
            .iter()
            .map(|scope| scope.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &self.inner.client_id);
            query.append_pair("response_type", &request.response_type);
            query.append_pair("scope", &scope);
            if let Some(bank) = &request.bank {
                query.append_pair("bank", bank.as_str());
            }
            if let Some(flow) = &request.flow {
                query.append_pair("flow", flow);
            }
            if let Some(redirect_uri) = &request.redirect_uri {
                query.append_pair("redirect_uri", redirect_uri);
            }
            if let Some(state) = &request.state {
                query.append_pair("state", state);
            }
            if let Some(transaction_id) = &request.transaction_id {
                query.append_pair("transactionId", transaction_id);
            }
        }

        url
    }

    /// Exchange an authorization code, a refresh token or the client
    /// credentials for an access token.
    ///
    /// The token endpoint identifies the caller by the TLS client
    /// certificate and the `client_id` form field.
    #[tracing::instrument(name = "Request an ABN AMRO access token", skip(self, request))]
    pub async fn access_token(&self, request: &AccessTokenRequest) -> Result<AccessToken, Error> {
        let mut form: Vec<(&str, String)> = vec![
            ("client_id", self.inner.client_id.clone()),
            ("grant_type", request.grant_type.as_str().to_string()),
        ];
        if let Some(code) = &request.code {
            form.push(("code", code.clone()));
        }
        if let Some(redirect_uri) = &request.redirect_uri {
            form.push(("redirect_uri", redirect_uri.clone()));
        }
        if let Some(refresh_token) = &request.refresh_token {
            form.push(("refresh_token", refresh_token.expose_secret().to_string()));
        }
        if !request.scopes.is_empty() {
            let scope = request
                .scopes
                .iter()
                .map(|scope| scope.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            form.push(("scope", scope));
        }

        let token = self
            .inner
            .client
            .post(self.inner.auth_url.join("/as/token.oauth2").unwrap())
            .form(&form)
            .send()
            .await?
            .json()
            .await
            .map_err(Error::from)?;

        Ok(token)
    }
}
