use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::{
    abn_amro::{AccountsApi, AuthApi, PaymentsApi},
    common::{
        default_http_client, DEFAULT_ABN_AMRO_API_URL, DEFAULT_ABN_AMRO_AUTHORIZE_URL,
        DEFAULT_ABN_AMRO_AUTH_URL,
    },
    middlewares::ErrorHandlingMiddleware,
    Token,
};

pub(crate) struct AbnAmroClientInner {
    pub(crate) client: ClientWithMiddleware,
    pub(crate) auth_url: Url,
    pub(crate) authorize_url: Url,
    pub(crate) api_url: Url,
    pub(crate) client_id: String,
    pub(crate) api_key: Token,
}

impl Debug for AbnAmroClientInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Skip the api key.
        f.debug_struct("AbnAmroClientInner")
            .field("auth_url", &self.auth_url)
            .field("authorize_url", &self.authorize_url)
            .field("api_url", &self.api_url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Client for the ABN AMRO PSD2 sandbox.
///
/// ABN AMRO authenticates calls with the TLS client certificate and an API
/// key instead of signing individual requests, so building one never touches
/// key material and cannot fail.
#[derive(Debug, Clone)]
pub struct AbnAmroClient {
    /// Authorization and token endpoints.
    pub auth: AuthApi,
    /// Account information services.
    pub accounts: AccountsApi,
    /// Payment initiation services.
    pub payments: PaymentsApi,
}

impl AbnAmroClient {
    pub fn new(client_id: impl Into<String>, api_key: impl Into<Token>) -> AbnAmroClient {
        AbnAmroClientBuilder::new(client_id, api_key).build()
    }

    /// Unvalidated builder to customize the HTTP client or the endpoints.
    pub fn builder(
        client_id: impl Into<String>,
        api_key: impl Into<Token>,
    ) -> AbnAmroClientBuilder {
        AbnAmroClientBuilder::new(client_id, api_key)
    }
}

/// Builder for [`AbnAmroClient`].
pub struct AbnAmroClientBuilder {
    client: reqwest::Client,
    auth_url: Url,
    authorize_url: Url,
    api_url: Url,
    client_id: String,
    api_key: Token,
}

impl AbnAmroClientBuilder {
    fn new(client_id: impl Into<String>, api_key: impl Into<Token>) -> Self {
        Self {
            client: default_http_client(),
            auth_url: Url::parse(DEFAULT_ABN_AMRO_AUTH_URL).unwrap(),
            authorize_url: Url::parse(DEFAULT_ABN_AMRO_AUTHORIZE_URL).unwrap(),
            api_url: Url::parse(DEFAULT_ABN_AMRO_API_URL).unwrap(),
            client_id: client_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Set a custom HTTP client, e.g. one with the PSD2 client certificate
    /// loaded for mutual TLS. Keep redirects disabled on it: the
    /// authorization endpoint answers with a redirect the caller inspects.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Set a custom token endpoint. The sandbox one is used by default.
    pub fn with_auth_url(mut self, auth_url: Url) -> Self {
        self.auth_url = auth_url;
        self
    }

    /// Set a custom authorization endpoint. The sandbox one is used by
    /// default.
    pub fn with_authorize_url(mut self, authorize_url: Url) -> Self {
        self.authorize_url = authorize_url;
        self
    }

    /// Set a custom API endpoint. The sandbox one is used by default.
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    pub fn build(self) -> AbnAmroClient {
        let client = ClientBuilder::new(self.client)
            .with(TracingMiddleware::default())
            .with(ErrorHandlingMiddleware)
            .build();

        let inner = Arc::new(AbnAmroClientInner {
            client,
            auth_url: self.auth_url,
            authorize_url: self.authorize_url,
            api_url: self.api_url,
            client_id: self.client_id,
            api_key: self.api_key,
        });

        AbnAmroClient {
            auth: AuthApi::new(inner.clone()),
            accounts: AccountsApi::new(inner.clone()),
            payments: PaymentsApi::new(inner),
        }
    }
}

impl Debug for AbnAmroClientBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbnAmroClientBuilder")
            .field("auth_url", &self.auth_url)
            .field("authorize_url", &self.authorize_url)
            .field("api_url", &self.api_url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}
