use std::fmt;
use std::sync::Arc;

use reqwest::header::HeaderValue;
use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use super::accounts::AccountsApi;
use super::auth::AuthApi;
use super::consents::ConsentsApi;
use crate::common::{
    certificate_header_value, default_http_client, ACCEPT_HEADER, DATE_HEADER,
    DEFAULT_RABOBANK_API_URL, DEFAULT_RABOBANK_AUTH_URL, DIGEST_HEADER,
    SIGNATURE_CERTIFICATE_HEADER, X_IBM_CLIENT_ID_HEADER, X_REQUEST_ID_HEADER,
};
use crate::middlewares::{ErrorHandlingMiddleware, SigningMiddleware};
use crate::signing::{
    Credential, DigestAlgorithm, RequestSigner, SignatureAlgorithm, SignatureScheme,
};
use crate::{Error, Token};

/// Signing contract of the Rabobank premium gateway.
static RABOBANK_SIGNATURE_SCHEME: SignatureScheme = SignatureScheme {
    digest: DigestAlgorithm::Sha512,
    algorithm: SignatureAlgorithm::RsaSha512,
    covered_headers: &[DATE_HEADER, DIGEST_HEADER, X_REQUEST_ID_HEADER],
};

pub(crate) struct RabobankClientInner {
    /// Signed client for the API host.
    pub(crate) api_client: ClientWithMiddleware,
    /// Plain client for the OAuth2 endpoints, which reject signed headers.
    pub(crate) auth_client: ClientWithMiddleware,
    pub(crate) auth_url: Url,
    pub(crate) api_url: Url,
    pub(crate) client_id: String,
    pub(crate) client_secret: Token,
}

impl fmt::Debug for RabobankClientInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Skip the client secret.
        f.debug_struct("RabobankClientInner")
            .field("auth_url", &self.auth_url)
            .field("api_url", &self.api_url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Client for the Rabobank premium (business) sandbox.
///
/// Requests to the API host are signed with the credential's RSA key
/// (`rsa-sha512` over `date digest x-request-id`, `keyId` set to the
/// certificate serial number) and carry the `X-IBM-Client-Id` and
/// `Signature-Certificate` headers. The OAuth2 token endpoint instead
/// authenticates with HTTP basic credentials and is left unsigned.
#[derive(Debug)]
pub struct RabobankClient {
    pub auth: AuthApi,
    pub consents: ConsentsApi,
    pub accounts: AccountsApi,
}

impl RabobankClient {
    /// Builds a new client with the default sandbox configuration.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<Token>,
        credential: Credential,
    ) -> Result<RabobankClient, Error> {
        RabobankClientBuilder::new(client_id, client_secret, credential).build()
    }

    /// Returns a builder to create a customized client.
    pub fn builder(
        client_id: impl Into<String>,
        client_secret: impl Into<Token>,
        credential: Credential,
    ) -> RabobankClientBuilder {
        RabobankClientBuilder::new(client_id, client_secret, credential)
    }
}

/// Builder for a [`RabobankClient`].
#[derive(Debug)]
pub struct RabobankClientBuilder {
    client: reqwest::Client,
    client_id: String,
    client_secret: Token,
    credential: Credential,
    auth_url: Url,
    api_url: Url,
}

impl RabobankClientBuilder {
    fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<Token>,
        credential: Credential,
    ) -> Self {
        Self {
            client: default_http_client(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            credential,
            auth_url: Url::parse(DEFAULT_RABOBANK_AUTH_URL).unwrap(),
            api_url: Url::parse(DEFAULT_RABOBANK_API_URL).unwrap(),
        }
    }

    /// Builds the client.
    ///
    /// Fails if the credential's key material does not parse, so a broken
    /// configuration surfaces here rather than on the first request.
    pub fn build(self) -> Result<RabobankClient, Error> {
        let signer = RequestSigner::new(
            self.credential.key_id,
            &self.credential.private_key_pem,
            RABOBANK_SIGNATURE_SCHEME,
        )?;

        let mut default_headers = vec![
            (ACCEPT_HEADER, HeaderValue::from_static("application/json")),
            (
                X_IBM_CLIENT_ID_HEADER,
                HeaderValue::from_str(&self.client_id).map_err(|e| Error::Other(e.into()))?,
            ),
        ];
        if let Some(certificate) = &self.credential.signing_certificate {
            let value = HeaderValue::from_str(&certificate_header_value(certificate))
                .map_err(|e| Error::Other(e.into()))?;
            default_headers.push((SIGNATURE_CERTIFICATE_HEADER, value));
        }

        let api_client = ClientBuilder::new(self.client.clone())
            .with(TracingMiddleware::default())
            .with(ErrorHandlingMiddleware)
            .with(SigningMiddleware {
                signer,
                default_headers,
            })
            .build();
        let auth_client = ClientBuilder::new(self.client)
            .with(TracingMiddleware::default())
            .with(ErrorHandlingMiddleware)
            .build();

        let inner = Arc::new(RabobankClientInner {
            api_client,
            auth_client,
            auth_url: self.auth_url,
            api_url: self.api_url,
            client_id: self.client_id,
            client_secret: self.client_secret,
        });

        Ok(RabobankClient {
            auth: AuthApi::new(inner.clone()),
            consents: ConsentsApi::new(inner.clone()),
            accounts: AccountsApi::new(inner),
        })
    }

    /// Sets the HTTP client to use, e.g. one with the PSD2 client
    /// certificate loaded for mutual TLS.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Points the client at a different OAuth2 host. The premium sandbox
    /// one, path included, is used by default.
    pub fn with_auth_url(mut self, auth_url: Url) -> Self {
        self.auth_url = auth_url;
        self
    }

    /// Points the client at a different API host, e.g. a test server.
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }
}
