use std::fmt;
use std::sync::Arc;

use reqwest::header::HeaderValue;
use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use super::accounts::AccountsApi;
use super::auth::AuthApi;
use super::consents::ConsentsApi;
use super::funds_confirmations::FundsConfirmationsApi;
use super::payments::PaymentsApi;
use crate::common::{
    certificate_header_value, default_http_client, ACCEPT_HEADER, DEFAULT_TRIODOS_BASE_URL,
    DIGEST_HEADER, SSL_CERTIFICATE_HEADER, TPP_SIGNATURE_CERTIFICATE_HEADER, X_REQUEST_ID_HEADER,
};
use crate::middlewares::{ErrorHandlingMiddleware, SigningMiddleware};
use crate::signing::{
    Credential, DigestAlgorithm, RequestSigner, SignatureAlgorithm, SignatureScheme,
};
use crate::Error;

/// Signing contract of the Triodos XS2A gateway.
static TRIODOS_SIGNATURE_SCHEME: SignatureScheme = SignatureScheme {
    digest: DigestAlgorithm::Sha256,
    algorithm: SignatureAlgorithm::RsaSha256,
    covered_headers: &[DIGEST_HEADER, X_REQUEST_ID_HEADER],
};

pub(crate) struct TriodosClientInner {
    pub(crate) client: ClientWithMiddleware,
    pub(crate) base_url: Url,
    pub(crate) tenant: String,
}

impl fmt::Debug for TriodosClientInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriodosClientInner")
            .field("base_url", &self.base_url)
            .field("tenant", &self.tenant)
            .finish_non_exhaustive()
    }
}

/// Client for the Triodos PSD2 sandbox.
///
/// Every request going through it is signed with the credential's RSA key
/// (`rsa-sha256` over `digest x-request-id`) and carries the signing
/// certificate in the `TPP-Signature-Certificate` and `SSL-Certificate`
/// headers.
#[derive(Debug)]
pub struct TriodosClient {
    pub auth: AuthApi,
    pub consents: ConsentsApi,
    pub accounts: AccountsApi,
    pub payments: PaymentsApi,
    pub funds_confirmations: FundsConfirmationsApi,
}

impl TriodosClient {
    /// Builds a new client for a tenant with the default configuration.
    pub fn new(tenant: impl Into<String>, credential: Credential) -> Result<TriodosClient, Error> {
        TriodosClientBuilder::new(tenant, credential).build()
    }

    /// Returns a builder to create a customized client.
    pub fn builder(tenant: impl Into<String>, credential: Credential) -> TriodosClientBuilder {
        TriodosClientBuilder::new(tenant, credential)
    }
}

/// Builder for a [`TriodosClient`].
#[derive(Debug)]
pub struct TriodosClientBuilder {
    client: reqwest::Client,
    tenant: String,
    credential: Credential,
    base_url: Url,
}

impl TriodosClientBuilder {
    fn new(tenant: impl Into<String>, credential: Credential) -> Self {
        Self {
            client: default_http_client(),
            tenant: tenant.into(),
            credential,
            base_url: Url::parse(DEFAULT_TRIODOS_BASE_URL).unwrap(),
        }
    }

    /// Builds the client.
    ///
    /// Fails if the credential's key material does not parse, so a broken
    /// configuration surfaces here rather than on the first request.
    pub fn build(self) -> Result<TriodosClient, Error> {
        let signer = RequestSigner::new(
            self.credential.key_id,
            &self.credential.private_key_pem,
            TRIODOS_SIGNATURE_SCHEME,
        )?;

        let mut default_headers = vec![(ACCEPT_HEADER, HeaderValue::from_static("application/json"))];
        if let Some(certificate) = &self.credential.signing_certificate {
            let value = HeaderValue::from_str(&certificate_header_value(certificate))
                .map_err(|e| Error::Other(e.into()))?;
            default_headers.push((TPP_SIGNATURE_CERTIFICATE_HEADER, value.clone()));
            default_headers.push((SSL_CERTIFICATE_HEADER, value));
        }

        let inner = Arc::new(TriodosClientInner {
            client: build_client_with_middleware(self.client, signer, default_headers),
            base_url: self.base_url,
            tenant: self.tenant,
        });

        Ok(TriodosClient {
            auth: AuthApi::new(inner.clone()),
            consents: ConsentsApi::new(inner.clone()),
            accounts: AccountsApi::new(inner.clone()),
            payments: PaymentsApi::new(inner.clone()),
            funds_confirmations: FundsConfirmationsApi::new(inner),
        })
    }

    /// Sets the HTTP client to use.
    ///
    /// The Triodos gateway authenticates TPPs at the transport level as well,
    /// so this is where an mTLS-configured client goes. Note that redirects
    /// should stay disabled for the authorization endpoint to be usable.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Points the client at a different gateway, e.g. a test server.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }
}

fn build_client_with_middleware(
    client: reqwest::Client,
    signer: RequestSigner,
    default_headers: Vec<(&'static str, HeaderValue)>,
) -> ClientWithMiddleware {
    ClientBuilder::new(client)
        .with(TracingMiddleware::default())
        .with(ErrorHandlingMiddleware)
        .with(SigningMiddleware {
            signer,
            default_headers,
        })
        .build()
}
