use std::sync::Arc;

use reqwest::Url;

use super::client::RabobankClientInner;
use super::model::{AccessToken, AccessTokenRequest, AuthorizationUrlRequest};
use crate::Error;

/// Authorization and token endpoints.
#[derive(Debug, Clone)]
pub struct AuthApi {
    inner: Arc<RabobankClientInner>,
}

impl AuthApi {
    pub(crate) fn new(inner: Arc<RabobankClientInner>) -> Self {
        Self { inner }
    }

    /// Build the URL the PSU must visit to grant consent.
    ///
    /// The gateway redirects back to the registered redirect URL with a
    /// `code` query parameter to exchange through [`AuthApi::access_token`].
    pub fn authorization_url(&self, request: &AuthorizationUrlRequest) -> Url {
        let mut url = endpoint(&self.inner.auth_url, "authorize");

        let scope = request
            .scopes
            .iter()
            .map(|scope| scope.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &self.inner.client_id);
            query.append_pair("scope", &scope);
            query.append_pair("response_type", &request.response_type);
            if let Some(redirect_uri) = &request.redirect_uri {
                query.append_pair("redirect_uri", redirect_uri);
            }
            if let Some(state) = &request.state {
                query.append_pair("state", state);
            }
        }

        url
    }

    /// Exchange an authorization code or a refresh token for an access
    /// token.
    ///
    /// The token endpoint authenticates the client with HTTP basic
    /// credentials; it is the one Rabobank call that is not signed.
    #[tracing::instrument(name = "Request a Rabobank access token", skip(self, request))]
    pub async fn access_token(&self, request: &AccessTokenRequest) -> Result<AccessToken, Error> {
        let mut form: Vec<(&str, String)> =
            vec![("grant_type", request.grant_type.as_str().to_string())];
        if let Some(code) = &request.code {
            form.push(("code", code.clone()));
        }
        if let Some(redirect_uri) = &request.redirect_uri {
            form.push(("redirect_uri", redirect_uri.clone()));
        }
        if let Some(refresh_token) = &request.refresh_token {
            form.push(("refresh_token", refresh_token.expose_secret().to_string()));
        }

        let token = self
            .inner
            .auth_client
            .post(endpoint(&self.inner.auth_url, "token"))
            .basic_auth(
                &self.inner.client_id,
                Some(self.inner.client_secret.expose_secret()),
            )
            .form(&form)
            .send()
            .await?
            .json()
            .await
            .map_err(Error::from)?;

        Ok(token)
    }
}

/// Appends a segment to the auth URL, which carries a path prefix of its own
/// that a rooted join would clobber.
fn endpoint(base: &Url, segment: &str) -> Url {
    let mut url = base.clone();
    url.path_segments_mut().unwrap().pop_if_empty().push(segment);
    url
}
