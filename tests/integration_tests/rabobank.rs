use crate::common::{test_context::TestContext, TEST_REDIRECT_URI};
use psd2_rust::{
    error::ApiError,
    rabobank::{AccessToken, AccessTokenRequestBuilder, ConsentStatus, GrantType},
    Error, Token,
};

/// Exchanges an authorization code the way the redirect flow would.
async fn psu_token(ctx: &TestContext) -> AccessToken {
    let request = AccessTokenRequestBuilder::default()
        .grant_type(GrantType::AuthorizationCode)
        .code(Some("a-code-from-the-redirect".to_string()))
        .redirect_uri(Some(TEST_REDIRECT_URI.to_string()))
        .build()
        .unwrap();
    ctx.rabobank.auth.access_token(&request).await.unwrap()
}

#[tokio::test]
async fn an_authorization_code_grant_names_the_consent() {
    let ctx = TestContext::start().await;

    let token = psu_token(&ctx).await;
    assert!(!token.access_token.expose_secret().is_empty());
    assert_eq!(token.token_type, "bearer");
    assert!(token.refresh_token.is_some());

    let consent_id = token
        .consent_id()
        .expect("Expected a consent id in the token metadata")
        .to_string();
    let details = ctx.rabobank.consents.details(&consent_id).await.unwrap();

    assert_eq!(details.consent_id, consent_id);
    assert_eq!(details.status, ConsentStatus::Active);
    assert!(details.scopes.contains("bai.accountinformation.read"));
}

#[tokio::test]
async fn an_unknown_consent_is_a_404() {
    let ctx = TestContext::start().await;

    let err = ctx
        .rabobank
        .consents
        .details("no-such-consent")
        .await
        .expect_err("Expected error");

    assert!(matches!(
        err,
        Error::ApiError(ApiError { status: 404, .. })
    ));
}

#[tokio::test]
async fn accounts_are_listed_with_an_issued_token() {
    let ctx = TestContext::start().await;
    let token = psu_token(&ctx).await;

    let accounts = ctx
        .rabobank
        .accounts
        .list(&token.access_token)
        .await
        .unwrap();
    assert_eq!(accounts.accounts.len(), 1);
    assert_eq!(accounts.accounts[0].iban, ctx.account_iban());
    assert_eq!(accounts.accounts[0].status, "enabled");

    let account = ctx
        .rabobank
        .accounts
        .details(&token.access_token, &accounts.accounts[0].resource_id)
        .await
        .unwrap();
    assert_eq!(account.resource_id, accounts.accounts[0].resource_id);
    assert_eq!(account.iban, ctx.account_iban());
}

#[tokio::test]
async fn a_stale_bearer_is_rejected_on_the_api_host() {
    let ctx = TestContext::start().await;

    let err = ctx
        .rabobank
        .accounts
        .list(&Token::new("stale-token"))
        .await
        .expect_err("Expected error");

    // The IBM gateway has its own error body, so only the status is stable
    assert!(matches!(
        err,
        Error::ApiError(ApiError { status: 401, .. })
    ));
}
