use std::fmt;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::Token;

/// OAuth scopes of the Rabobank premium (business) APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RabobankScope {
    /// Business Account Insight: read accounts, balances and transactions.
    AccountInformationRead,
    /// Business Bulk Payment Initiation: submit and track bulk files.
    BulkReadWrite,
    /// Business Single Payment Initiation.
    SingleReadWrite,
}

impl RabobankScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RabobankScope::AccountInformationRead => "bai.accountinformation.read",
            RabobankScope::BulkReadWrite => "bbpi.bulk.read-write",
            RabobankScope::SingleReadWrite => "bspi.single.read-write",
        }
    }
}

impl fmt::Display for RabobankScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    AuthorizationCode,
    RefreshToken,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::AuthorizationCode => "authorization_code",
            GrantType::RefreshToken => "refresh_token",
        }
    }
}

/// Parameters of the authorization URL the PSU is redirected to.
#[derive(Debug, Clone, Builder)]
pub struct AuthorizationUrlRequest {
    /// Only `code` is accepted by the gateway.
    pub response_type: String,
    pub scopes: Vec<RabobankScope>,
    /// Mandatory if more than one redirect URL is registered for the client.
    #[builder(default)]
    pub redirect_uri: Option<String>,
    #[builder(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Builder)]
pub struct AccessTokenRequest {
    pub grant_type: GrantType,
    #[builder(default)]
    pub code: Option<String>,
    #[builder(default)]
    pub redirect_uri: Option<String>,
    #[builder(default)]
    pub refresh_token: Option<Token>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccessToken {
    pub access_token: Token,
    pub token_type: String,
    pub expires_in: u32,
    /// Space-separated scope names the PSU consented to.
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<Token>,
    #[serde(default)]
    pub refresh_token_expires_in: Option<u32>,
    /// Epoch seconds at which the PSU granted the consent.
    #[serde(default)]
    pub consented_on: Option<i64>,
    /// Opaque gateway metadata; carries the consent id as
    /// `a:consentId <id>`, see [`AccessToken::consent_id`].
    #[serde(default)]
    pub metadata: Option<String>,
}

impl AccessToken {
    /// Extracts the consent id from the token metadata, if present.
    pub fn consent_id(&self) -> Option<&str> {
        let metadata = self.metadata.as_deref()?;
        metadata
            .split_whitespace()
            .skip_while(|part| *part != "a:consentId")
            .nth(1)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConsentStatus {
    Active,
    Expired,
    Revoked,
}

/// Scope and status of a consent object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsentDetails {
    pub consent_id: String,
    /// Space-separated scope names the PSU granted.
    pub scopes: String,
    pub status: ConsentStatus,
}

/// One payment account visible under the consent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub resource_id: String,
    pub iban: String,
    /// ISO 4217 code of the account currency.
    pub currency: String,
    /// `enabled`, `deleted` or `blocked`.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountList {
    pub accounts: Vec<Account>,
}
