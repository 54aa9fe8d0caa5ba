use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::Token;

/// Result of the one-off onboarding call.
///
/// The returned token is only good for registering a client
/// ([`AuthApi::register_client`](super::AuthApi::register_client)).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InitialAccessToken {
    pub scope: String,
    pub access_token: Token,
    pub expires_in: u32,
    pub token_type: String,
    #[serde(rename = "_links")]
    pub links: RegistrationLinks,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegistrationLinks {
    pub registration: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Builder)]
pub struct RegisterClientRequest {
    pub redirect_uris: Vec<String>,
    /// Required when the redirect URIs span multiple hosts.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_identifier_uri: Option<String>,
}

/// Dynamically registered OAuth client, as echoed back by the bank.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisteredClient {
    pub grant_types: Vec<String>,
    pub application_type: String,
    pub client_secret_expires_at: u64,
    pub redirect_uris: Vec<String>,
    pub client_id_issued_at: u64,
    pub client_secret: Token,
    pub tls_client_certificate_bound_access_tokens: bool,
    pub token_endpoint_auth_method: String,
    pub client_id: String,
    pub response_types: Vec<String>,
    pub id_token_signed_response_alg: String,
}

/// OpenID Connect discovery document for a tenant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OpenIdConfiguration {
    pub authorization_endpoint: String,
    pub claim_types_supported: Vec<String>,
    pub claims_parameter_supported: bool,
    pub claims_supported: Vec<String>,
    pub code_challenge_methods_supported: Vec<String>,
    pub display_values_supported: Vec<String>,
    pub grant_types_supported: Vec<String>,
    pub id_token_signing_alg_values_supported: Vec<String>,
    pub issuer: String,
    pub jwks_uri: String,
    pub mutual_tls_sender_constrained_access_tokens: bool,
    pub registration_endpoint: String,
    pub request_parameter_supported: bool,
    pub request_uri_parameter_supported: bool,
    pub require_request_uri_registration: bool,
    pub response_modes_supported: Vec<String>,
    pub response_types_supported: Vec<String>,
    pub revocation_endpoint: String,
    pub revocation_endpoint_auth_methods_supported: Vec<String>,
    pub revocation_endpoint_auth_signing_alg_values_supported: Vec<String>,
    pub scopes_supported: Vec<String>,
    pub subject_types_supported: Vec<String>,
    pub token_endpoint: String,
    pub token_endpoint_auth_methods_supported: Vec<String>,
    pub token_endpoint_auth_signing_alg_values_supported: Vec<String>,
    pub userinfo_endpoint: String,
    pub userinfo_signing_alg_values_supported: Vec<String>,
}

/// Query half of the PSU authorization redirect.
///
/// `response_type=code` and `code_challenge_method=S256` are not part of this
/// struct: the bank accepts nothing else, so
/// [`AuthApi::authorization`](super::AuthApi::authorization) always appends
/// them itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Builder)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    /// PKCE challenge: base64url(sha256(code_verifier)).
    pub code_challenge: String,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mode: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token_hint: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    Implicit,
    AuthorizationCode,
    RefreshToken,
    Password,
    ClientCredentials,
    JwtBearer,
}

/// How the token endpoint call authenticates itself.
///
/// Confidential clients use their registration secret over HTTP basic auth;
/// the onboarding flow uses the initial access token as a bearer.
#[derive(Debug, Clone)]
pub enum TokenAuthentication {
    Bearer(Token),
    ClientSecretBasic { client_id: String, client_secret: Token },
}

#[derive(Serialize, Deserialize, Debug, Clone, Builder)]
pub struct TokenRequest {
    pub grant_type: GrantType,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<Token>,
    /// PKCE verifier matching the `code_challenge` sent on authorization.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccessToken {
    pub access_token: Token,
    pub scope: String,
    /// Absent on `client_credentials` grants.
    #[serde(default)]
    pub id_token: Option<String>,
    pub token_type: String,
    pub expires_in: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConsentStatus {
    Received,
    Valid,
    Rejected,
    Expired,
    TerminatedByTpp,
    RevokedByPsu,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ScaStatus {
    Received,
    PsuIdentified,
    PsuAuthenticated,
    ScaMethodSelected,
    Started,
    Unconfirmed,
    Finalised,
    Failed,
    Exempted,
}

/// One account a consent grants access to.
///
/// Exactly one identification should be set: an IBAN, a foreign account
/// number, or a UK sort code and account number pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, Builder)]
#[serde(rename_all = "camelCase")]
pub struct AccountReference {
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_account_number: Option<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uk_sort_code: Option<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uk_account_number: Option<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConsentAccess {
    pub accounts: Vec<AccountReference>,
    pub balances: Vec<AccountReference>,
    pub transactions: Vec<AccountReference>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct RegisterConsentRequest {
    pub access: ConsentAccess,
    /// `true` for recurring access, `false` for one-shot.
    pub recurring_indicator: bool,
    /// Use `9999-12-31` for the maximal available date.
    pub valid_until: NaiveDate,
    pub frequency_per_day: u32,
    /// Sessions are not supported, so this should be `false`.
    pub combined_service_indicator: bool,
}

/// Links returned when a consent or payment enters the SCA flow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScaLinks {
    #[serde(rename = "scaOAuth", default, skip_serializing_if = "Option::is_none")]
    pub sca_oauth: Option<String>,
    pub sca_redirect: String,
    pub sca_status: String,
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
    pub status: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Consent {
    pub consent_status: ConsentStatus,
    pub consent_id: String,
    pub authorisation_id: String,
    pub access: ConsentAccess,
    pub recurring_indicator: bool,
    pub valid_until: NaiveDate,
    pub frequency_per_day: u32,
    pub last_action_date: NaiveDate,
    #[serde(rename = "_links")]
    pub links: ScaLinks,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsentStatusResponse {
    pub consent_status: ConsentStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorisationLinks {
    pub sca_status: String,
    pub confirmation: String,
}

/// State of an SCA authorisation after submitting it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Authorisation {
    pub sca_status: ScaStatus,
    pub authorisation_id: String,
    #[serde(rename = "_links")]
    pub links: AuthorisationLinks,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorisationStatus {
    pub sca_status: ScaStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountLinks {
    pub account: String,
    pub transactions: String,
    pub balances: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub iban: String,
    pub currency: String,
    /// Identifier to use as `account_id` on the balance and transaction calls.
    pub resource_id: String,
    pub cash_account_type: String,
    pub name: String,
    pub status: String,
    #[serde(rename = "_links")]
    pub links: AccountLinks,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountList {
    pub accounts: Vec<Account>,
}

/// Monetary amount as the bank represents it: a decimal string next to an
/// ISO 4217 currency code.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    pub currency: String,
    pub amount: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountIban {
    pub iban: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BalanceType {
    ClosingBooked,
    Expected,
    OpeningBooked,
    InterimAvailable,
    ForwardAvailable,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub balance_type: BalanceType,
    pub balance_amount: Amount,
    pub reference_date: NaiveDate,
    pub credit_limit_included: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountBalances {
    pub account: AccountIban,
    pub balances: Vec<Balance>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Booked,
    Pending,
    Both,
}

/// Query parameters of the transaction list call.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    pub booking_status: BookingStatus,
    pub date_from: NaiveDate,
    /// Inclusive end date; the bank defaults it to today.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    pub booking_date: NaiveDate,
    pub value_date: NaiveDate,
    pub transaction_amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor_account: Option<AccountIban>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor_account: Option<AccountIban>,
    pub remittance_information_unstructured: String,
    pub proprietary_bank_transaction_code: String,
    pub end_to_end_identification: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsLinks {
    pub account: String,
    pub first: String,
    /// Present while there are further pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked: Option<Vec<Transaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<Vec<Transaction>>,
    #[serde(rename = "_links")]
    pub links: TransactionsLinks,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountTransactions {
    pub account: AccountIban,
    pub transactions: TransactionList,
}

/// ISO 20022 transaction status codes the sandbox reports.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Rcvd,
    Pdng,
    Accp,
    Actc,
    Acwc,
    Acwp,
    Acsp,
    Acsc,
    Rjct,
    Canc,
    Patc,
    Acfc,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct InitiateSepaPaymentRequest {
    pub instructed_amount: Amount,
    pub debtor_account: AccountIban,
    pub creditor_account: AccountIban,
    pub creditor_name: String,
    pub requested_execution_date: NaiveDate,
}

/// Creditor account of a cross-border payment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum CreditorAccount {
    Iban {
        iban: String,
    },
    ForeignAccountNumber {
        #[serde(rename = "foreignAccountNumber")]
        foreign_account_number: String,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street_name: String,
    pub building_number: String,
    pub town_name: String,
    pub postcode: String,
    pub country: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct InitiateCrossBorderPaymentRequest {
    pub instructed_amount: Amount,
    pub debtor_account: AccountIban,
    pub creditor_name: String,
    pub creditor_account: CreditorAccount,
    /// Mandatory when the creditor account is not an IBAN.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creditor_agent: Option<String>,
    pub charge_bearer: String,
    pub creditor_address: Address,
    pub remittance_information_unstructured: String,
    pub requested_execution_date: NaiveDate,
}

/// Payment accepted for SCA, with the links to drive the flow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InitiatedPayment {
    pub transaction_status: TransactionStatus,
    pub payment_id: String,
    pub authorisation_id: String,
    pub debtor_account: AccountIban,
    #[serde(rename = "_links")]
    pub links: ScaLinks,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatus {
    pub transaction_status: TransactionStatus,
    /// Only present when a funds check has been performed and the status is
    /// `ACTC`, `ACWC` or `ACCP`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funds_available: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub status: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub transaction_status: TransactionStatus,
    pub payment_id: String,
    pub debtor_account: AccountIban,
    #[serde(rename = "_links")]
    pub links: ResourceLinks,
}
