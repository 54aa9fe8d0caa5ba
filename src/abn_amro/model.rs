use std::fmt;

use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::Token;

/// OAuth scopes the ABN AMRO gateway understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbnAmroScope {
    /// Execute or cancel a SEPA payment.
    PostSepaPayment,
    /// Check a SEPA payment status.
    ReadSepaPayment,
    /// Execute a SEPA standing order payment.
    PostSepaRecurrentPayment,
    /// Cancel a SEPA standing order payment.
    DeleteSepaRecurrentPayment,
    /// Post a cross-border payment.
    PostXborderPayment,
    /// Read the balance of an account.
    ReadAccountBalance,
    /// Read the transactions on an account.
    ReadAccountTransaction,
    /// Read the details of an account, such as address and currency.
    ReadAccountDetails,
    /// Check availability of funds on an account.
    ReadAccountFunds,
}

impl AbnAmroScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbnAmroScope::PostSepaPayment => "psd2:payment:sepa:write",
            AbnAmroScope::ReadSepaPayment => "psd2:payment:sepa:read",
            AbnAmroScope::PostSepaRecurrentPayment => "psd2:payment:recurrent:sepa:write",
            AbnAmroScope::DeleteSepaRecurrentPayment => "psd2:payment:recurrent:sepa:delete",
            AbnAmroScope::PostXborderPayment => "psd2:payment:xborder:write",
            AbnAmroScope::ReadAccountBalance => "psd2:account:balance:read",
            AbnAmroScope::ReadAccountTransaction => "psd2:account:transaction:read",
            AbnAmroScope::ReadAccountDetails => "psd2:account:details:read",
            AbnAmroScope::ReadAccountFunds => "psd2:account:funds:read",
        }
    }
}

impl fmt::Display for AbnAmroScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bank selector for the shared Belgian/Dutch authorization endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bank {
    Nlaa01,
    Bepb01,
    Bepb02,
}

impl Bank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bank::Nlaa01 => "NLAA01",
            Bank::Bepb01 => "BEPB01",
            Bank::Bepb02 => "BEPB02",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    ClientCredentials,
    AuthorizationCode,
    RefreshToken,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::ClientCredentials => "client_credentials",
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
    pub scopes: Vec<AbnAmroScope>,
    #[builder(default)]
    pub bank: Option<Bank>,
    #[builder(default)]
    pub flow: Option<String>,
    /// Mandatory if redirect URLs are registered at ABN AMRO for the client.
    #[builder(default)]
    pub redirect_uri: Option<String>,
    #[builder(default)]
    pub state: Option<String>,
    /// Id of a registered payment the PSU is authorizing.
    #[builder(default)]
    pub transaction_id: Option<String>,
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
    #[builder(default)]
    pub scopes: Vec<AbnAmroScope>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccessToken {
    pub access_token: Token,
    /// Valid for 90 days; only issued on authorization code grants.
    #[serde(default)]
    pub refresh_token: Option<Token>,
    pub token_type: String,
    pub expires_in: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentStatus {
    Initial,
    FullySigned,
    PartiallySigned,
    SystemCanceled,
    UserCanceled,
}

/// Consent attached to the access token used on the call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsentInfo {
    pub iban: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Epoch seconds at which the consent became valid.
    pub valid: i64,
    /// Space-separated scope names granted by the consent.
    pub scopes: String,
    pub consent_status: ConsentStatus,
    pub consent_expires_in: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Stored,
    Authorized,
    Inprogress,
    Scheduled,
    Executed,
    Rejected,
    Unknown,
    Cancel,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct SepaPaymentRequest {
    /// IBAN of the ordering account. If omitted, the account is selected
    /// during authorization.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiatingparty_account_number: Option<String>,
    pub counterparty_account_number: String,
    pub counterparty_name: String,
    pub amount: f64,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_execution_date: Option<NaiveDate>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remittance_info: Option<String>,
}

/// Payment as registered, before the PSU authorized it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPayment {
    pub transaction_id: String,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SepaPayment {
    pub transaction_id: String,
    pub account_holder_name: String,
    pub account_number: String,
    pub status: PaymentStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountNumberType {
    Iban,
    #[serde(rename = "BBAN")]
    Bban,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BankIdentifierType {
    Swiftbic,
    Uksortcode,
    Fedwire,
}

/// Who pays the charges related to a cross-border payment. Always `SHA`
/// within the EEA.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChargesBearer {
    /// Both parties share the charges.
    Sha,
    /// The beneficiary pays.
    Ben,
    /// The initiating party pays.
    Our,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct InitiatingParty {
    /// ISO 4217 code; defaults to the currency of the initiating account.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_currency: Option<String>,
    pub account_number: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BankAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town_name: Option<String>,
    pub country: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CreditorAddress {
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_number: Option<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town_name: Option<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_sub_division: Option<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CounterParty {
    pub account_number_type: AccountNumberType,
    pub bank_identifier_type: BankIdentifierType,
    pub bank_identifier: String,
    /// Mandatory for `FEDWIRE` and `UKSORTCODE` identifiers.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_address: Option<BankAddress>,
    pub name: String,
    pub account_number: String,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creditor_address: Option<CreditorAddress>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct XborderPaymentRequest {
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiating_party: Option<InitiatingParty>,
    pub counter_party: CounterParty,
    pub amount: f64,
    pub currency: String,
    pub charges_bearer: ChargesBearer,
    pub requested_execution_date: NaiveDate,
    pub remittance_info: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct XborderPayment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    pub transaction_id: String,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_holder_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionRule {
    Following,
    /// Spelled the way the gateway spells it.
    Preceeding,
}

/// ISO 20022 event frequency codes supported for standing orders.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    EveryTwoWeeks,
    Monthly,
    EveryTwoMonths,
    Quarterly,
    Semiannual,
    Annual,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct StandingOrderPayment {
    pub initiatingparty_account_number: String,
    pub counterparty_account_number: String,
    pub counterparty_name: String,
    pub amount: f64,
    /// Only `EUR` is supported; assumed when omitted.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remittance_info: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct StandingOrderPaymentRequest {
    /// Must be a future date, at most 30 days ahead.
    pub start_date: NaiveDate,
    /// Indefinite when omitted.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_rule: Option<ExecutionRule>,
    pub frequency: Frequency,
    /// Two-character day, `"01"` through `"31"`.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_execution: Option<String>,
    pub payment: StandingOrderPayment,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum StandingOrderStatus {
    /// Initial status at registration.
    Stored,
    /// Consent has been given.
    Authorized,
    Rejected,
    /// The standing order is active.
    Activated,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StandingOrder {
    pub transaction_id: String,
    pub status: StandingOrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    pub currency: String,
    pub account_holder_name: String,
    pub account_number: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub account_number: String,
    pub currency: String,
    /// The sandbox only reports `BOOKBALANCE`.
    pub balance_type: String,
    pub amount: f64,
}

/// Transaction attributes that can be asked for through
/// [`TransactionsQuery::include_properties`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionProperty {
    TransactionId,
    MutationCode,
    DescriptionLines,
    TransactionTimestamp,
    BookDate,
    BalanceAfterMutation,
    CounterPartyAccountNumber,
    CounterPartyName,
    Amount,
    Currency,
    Status,
}

impl TransactionProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionProperty::TransactionId => "transactionId",
            TransactionProperty::MutationCode => "mutationCode",
            TransactionProperty::DescriptionLines => "descriptionLines",
            TransactionProperty::TransactionTimestamp => "transactionTimestamp",
            TransactionProperty::BookDate => "bookDate",
            TransactionProperty::BalanceAfterMutation => "balanceAfterMutation",
            TransactionProperty::CounterPartyAccountNumber => "counterPartyAccountNumber",
            TransactionProperty::CounterPartyName => "counterPartyName",
            TransactionProperty::Amount => "amount",
            TransactionProperty::Currency => "currency",
            TransactionProperty::Status => "status",
        }
    }
}

/// Filters for the transaction list call. All fields are optional; without
/// them the bank returns the last 50 transactions.
#[derive(Debug, Clone, Default, Builder)]
pub struct TransactionsQuery {
    #[builder(default)]
    pub book_date_from: Option<NaiveDate>,
    #[builder(default)]
    pub book_date_to: Option<NaiveDate>,
    /// Pagination key echoed from the previous page.
    #[builder(default)]
    pub next_page_key: Option<String>,
    /// When non-empty, the bank trims each transaction to these attributes.
    #[builder(default)]
    pub include_properties: Vec<TransactionProperty>,
}

/// One booked transaction.
///
/// Every field is optional because the `includeProperties` filter makes the
/// bank drop everything not asked for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_lines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_after_mutation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_party_account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_party_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsPage {
    pub account_number: String,
    /// Key for the next page; absent on the last one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_key: Option<String>,
    pub transactions: Vec<Transaction>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundsAvailability {
    pub account_number: String,
    pub amount: f64,
    pub currency: String,
    pub available: bool,
}
