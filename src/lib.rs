//! Typed Rust clients for the PSD2 sandboxes of three Dutch banks: Triodos,
//! ABN AMRO and Rabobank.
//!
//! Each bank has its own client ([`triodos::TriodosClient`],
//! [`abn_amro::AbnAmroClient`], [`rabobank::RabobankClient`]) wrapping the
//! OAuth2 and consent flows, account information and payment initiation of
//! its sandbox. The part that is tedious to get right by hand, the
//! cavage-style message signature with its `Digest`, `Date` and
//! `X-Request-ID` headers, is attached transparently to every outgoing
//! request for the banks that demand it.
//!
//! # Usage
//!
//! ## Prerequisites
//!
//! Sign up on the bank's developer portal and register an application to
//! obtain a client id (plus, depending on the bank, a client secret or an
//! API key). Triodos and Rabobank additionally want an RSA signing key and
//! certificate, which their sandboxes accept self-signed:
//!
//! ```sh
//! openssl req -x509 -newkey rsa:2048 -nodes -subj "/C=NL/O=Example TPP" \
//!     -keyout psd2-key.pem -out psd2-cert.pem
//! ```
//!
//! The key id accompanying the signature is bank-specific: Triodos expects
//! the `SN=...,CA=...` form, Rabobank the bare serial number of the
//! certificate.
//!
//! ## Initiate a payment with Triodos
//!
//! ```rust,no_run
//! # use psd2_rust::{signing::Credential, triodos::*, Error};
//! # use chrono::NaiveDate;
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let credential = Credential {
//!     key_id: "SN=6ea2e3a7,CA=CN=PSDNL-AUT-SBX".to_string(),
//!     private_key_pem: std::fs::read("psd2-key.pem").unwrap(),
//!     signing_certificate: Some(std::fs::read_to_string("psd2-cert.pem").unwrap()),
//! };
//! let triodos = TriodosClient::new("nl", credential)?;
//!
//! let payment = triodos
//!     .payments
//!     .initiate_sepa_payment(
//!         &InitiateSepaPaymentRequestBuilder::default()
//!             .instructed_amount(Amount {
//!                 currency: "EUR".to_string(),
//!                 amount: "11".to_string(),
//!             })
//!             .debtor_account(AccountIban {
//!                 iban: "NL37TRIO0320564487".to_string(),
//!             })
//!             .creditor_account(AccountIban {
//!                 iban: "NL02ABNA0457180536".to_string(),
//!             })
//!             .creditor_name("Acme BV".to_string())
//!             .requested_execution_date(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
//!             .build()
//!             .unwrap(),
//!         "192.0.2.81",
//!         "https://example.com/callback",
//!     )
//!     .await?;
//!
//! println!("Payment {}: {:?}", payment.payment_id, payment.transaction_status);
//! # Ok(())
//! # }
//! ```
//!
//! The response links point at the SCA approval page the PSU must visit
//! before the payment leaves `RCVD`.
//!
//! ## Read balances with ABN AMRO
//!
//! ```rust,no_run
//! # use psd2_rust::{abn_amro::*, Error};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let abn_amro = AbnAmroClient::new("some-client-id", "some-api-key");
//!
//! let token = abn_amro
//!     .auth
//!     .access_token(
//!         &AccessTokenRequestBuilder::default()
//!             .grant_type(GrantType::ClientCredentials)
//!             .scopes(vec![AbnAmroScope::ReadAccountBalance])
//!             .build()
//!             .unwrap(),
//!     )
//!     .await?;
//! let balance = abn_amro
//!     .accounts
//!     .balances(&token.access_token, "NL62ABNA9999841479")
//!     .await?;
//!
//! println!("{} {}", balance.amount, balance.currency);
//! # Ok(())
//! # }
//! ```
//!
//! ABN AMRO never signs individual messages; it relies on the TLS client
//! certificate, which goes into the underlying HTTP client through
//! [`AbnAmroClientBuilder::with_http_client`](abn_amro::AbnAmroClientBuilder::with_http_client).
//!
//! ## List accounts with Rabobank
//!
//! ```rust,no_run
//! # use psd2_rust::{rabobank::*, signing::Credential, Error};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let credential: Credential = unreachable!();
//! let rabobank = RabobankClient::new("some-client-id", "some-client-secret", credential)?;
//!
//! // The PSU authorized at `rabobank.auth.authorization_url(...)` and came
//! // back with a code
//! let token = rabobank
//!     .auth
//!     .access_token(
//!         &AccessTokenRequestBuilder::default()
//!             .grant_type(GrantType::AuthorizationCode)
//!             .code(Some("some-authorization-code".to_string()))
//!             .build()
//!             .unwrap(),
//!     )
//!     .await?;
//!
//! for account in rabobank.accounts.list(&token.access_token).await?.accounts {
//!     println!("{}: {}", account.iban, account.status);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod abn_amro;
mod common;
pub mod error;
mod middlewares;
pub mod rabobank;
pub mod signing;
#[cfg(test)]
pub(crate) mod testkit;
mod token;
pub mod triodos;

pub use error::Error;
pub use signing::Credential;
pub use token::Token;
