//! Client for the ABN AMRO PSD2 sandbox.
//!
//! ABN AMRO puts its trust in transport security instead of message
//! signatures: calls carry a bearer token and the application's `API-Key`
//! header over mutual TLS. Payments are registered first, authorized by the
//! PSU through the authorization URL (the `transactionId` parameter), and
//! executed with a PUT afterwards.

mod accounts;
mod auth;
mod client;
mod model;
mod payments;

pub use accounts::AccountsApi;
pub use auth::AuthApi;
pub use client::{AbnAmroClient, AbnAmroClientBuilder};
pub use model::*;
pub use payments::PaymentsApi;
