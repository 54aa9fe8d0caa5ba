//! Client for the Rabobank premium (business) sandbox.
//!
//! The OAuth2 flow runs unsigned against the auth host: the PSU visits the
//! authorization URL, the redirect carries a code, and the token endpoint
//! trades it for a bearer token whose `metadata` names the consent object.
//! Everything on the API host is signed with `rsa-sha512` over
//! `date digest x-request-id`; account information additionally presents
//! the bearer token, the consent details service the signature alone.

mod accounts;
mod auth;
mod client;
mod consents;
mod model;

pub use accounts::AccountsApi;
pub use auth::AuthApi;
pub use client::{RabobankClient, RabobankClientBuilder};
pub use consents::ConsentsApi;
pub use model::*;
