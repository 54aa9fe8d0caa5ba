//! Client for the Triodos PSD2 gateway (Berlin Group XS2A).
//!
//! Everything hangs off a tenant (e.g. `nl`): onboarding yields an initial
//! access token, which registers an OAuth client, which can then drive the
//! consent and payment SCA flows. Account information requires a valid
//! consent id next to the PSU's access token; payment initiation only needs
//! the signed request itself.

mod accounts;
mod auth;
mod client;
mod consents;
mod funds_confirmations;
mod model;
mod payments;

pub use accounts::AccountsApi;
pub use auth::AuthApi;
pub use client::{TriodosClient, TriodosClientBuilder};
pub use consents::ConsentsApi;
pub use funds_confirmations::FundsConfirmationsApi;
pub use model::*;
pub use payments::PaymentsApi;
