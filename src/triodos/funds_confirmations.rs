use std::sync::Arc;

use super::client::TriodosClientInner;
use crate::Error;

/// Confirmation of funds (PIIS).
///
/// The sandbox gateway exposes none of these endpoints; every operation
/// returns [`Error::Unsupported`] so callers can discover that without a
/// round trip.
#[derive(Debug, Clone)]
pub struct FundsConfirmationsApi {
    #[allow(dead_code)]
    inner: Arc<TriodosClientInner>,
}

impl FundsConfirmationsApi {
    pub(crate) fn new(inner: Arc<TriodosClientInner>) -> Self {
        Self { inner }
    }

    pub async fn confirm_funds(&self) -> Result<(), Error> {
        Err(Error::Unsupported("Confirmation of funds"))
    }

    pub async fn register_consent(&self) -> Result<(), Error> {
        Err(Error::Unsupported("Registering a funds confirmation consent"))
    }

    pub async fn consent(&self, _consent_id: &str) -> Result<(), Error> {
        Err(Error::Unsupported("Fetching a funds confirmation consent"))
    }

    pub async fn consent_status(&self, _consent_id: &str) -> Result<(), Error> {
        Err(Error::Unsupported(
            "Fetching a funds confirmation consent status",
        ))
    }

    pub async fn delete_consent(&self, _consent_id: &str) -> Result<(), Error> {
        Err(Error::Unsupported("Deleting a funds confirmation consent"))
    }

    pub async fn authorisations(&self, _consent_id: &str) -> Result<(), Error> {
        Err(Error::Unsupported(
            "Listing funds confirmation authorisations",
        ))
    }

    pub async fn create_authorisation(&self, _consent_id: &str) -> Result<(), Error> {
        Err(Error::Unsupported(
            "Creating a funds confirmation authorisation",
        ))
    }

    pub async fn authorisation_status(
        &self,
        _consent_id: &str,
        _authorisation_id: &str,
    ) -> Result<(), Error> {
        Err(Error::Unsupported(
            "Fetching a funds confirmation authorisation status",
        ))
    }

    pub async fn submit_authorisation(
        &self,
        _consent_id: &str,
        _authorisation_id: &str,
    ) -> Result<(), Error> {
        Err(Error::Unsupported(
            "Submitting a funds confirmation authorisation",
        ))
    }
}
