//! Organization body extractor.
//!
//! Decodes a create request body into a [`NewOrganization`].

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use orgsearch_persistence::error::ValidationError;
use orgsearch_persistence::types::NewOrganization;

use crate::error::RestError;

/// Axum extractor for organization create payloads.
///
/// The body is read as raw bytes and decoded without looking at
/// `Content-Type`. Bodies carrying an `id` are rejected.
#[derive(Debug)]
pub struct OrganizationBody(pub NewOrganization);

impl<S> FromRequest<S> for OrganizationBody
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            RestError::from(ValidationError::MalformedBody {
                message: e.body_text(),
            })
        })?;

        Ok(OrganizationBody(NewOrganization::from_json_slice(&bytes)?))
    }
}
