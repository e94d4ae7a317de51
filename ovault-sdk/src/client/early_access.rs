//! Early-access API client (frontend or back-office → Open Vault server).
//!
//! Public endpoints need no authentication. Admin endpoints carry the
//! plaintext admin secret in the `Ovault-Admin-Authorization` header,
//! verified server-side against an argon2-hashed value.

use reqwest::Client;
use url::Url;
use uuid::Uuid;

use super::{ClientError, parse_response};
use crate::ADMIN_AUTH_HEADER;
use crate::objects::early_access::{
    EarlyAccessRequest, ListSubmissionsQuery, SubmissionResponse, SubmissionStats,
    UpdateSubmissionRequest,
};
use crate::objects::{Envelope, PagedEnvelope};

/// Typed HTTP client for the early-access API.
#[derive(Debug, Clone)]
pub struct EarlyAccessClient {
    http: Client,
    base_url: Url,
    admin_secret: Option<String>,
}

impl EarlyAccessClient {
    /// Create a new client for the public endpoints.
    ///
    /// * `base_url` – root URL of the Open Vault server.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
            admin_secret: None,
        }
    }

    /// Attach the admin secret, enabling the admin-only endpoints.
    pub fn with_admin_secret(mut self, secret: impl Into<String>) -> Self {
        self.admin_secret = Some(secret.into());
        self
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    fn admin_secret(&self) -> Result<&str, ClientError> {
        self.admin_secret
            .as_deref()
            .ok_or(ClientError::MissingAdminSecret)
    }

    /// `POST /api/early-access` – submit a new early-access form.
    pub async fn submit(
        &self,
        request: &EarlyAccessRequest,
    ) -> Result<Envelope<SubmissionResponse>, ClientError> {
        let url = self.base_url.join("/api/early-access")?;
        let resp = self.http.post(url).json(request).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/early-access` – list submissions with pagination.
    pub async fn list(
        &self,
        query: &ListSubmissionsQuery,
    ) -> Result<PagedEnvelope<SubmissionResponse>, ClientError> {
        let url = self.base_url.join("/api/early-access")?;
        let resp = self.http.get(url).query(query).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/early-access/stats` – aggregate submission counters.
    pub async fn stats(&self) -> Result<Envelope<SubmissionStats>, ClientError> {
        let url = self.base_url.join("/api/early-access/stats")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/early-access/{id}` – fetch one submission (admin).
    pub async fn get(&self, id: Uuid) -> Result<Envelope<SubmissionResponse>, ClientError> {
        let url = self.base_url.join(&format!("/api/early-access/{id}"))?;
        let resp = self
            .http
            .get(url)
            .header(ADMIN_AUTH_HEADER, self.admin_secret()?)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `PUT /api/early-access/{id}` – update a submission (admin).
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateSubmissionRequest,
    ) -> Result<Envelope<SubmissionResponse>, ClientError> {
        let url = self.base_url.join(&format!("/api/early-access/{id}"))?;
        let resp = self
            .http
            .put(url)
            .header(ADMIN_AUTH_HEADER, self.admin_secret()?)
            .json(request)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `DELETE /api/early-access/{id}` – delete a submission (admin).
    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let url = self.base_url.join(&format!("/api/early-access/{id}"))?;
        let resp = self
            .http
            .delete(url)
            .header(ADMIN_AUTH_HEADER, self.admin_secret()?)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, body });
        }

        Ok(())
    }
}
