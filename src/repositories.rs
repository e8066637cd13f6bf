use crate::{
    domain::MemeRepository,
    errors::SourceError,
    models::{MemeEnvelope, MemeId, WireMeme},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{self, info};

#[derive(Debug, Clone)]
pub struct HttpMemeRepository {
    client: Client,
    base_url: String, // No trailing slash
}

impl HttpMemeRepository {
    /// Creates a repository talking to the meme API at `base_url`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(%base_url, "Initializing HttpMemeRepository");
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `url` and decodes the body as JSON.
    /// `Ok(None)` means the server answered 404.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, SourceError> {
        tracing::debug!(%url, "Meme API: sending request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SourceError::Request { url: url.to_string(), source })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            tracing::warn!(%url, %status, "Meme API: unexpected status");
            return Err(SourceError::Status { url: url.to_string(), status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| SourceError::Request { url: url.to_string(), source })?;

        let decoded = serde_json::from_str::<T>(&body)
            .context(format!("Meme API: malformed response body from {}", url))
            .map_err(SourceError::BackendError)?; // Map anyhow::Error -> SourceError
        Ok(Some(decoded))
    }
}

#[async_trait]
impl MemeRepository for HttpMemeRepository {
    /// Fetches `GET /memes`.
    async fn list_all(&self) -> Result<Vec<WireMeme>, SourceError> {
        let url = format!("{}/memes", self.base_url);
        let memes: Vec<WireMeme> = self
            .get_json(&url)
            .await?
            .ok_or_else(|| SourceError::Status {
                url: url.clone(),
                status: StatusCode::NOT_FOUND,
            })?;

        tracing::info!("Meme API: listed {} memes", memes.len());
        Ok(memes)
    }

    /// Fetches `GET /meme/{id}` and unwraps the `meme` envelope.
    async fn get_by_id(&self, id: &MemeId) -> Result<WireMeme, SourceError> {
        let url = format!("{}/meme/{}", self.base_url, id);
        match self.get_json::<MemeEnvelope>(&url).await? {
            Some(envelope) => {
                tracing::debug!(meme_id = %id, "Meme API: meme found");
                Ok(envelope.meme)
            }
            None => {
                tracing::warn!(meme_id = %id, "Meme API: meme not found");
                Err(SourceError::NotFound(id.clone()))
            }
        }
    }

    fn image_url(&self, id: &MemeId) -> String {
        format!("{}/image/{}", self.base_url, id)
    }
}

/// Fixed collection served from memory. Backs offline mode.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemeRepository {
    memes: Vec<WireMeme>,
}

impl InMemoryMemeRepository {
    pub fn new(memes: Vec<WireMeme>) -> Self {
        info!(count = memes.len(), "Initializing InMemoryMemeRepository");
        Self { memes }
    }
}

#[async_trait]
impl MemeRepository for InMemoryMemeRepository {
    async fn list_all(&self) -> Result<Vec<WireMeme>, SourceError> {
        Ok(self.memes.clone())
    }

    async fn get_by_id(&self, id: &MemeId) -> Result<WireMeme, SourceError> {
        self.memes
            .iter()
            .find(|meme| &meme.id == id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.clone()))
    }

    fn image_url(&self, _id: &MemeId) -> String {
        crate::models::PLACEHOLDER_IMAGE.to_string()
    }
}
