use crate::errors::SourceError;
use crate::models::{MemeId, WireMeme};
use async_trait::async_trait;

/// Read-only access to the remote meme collection.
#[async_trait]
pub trait MemeRepository: Send + Sync + 'static { // Send+Sync+'static required for Arc<dyn>
    /// Lists every meme, in the order the source returns them.
    async fn list_all(&self) -> Result<Vec<WireMeme>, SourceError>;

    /// Retrieves one meme by id.
    /// Returns `SourceError::NotFound` if the source has no such meme.
    async fn get_by_id(&self, id: &MemeId) -> Result<WireMeme, SourceError>;

    /// URL the image for `id` is served from. Never fetched by this crate.
    fn image_url(&self, id: &MemeId) -> String;
}
