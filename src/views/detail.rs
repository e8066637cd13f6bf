use super::{LoadState, PendingFetch};
use crate::domain::MemeRepository;
use crate::errors::SourceError;
use crate::models::{
    CommentRecord, LOCAL_AUTHOR, MemeId, MemeRecord, PLACEHOLDER_AVATAR, starter_comments,
};
use crate::vote::VoteDirection;
use std::sync::Arc;

/// One meme and the comments posted on it during this session.
#[derive(Debug)]
pub struct DetailView {
    id: MemeId,
    meme: Option<MemeRecord>,
    state: LoadState,
    comments: Vec<CommentRecord>,
    pending: Option<PendingFetch<MemeRecord>>,
}

impl DetailView {
    pub fn new(id: MemeId, comments: Vec<CommentRecord>) -> Self {
        Self { id, meme: None, state: LoadState::Loading, comments, pending: None }
    }

    /// Starts fetching meme `id`. Needs a tokio runtime.
    pub fn mount(repo: Arc<dyn MemeRepository>, id: MemeId) -> Self {
        let fetch_id = id.clone();
        let pending = PendingFetch::spawn("detail", async move {
            let wire = repo.get_by_id(&fetch_id).await?;
            let image_url = repo.image_url(&wire.id);
            Ok::<_, SourceError>(MemeRecord::from_wire(wire, image_url))
        });

        Self { pending: Some(pending), ..Self::new(id, starter_comments()) }
    }

    pub async fn settle(&mut self) {
        if let Some(pending) = self.pending.take() {
            let result = pending.wait().await;
            self.apply_loaded(result);
        }
    }

    pub fn try_settle(&mut self) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return self.state != LoadState::Loading;
        };
        match pending.try_take() {
            Some(result) => {
                self.pending = None;
                self.apply_loaded(result);
                true
            }
            None => false,
        }
    }

    pub fn apply_loaded(&mut self, result: Result<MemeRecord, SourceError>) {
        match result {
            Ok(meme) => {
                tracing::info!(meme_id = %self.id, "Detail loaded");
                self.meme = Some(meme);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                tracing::warn!(meme_id = %self.id, error = %e, "Detail fetch failed");
                self.state = LoadState::NotFound;
            }
        }
    }

    pub fn id(&self) -> &MemeId {
        &self.id
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn meme(&self) -> Option<&MemeRecord> {
        self.meme.as_ref()
    }

    pub fn comments(&self) -> &[CommentRecord] {
        &self.comments
    }

    /// No-op until the meme is loaded.
    pub fn vote(&mut self, direction: VoteDirection) -> bool {
        let Some(meme) = self.meme.as_mut() else {
            tracing::debug!(meme_id = %self.id, "Vote before load ignored");
            return false;
        };
        meme.apply_vote(direction);
        tracing::debug!(
            meme_id = %self.id,
            ?direction,
            vote = ?meme.user_vote,
            "Detail vote applied"
        );
        true
    }

    /// Appends a comment and bumps the meme's comment count.
    /// Blank text, or no meme to comment on, changes nothing.
    pub fn add_comment(&mut self, text: &str) -> Option<&CommentRecord> {
        if text.trim().is_empty() {
            return None;
        }
        let meme = self.meme.as_mut()?;
        meme.comment_count += 1;

        self.comments.push(CommentRecord {
            id: self.comments.len() as u64 + 1,
            author: LOCAL_AUTHOR.to_string(),
            avatar_url: PLACEHOLDER_AVATAR.to_string(),
            content: text.to_string(),
            timestamp: "Just now".to_string(),
        });
        tracing::debug!(meme_id = %self.id, comments = self.comments.len(), "Comment added");
        self.comments.last()
    }
}
