use super::{LoadState, PendingFetch};
use crate::countdown::{Countdown, CountdownTimer};
use crate::domain::MemeRepository;
use crate::errors::SourceError;
use crate::models::{MemeId, MemeRecord};
use crate::routes::Route;
use crate::vote::VoteDirection;
use std::sync::Arc;
use std::time::Duration;

/// The meme feed: every meme the source returned plus any created locally
/// once it loaded.
#[derive(Debug)]
pub struct ListingView {
    memes: Vec<MemeRecord>,
    state: LoadState,
    pending: Option<PendingFetch<Vec<MemeRecord>>>,
    countdown: Option<CountdownTimer>,
}

impl Default for ListingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingView {
    /// An empty view waiting for data, with no fetch and no timer attached.
    pub fn new() -> Self {
        Self { memes: Vec::new(), state: LoadState::Loading, pending: None, countdown: None }
    }

    /// Starts the list fetch and the countdown. Needs a tokio runtime.
    pub fn mount(repo: Arc<dyn MemeRepository>, countdown: Countdown, tick: Duration) -> Self {
        let pending = PendingFetch::spawn("listing", async move {
            let memes = repo.list_all().await?;
            let records: Vec<MemeRecord> = memes
                .into_iter()
                .map(|wire| {
                    let image_url = repo.image_url(&wire.id);
                    MemeRecord::from_wire(wire, image_url)
                })
                .collect();
            Ok::<_, SourceError>(records)
        });

        Self {
            pending: Some(pending),
            countdown: Some(CountdownTimer::start(countdown, tick)),
            ..Self::new()
        }
    }

    /// Waits for the mount fetch, if one is outstanding, and applies it.
    pub async fn settle(&mut self) {
        if let Some(pending) = self.pending.take() {
            let result = pending.wait().await;
            self.apply_loaded(result);
        }
    }

    /// Applies the mount fetch if it already finished. Returns `true` once settled.
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

    pub fn apply_loaded(&mut self, result: Result<Vec<MemeRecord>, SourceError>) {
        match result {
            Ok(memes) => {
                tracing::info!("Listing loaded with {} memes", memes.len());
                self.memes = memes;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Listing fetch failed");
                self.state = LoadState::NotFound;
            }
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn memes(&self) -> &[MemeRecord] {
        &self.memes
    }

    pub fn get(&self, id: &MemeId) -> Option<&MemeRecord> {
        self.memes.iter().find(|meme| &meme.id == id)
    }

    /// Id of the meme at 1-based `position` in display order.
    pub fn id_at(&self, position: usize) -> Option<&MemeId> {
        position.checked_sub(1).and_then(|i| self.memes.get(i)).map(|meme| &meme.id)
    }

    pub fn countdown(&self) -> Option<Countdown> {
        self.countdown.as_ref().map(CountdownTimer::current)
    }

    /// Applies a vote to the meme with `id`. Unknown ids leave the feed untouched.
    pub fn vote(&mut self, id: &MemeId, direction: VoteDirection) -> bool {
        match self.memes.iter_mut().find(|meme| &meme.id == id) {
            Some(meme) => {
                meme.apply_vote(direction);
                tracing::debug!(
                    meme_id = %id,
                    ?direction,
                    vote = ?meme.user_vote,
                    "Listing vote applied"
                );
                true
            }
            None => {
                tracing::debug!(meme_id = %id, "Vote for unknown meme ignored");
                false
            }
        }
    }

    /// Puts a new local meme at the top of the feed. Ignored until the feed is
    /// `Ready`, and for blank titles.
    pub fn create(&mut self, title: &str, image_url: &str) -> Option<&MemeRecord> {
        if self.state != LoadState::Ready {
            tracing::debug!(state = ?self.state, "Create before the feed is ready ignored");
            return None;
        }
        if title.trim().is_empty() {
            tracing::debug!("Create with blank title ignored");
            return None;
        }
        let meme = MemeRecord::local(title, image_url, chrono::Utc::now().timestamp_millis());
        tracing::info!(meme_id = %meme.id, "Local meme created");
        self.memes.insert(0, meme);
        self.memes.first()
    }

    pub fn navigate(&self, id: &MemeId) -> Option<Route> {
        self.get(id).map(|meme| Route::Detail(meme.id.clone()))
    }
}
