use crate::vote::{self, UserVote, VoteDirection};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

pub const UNTITLED: &str = "Untitled meme";
pub const GENERATOR_AUTHOR: &str = "meme_generator";
pub const LOCAL_AUTHOR: &str = "currentUser";
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=300&width=500";
pub const PLACEHOLDER_AVATAR: &str = "/placeholder.svg?height=40&width=40";

const LOCAL_ID_PREFIX: &str = "local-";

/// Meme identifier. Server ids are kept verbatim; locally created memes get
/// `local-<uuid>` so they never collide with a server id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct MemeId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for MemeId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => MemeId(s),
            RawId::Number(n) => MemeId(n.to_string()),
        }
    }
}

impl From<MemeId> for String {
    fn from(id: MemeId) -> Self {
        id.0
    }
}

impl From<&str> for MemeId {
    fn from(s: &str) -> Self {
        MemeId(s.to_string())
    }
}

impl From<String> for MemeId {
    fn from(s: String) -> Self {
        MemeId(s)
    }
}

impl fmt::Display for MemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl MemeId {
    pub fn local() -> Self {
        MemeId(format!("{}{}", LOCAL_ID_PREFIX, Uuid::new_v4()))
    }

    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_ID_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Meme as served by the remote API.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WireMeme {
    #[serde(rename = "_id")]
    pub id: MemeId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub captions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvotes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downvotes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: u64,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: i64,
}

// An explicit `null` decodes like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `GET /meme/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MemeEnvelope {
    pub meme: WireMeme,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemeRecord {
    pub id: MemeId,
    pub title: String,
    pub image_url: String,
    pub upvotes: u64,
    pub downvotes: u64,
    pub comment_count: u64,
    pub author: String,
    pub user_vote: UserVote,
    pub trend: String,
    pub timestamp: i64,
}

impl MemeRecord {
    pub fn from_wire(wire: WireMeme, image_url: String) -> Self {
        let title = wire
            .captions
            .into_iter()
            .next()
            .filter(|caption| !caption.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        MemeRecord {
            id: wire.id,
            title,
            image_url,
            upvotes: wire.upvotes,
            downvotes: wire.downvotes,
            comment_count: wire.comments,
            author: wire
                .author
                .filter(|author| !author.trim().is_empty())
                .unwrap_or_else(|| GENERATOR_AUTHOR.to_string()),
            user_vote: UserVote::None,
            trend: wire.topic.unwrap_or_default(),
            timestamp: wire.timestamp,
        }
    }

    /// A fresh meme created in this session. Never leaves the process.
    pub fn local(title: &str, image_url: &str, timestamp: i64) -> Self {
        let image_url = if image_url.trim().is_empty() { PLACEHOLDER_IMAGE } else { image_url };
        MemeRecord {
            id: MemeId::local(),
            title: title.to_string(),
            image_url: image_url.to_string(),
            upvotes: 0,
            downvotes: 0,
            comment_count: 0,
            author: LOCAL_AUTHOR.to_string(),
            user_vote: UserVote::None,
            trend: String::new(),
            timestamp,
        }
    }

    pub fn apply_vote(&mut self, direction: VoteDirection) {
        let t = vote::transition(self.user_vote, direction);
        self.upvotes = self.upvotes.saturating_add_signed(t.upvotes_delta);
        self.downvotes = self.downvotes.saturating_add_signed(t.downvotes_delta);
        self.user_vote = t.next;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: u64,
    pub author: String,
    pub avatar_url: String,
    pub content: String,
    pub timestamp: String,
}

/// Comments every detail view starts with.
pub fn starter_comments() -> Vec<CommentRecord> {
    [
        ("memefan42", "This is hilarious! 😂", "2 hours ago"),
        ("codingwizard", "I feel this on a spiritual level.", "1 hour ago"),
        ("designguru", "So accurate it hurts!", "30 minutes ago"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (author, content, timestamp))| CommentRecord {
        id: i as u64 + 1,
        author: author.to_string(),
        avatar_url: PLACEHOLDER_AVATAR.to_string(),
        content: content.to_string(),
        timestamp: timestamp.to_string(),
    })
    .collect()
}

/// Placeholder memes used when running offline.
pub fn sample_memes() -> Vec<WireMeme> {
    [
        ("1", "When the code finally works", "coder123", 124, 8, 23),
        ("2", "Frontend vs Backend", "devmemer", 89, 12, 15),
        ("3", "CSS be like", "cssmaster", 210, 5, 42),
        ("4", "When you find a bug in production", "bugfinder", 156, 3, 31),
    ]
    .into_iter()
    .map(|(id, caption, author, upvotes, downvotes, comments)| WireMeme {
        id: MemeId::from(id),
        captions: vec![caption.to_string()],
        upvotes,
        downvotes,
        comments,
        topic: None,
        author: Some(author.to_string()),
        timestamp: 0,
    })
    .collect()
}
