//! # Domain Models
//!
//! These structs represent the core entities of StackIt.
//! Seeded records carry short numeric ids ("1", "2", ...); records created
//! at runtime get a UUID v7 so they stay time-ordered next to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates an id for an answer or comment created at runtime.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// A question as it appears in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    /// At most five, no duplicates. See [`crate::tags::TagSet`].
    pub tags: Vec<String>,
    /// Net score; may go negative.
    pub votes: i64,
    pub answer_count: u32,
    pub view_count: u32,
    pub created_at: DateTime<Utc>,
}

/// A question together with everything the detail page shows about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionThread {
    pub question: Question,
    pub author_reputation: u32,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub content: String,
    pub author: String,
    pub author_reputation: u32,
    pub votes: i64,
    pub is_accepted: bool,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<Comment>,
}

impl Answer {
    /// A fresh answer posted by `author`: no votes, no flags, no comments.
    pub fn new(content: String, author: &User) -> Self {
        Self {
            id: new_id(),
            content,
            author: author.username.clone(),
            author_reputation: author.reputation,
            votes: 0,
            is_accepted: false,
            is_pinned: false,
            created_at: Utc::now(),
            comments: Vec::new(),
        }
    }
}

/// Immutable once appended to an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Answer,
    Comment,
    Mention,
    Award,
}

impl NotificationKind {
    /// Icon name used by the header dropdown.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Answer | Self::Comment => "message-square",
            Self::Mention => "user",
            Self::Award => "award",
        }
    }

    /// Colour tone of the icon.
    pub fn tone(self) -> &'static str {
        match self {
            Self::Answer => "primary",
            Self::Comment => "accent",
            Self::Mention => "warning",
            Self::Award => "success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    /// Only ever goes from `false` to `true`.
    pub is_read: bool,
}

/// The signed-in mock user. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub reputation: u32,
    pub questions_asked: u32,
    pub answers_given: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn delta(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// What a vote applies to on the question detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteTarget {
    Question,
    Answer(String),
}

/// Secondary actions offered in an answer's overflow menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerAction {
    Share,
    Bookmark,
    Report,
}

/// Third-party identity providers offered on the auth pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    #[serde(rename = "github")]
    GitHub,
}

impl SocialProvider {
    pub fn name(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::GitHub => "GitHub",
        }
    }
}
