//! Display-ready rows handed to the templates. Everything here is already
//! formatted, so templates only print fields.

use chrono::{DateTime, Utc};
use sk_core::models::{Answer, Comment, Notification, Question, User};
use sk_core::password::PasswordReport;
use sk_core::session::Layout;
use sk_core::sorting::SortKey;
use sk_core::toast::{Toast, ToastVariant};

use crate::humanize::{ago, plural};

/// Listing excerpts are cut at this many characters.
const EXCERPT_CHARS: usize = 200;

pub struct ToastItem {
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

impl From<Toast> for ToastItem {
    fn from(toast: Toast) -> Self {
        Self {
            title: toast.title,
            description: toast.description,
            destructive: toast.variant == ToastVariant::Destructive,
        }
    }
}

pub fn toast_items(toasts: Vec<Toast>) -> Vec<ToastItem> {
    toasts.into_iter().map(ToastItem::from).collect()
}

pub struct NotificationItem {
    pub id: String,
    pub icon: &'static str,
    pub tone: &'static str,
    pub title: String,
    pub content: String,
    pub author: String,
    pub ago: String,
    pub is_read: bool,
}

impl NotificationItem {
    fn new(n: &Notification, now: DateTime<Utc>) -> Self {
        Self {
            id: n.id.clone(),
            icon: n.kind.icon(),
            tone: n.kind.tone(),
            title: n.title.clone(),
            content: n.content.clone(),
            author: n.author.clone(),
            ago: ago(n.timestamp, now),
            is_read: n.is_read,
        }
    }
}

pub struct UserMenu {
    pub username: String,
    pub email: String,
    pub reputation: u32,
    pub questions_asked: u32,
    pub answers_given: u32,
}

impl From<&User> for UserMenu {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            reputation: user.reputation,
            questions_asked: user.questions_asked,
            answers_given: user.answers_given,
        }
    }
}

/// Header of the main pages: notification dropdown and profile menu.
pub struct Header {
    pub user: UserMenu,
    pub notifications: Vec<NotificationItem>,
    pub unread: usize,
    pub show_badge: bool,
    /// Where read/logout actions send the viewer back to.
    pub current_path: String,
}

impl Header {
    pub fn new(layout: &Layout, current_path: &str, now: DateTime<Utc>) -> Self {
        let center = &layout.notifications;
        Self {
            user: UserMenu::from(&layout.user),
            notifications: center.items().iter().map(|n| NotificationItem::new(n, now)).collect(),
            unread: center.unread_count(),
            show_badge: center.show_badge(),
            current_path: current_path.to_string(),
        }
    }
}

pub struct SortTab {
    pub key: &'static str,
    pub label: &'static str,
    pub active: bool,
}

impl SortTab {
    pub fn row(offered: &[SortKey], active: SortKey) -> Vec<SortTab> {
        offered
            .iter()
            .map(|key| SortTab {
                key: key.as_str(),
                label: match key {
                    SortKey::Newest => "Newest",
                    SortKey::Trending => "Trending",
                    SortKey::Votes => "Most Voted",
                    SortKey::Views => "Most Viewed",
                },
                active: *key == active,
            })
            .collect()
    }
}

pub struct QuestionCard {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub votes: i64,
    pub answers: u32,
    pub has_answers: bool,
    pub views: u32,
    pub asked: String,
}

impl QuestionCard {
    pub fn new(q: &Question, now: DateTime<Utc>) -> Self {
        Self {
            id: q.id.clone(),
            title: q.title.clone(),
            excerpt: excerpt(&q.content),
            content: q.content.clone(),
            author: q.author.clone(),
            tags: q.tags.clone(),
            votes: q.votes,
            answers: q.answer_count,
            has_answers: q.answer_count > 0,
            views: q.view_count,
            asked: ago(q.created_at, now),
        }
    }
}

fn excerpt(content: &str) -> String {
    match content.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}…", content[..cut].trim_end()),
        None => content.to_string(),
    }
}

pub struct CommentItem {
    pub content: String,
    pub author: String,
    pub ago: String,
}

impl CommentItem {
    fn new(c: &Comment, now: DateTime<Utc>) -> Self {
        Self {
            content: c.content.clone(),
            author: c.author.clone(),
            ago: ago(c.created_at, now),
        }
    }
}

pub struct AnswerCard {
    pub id: String,
    pub content: String,
    pub author: String,
    pub reputation: u32,
    pub votes: i64,
    pub accepted: bool,
    pub pinned: bool,
    pub answered: String,
    pub comments: Vec<CommentItem>,
    pub comments_open: bool,
    pub comment_label: String,
}

impl AnswerCard {
    pub fn new(a: &Answer, comments_open: bool, now: DateTime<Utc>) -> Self {
        let count = a.comments.len() as i64;
        Self {
            id: a.id.clone(),
            content: a.content.clone(),
            author: a.author.clone(),
            reputation: a.author_reputation,
            votes: a.votes,
            accepted: a.is_accepted,
            pinned: a.is_pinned,
            answered: ago(a.created_at, now),
            comments: a.comments.iter().map(|c| CommentItem::new(c, now)).collect(),
            comments_open,
            comment_label: format!("{count} comment{}", plural(count)),
        }
    }
}

pub struct PopularTag {
    pub name: &'static str,
    pub disabled: bool,
}

pub struct PasswordCheck {
    pub label: &'static str,
    pub met: bool,
}

pub fn password_checks(report: &PasswordReport) -> Vec<PasswordCheck> {
    report
        .checks()
        .iter()
        .map(|(req, met)| PasswordCheck { label: req.label(), met: *met })
        .collect()
}
