//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::models::{Notification, Question, QuestionThread, User};
use crate::toast::ToastVariant;

/// Read-only access to the forum content shown by the pages.
#[async_trait]
pub trait ForumSource: Send + Sync {
    /// Questions for the home page, newest first.
    async fn recent_questions(&self) -> anyhow::Result<Vec<Question>>;
    /// Questions without answers, newest first.
    async fn unanswered_questions(&self) -> anyhow::Result<Vec<Question>>;
    async fn get_thread(&self, id: &str) -> anyhow::Result<Option<QuestionThread>>;
    async fn notifications(&self) -> anyhow::Result<Vec<Notification>>;
    /// The signed-in viewer.
    async fn current_user(&self) -> anyhow::Result<User>;
}

/// Writes text to the viewer's clipboard. Used only for share links.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

/// Displays a transient notification. Nothing is returned and nothing is kept
/// once it has been shown.
pub trait Toaster {
    fn show(&mut self, title: &str, description: &str, variant: ToastVariant);

    fn success(&mut self, title: &str, description: &str) {
        self.show(title, description, ToastVariant::Default);
    }

    fn destructive(&mut self, title: &str, description: &str) {
        self.show(title, description, ToastVariant::Destructive);
    }
}
