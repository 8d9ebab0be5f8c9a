//! Per-page state containers. Each one owns its page's data exclusively and
//! is dropped when the viewer navigates to another page.

mod ask;
mod auth;
mod detail;
mod listing;
mod notifications;

pub use ask::{AskCommand, AskQuestionView};
pub use auth::{LoginView, SignUpView};
pub use detail::QuestionDetailView;
pub use listing::{HomeView, UnansweredView};
pub use notifications::NotificationCenter;
