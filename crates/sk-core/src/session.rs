//! # Session
//!
//! One viewer's state: the page they are on, the header layout shared by the
//! main pages, and toasts waiting to be shown.
//!
//! Entering a different page replaces the page container, discarding its
//! mutations. The layout survives moves between pages that render it and is
//! dropped when the viewer enters a page that does not (login, sign-up,
//! not-found).

use crate::error::{AppError, Result};
use crate::models::User;
use crate::toast::{Toast, ToastQueue};
use crate::traits::{ForumSource, Toaster};
use crate::views::{
    AskQuestionView, HomeView, LoginView, NotificationCenter, QuestionDetailView, SignUpView, UnansweredView,
};

/// Identity of a page, as addressed by its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Ask,
    QuestionDetail(String),
    Unanswered,
    Login,
    SignUp,
    NotFound,
}

impl View {
    /// Whether the page is rendered inside the header layout.
    pub fn uses_layout(&self) -> bool {
        matches!(self, Self::Home | Self::Ask | Self::QuestionDetail(_) | Self::Unanswered)
    }
}

#[derive(Debug)]
pub enum Page {
    Home(HomeView),
    Ask(AskQuestionView),
    QuestionDetail(QuestionDetailView),
    Unanswered(UnansweredView),
    Login(LoginView),
    SignUp(SignUpView),
    NotFound,
}

impl Page {
    pub fn view(&self) -> View {
        match self {
            Self::Home(_) => View::Home,
            Self::Ask(_) => View::Ask,
            Self::QuestionDetail(detail) => View::QuestionDetail(detail.question().id.clone()),
            Self::Unanswered(_) => View::Unanswered,
            Self::Login(_) => View::Login,
            Self::SignUp(_) => View::SignUp,
            Self::NotFound => View::NotFound,
        }
    }
}

/// Header state: the signed-in user and their notifications.
#[derive(Debug, Clone)]
pub struct Layout {
    pub user: User,
    pub notifications: NotificationCenter,
}

impl Layout {
    pub fn logout(&self, toasts: &mut impl Toaster) {
        toasts.success("Logged out successfully", "You have been signed out of your account.");
    }
}

#[derive(Debug, Default)]
pub struct Session {
    page: Option<Page>,
    layout: Option<Layout>,
    toasts: ToastQueue,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn is_on(&self, view: &View) -> bool {
        self.page.as_ref().is_some_and(|page| page.view() == *view)
    }

    /// On `view` and able to render it.
    pub fn is_ready(&self, view: &View) -> bool {
        self.is_on(view) && !self.needs_layout(view)
    }

    /// Whether entering `view` needs a layout loaded first.
    pub fn needs_layout(&self, view: &View) -> bool {
        view.uses_layout() && self.layout.is_none()
    }

    /// Replaces the current page. `layout` is only used when the page renders
    /// the layout and none is held yet.
    pub fn navigate(&mut self, page: Page, layout: Option<Layout>) {
        if page.view().uses_layout() {
            if self.layout.is_none() {
                self.layout = layout;
            }
        } else {
            self.layout = None;
        }
        log::debug!("session entered {:?}", page.view());
        self.page = Some(page);
    }

    /// Settles on a page loaded while no lock was held. If the session already
    /// reached the same view in the meantime, that page is kept along with its
    /// mutations. The page is handed back, with nothing changed, when it renders
    /// the layout and neither the session nor `layout` has one.
    pub fn arrive(&mut self, page: Page, layout: Option<Layout>) -> Option<Page> {
        let view = page.view();
        if self.needs_layout(&view) && layout.is_none() {
            return Some(page);
        }
        if self.is_on(&view) {
            if view.uses_layout() && self.layout.is_none() {
                self.layout = layout;
            }
            return None;
        }
        self.navigate(page, layout);
        None
    }

    pub fn toasts(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    /// Runs `f` against the current page and the toast queue.
    pub fn with_page<R>(&mut self, f: impl FnOnce(&mut Page, &mut ToastQueue) -> R) -> Option<R> {
        let page = self.page.as_mut()?;
        Some(f(page, &mut self.toasts))
    }

    /// Runs `f` against the layout and the toast queue, if a layout is held.
    pub fn with_layout<R>(&mut self, f: impl FnOnce(&mut Layout, &mut ToastQueue) -> R) -> Option<R> {
        let layout = self.layout.as_mut()?;
        Some(f(layout, &mut self.toasts))
    }
}

/// Builds a fresh container for `view` from the data source.
pub async fn load_page(source: &dyn ForumSource, view: &View) -> Result<Page> {
    let page = match view {
        View::Home => Page::Home(HomeView::new(source.recent_questions().await?)),
        View::Unanswered => Page::Unanswered(UnansweredView::new(source.unanswered_questions().await?)),
        View::QuestionDetail(id) => {
            let thread = source
                .get_thread(id)
                .await?
                .ok_or_else(|| AppError::NotFound("Question".into(), id.clone()))?;
            Page::QuestionDetail(QuestionDetailView::new(thread, source.current_user().await?))
        }
        View::Ask => Page::Ask(AskQuestionView::new()),
        View::Login => Page::Login(LoginView::new()),
        View::SignUp => Page::SignUp(SignUpView::new()),
        View::NotFound => Page::NotFound,
    };
    Ok(page)
}

pub async fn load_layout(source: &dyn ForumSource) -> Result<Layout> {
    Ok(Layout {
        user: source.current_user().await?,
        notifications: NotificationCenter::new(source.notifications().await?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Notification, Question, QuestionThread};
    use async_trait::async_trait;

    struct EmptySource;

    #[async_trait]
    impl ForumSource for EmptySource {
        async fn recent_questions(&self) -> anyhow::Result<Vec<Question>> {
            Ok(vec![])
        }
        async fn unanswered_questions(&self) -> anyhow::Result<Vec<Question>> {
            Ok(vec![])
        }
        async fn get_thread(&self, _id: &str) -> anyhow::Result<Option<QuestionThread>> {
            Ok(None)
        }
        async fn notifications(&self) -> anyhow::Result<Vec<Notification>> {
            anyhow::bail!("notification service unavailable")
        }
        async fn current_user(&self) -> anyhow::Result<User> {
            Ok(layout().user)
        }
    }

    fn layout() -> Layout {
        Layout {
            user: User {
                username: "devuser123".into(),
                email: "dev@example.com".into(),
                reputation: 1250,
                questions_asked: 12,
                answers_given: 34,
            },
            notifications: NotificationCenter::new(Vec::<Notification>::new()),
        }
    }

    #[test]
    fn layout_survives_main_pages_only() {
        let mut session = Session::new();
        assert!(session.needs_layout(&View::Home));

        session.navigate(Page::Home(HomeView::new(vec![])), Some(layout()));
        assert!(session.layout().is_some());
        assert!(!session.needs_layout(&View::Ask));

        session.navigate(Page::Ask(AskQuestionView::new()), None);
        assert!(session.layout().is_some());

        session.navigate(Page::Login(LoginView::new()), None);
        assert!(session.layout().is_none());
        assert!(session.needs_layout(&View::Unanswered));
    }

    #[test]
    fn is_on_tracks_current_page() {
        let mut session = Session::new();
        assert!(!session.is_on(&View::Home));
        session.navigate(Page::NotFound, None);
        assert!(session.is_on(&View::NotFound));
        assert!(!View::NotFound.uses_layout());
    }

    #[test]
    fn logout_raises_toast() {
        let mut session = Session::new();
        session.navigate(Page::Home(HomeView::new(vec![])), Some(layout()));
        session.with_layout(|layout, toasts| layout.logout(toasts));
        assert_eq!(session.take_toasts()[0].title, "Logged out successfully");
    }

    #[test]
    fn home_without_layout_is_not_ready() {
        let mut session = Session::new();
        session.page = Some(Page::Home(HomeView::new(vec![])));
        assert!(session.is_on(&View::Home));
        assert!(!session.is_ready(&View::Home));
    }

    #[test]
    fn arriving_needs_a_layout_somewhere() {
        let mut session = Session::new();
        session.navigate(Page::Unanswered(UnansweredView::new(vec![])), Some(layout()));
        session.navigate(Page::Login(LoginView::new()), None);

        let page = session.arrive(Page::Home(HomeView::new(vec![])), None).unwrap();
        assert!(session.is_on(&View::Login));

        assert!(session.arrive(page, Some(layout())).is_none());
        assert!(session.is_ready(&View::Home));
    }

    #[test]
    fn arriving_keeps_a_page_reached_meanwhile() {
        let mut session = Session::new();
        session.navigate(Page::Ask(AskQuestionView::new()), Some(layout()));
        session.with_page(|page, _| {
            if let Page::Ask(view) = page {
                view.update(
                    crate::forms::QuestionDraft {
                        title: "Kept".into(),
                        content: String::new(),
                    },
                    String::new(),
                );
            }
        });

        assert!(session.arrive(Page::Ask(AskQuestionView::new()), None).is_none());
        assert!(matches!(session.page(), Some(Page::Ask(view)) if view.draft().title == "Kept"));
    }

    #[tokio::test]
    async fn unknown_question_is_not_found() {
        let err = load_page(&EmptySource, &View::QuestionDetail("42".into())).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(kind, id) if kind == "Question" && id == "42"));
    }

    #[tokio::test]
    async fn source_failures_become_internal_errors() {
        assert!(matches!(load_page(&EmptySource, &View::Home).await, Ok(Page::Home(_))));
        let err = load_layout(&EmptySource).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(msg) if msg.contains("unavailable")));
    }
}
