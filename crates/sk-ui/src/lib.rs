//! # sk-ui
//!
//! Askama templates for every StackIt page and the constructors that turn
//! page containers into them.

pub mod cards;
pub mod humanize;

use askama::Template;
use chrono::{DateTime, Utc};
use sk_core::sorting::SortKey;
use sk_core::tags::{MAX_TAGS, POPULAR_TAGS};
use sk_core::views::{AskQuestionView, HomeView, LoginView, QuestionDetailView, SignUpView, UnansweredView};

use cards::{
    password_checks, AnswerCard, Header, PasswordCheck, PopularTag, QuestionCard, SortTab, ToastItem,
};
use humanize::plural;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub header: Header,
    pub toasts: Vec<ToastItem>,
    pub tabs: Vec<SortTab>,
    pub questions: Vec<QuestionCard>,
    pub total: usize,
}

impl HomeTemplate {
    pub fn new(view: &HomeView, sort: SortKey, header: Header, toasts: Vec<ToastItem>, now: DateTime<Utc>) -> Self {
        let sort = sort.within(&HomeView::SORTS);
        Self {
            title: "Top Questions - StackIt".into(),
            header,
            toasts,
            tabs: SortTab::row(&HomeView::SORTS, sort),
            questions: view.sorted(sort).into_iter().map(|q| QuestionCard::new(q, now)).collect(),
            total: view.count(),
        }
    }
}

#[derive(Template)]
#[template(path = "unanswered.html")]
pub struct UnansweredTemplate {
    pub title: String,
    pub header: Header,
    pub toasts: Vec<ToastItem>,
    pub tabs: Vec<SortTab>,
    pub questions: Vec<QuestionCard>,
    pub total: usize,
    pub total_votes: i64,
    pub total_views: u64,
}

impl UnansweredTemplate {
    pub fn new(
        view: &UnansweredView,
        sort: SortKey,
        header: Header,
        toasts: Vec<ToastItem>,
        now: DateTime<Utc>,
    ) -> Self {
        let sort = sort.within(&UnansweredView::SORTS);
        Self {
            title: "Unanswered Questions - StackIt".into(),
            header,
            toasts,
            tabs: SortTab::row(&UnansweredView::SORTS, sort),
            questions: view.sorted(sort).into_iter().map(|q| QuestionCard::new(q, now)).collect(),
            total: view.count(),
            total_votes: view.total_votes(),
            total_views: view.total_views(),
        }
    }
}

#[derive(Template)]
#[template(path = "question.html")]
pub struct QuestionTemplate {
    pub title: String,
    pub header: Header,
    pub toasts: Vec<ToastItem>,
    pub question: QuestionCard,
    pub author_reputation: u32,
    pub is_author: bool,
    pub answers: Vec<AnswerCard>,
    pub answer_heading: String,
}

impl QuestionTemplate {
    pub fn new(view: &QuestionDetailView, header: Header, toasts: Vec<ToastItem>, now: DateTime<Utc>) -> Self {
        let question = QuestionCard::new(view.question(), now);
        let answers: Vec<AnswerCard> = view
            .answers_for_display()
            .into_iter()
            .map(|a| AnswerCard::new(a, view.comments_open(&a.id), now))
            .collect();
        let count = answers.len() as i64;
        Self {
            title: format!("{} - StackIt", question.title),
            header,
            toasts,
            author_reputation: view.thread().author_reputation,
            is_author: view.is_question_author(),
            answer_heading: format!("{count} Answer{}", plural(count)),
            question,
            answers,
        }
    }
}

#[derive(Template)]
#[template(path = "ask.html")]
pub struct AskTemplate {
    pub title: String,
    pub header: Header,
    pub toasts: Vec<ToastItem>,
    pub draft_title: String,
    pub draft_content: String,
    pub tag_input: String,
    pub tags: Vec<String>,
    pub tag_count: usize,
    pub max_tags: usize,
    pub tags_full: bool,
    pub popular: Vec<PopularTag>,
}

impl AskTemplate {
    pub fn new(view: &AskQuestionView, header: Header, toasts: Vec<ToastItem>) -> Self {
        let tags = view.tags();
        Self {
            title: "Ask a Question - StackIt".into(),
            header,
            toasts,
            draft_title: view.draft().title.clone(),
            draft_content: view.draft().content.clone(),
            tag_input: view.tag_input().to_string(),
            tags: tags.as_slice().to_vec(),
            tag_count: tags.len(),
            max_tags: MAX_TAGS,
            tags_full: tags.is_full(),
            popular: POPULAR_TAGS
                .iter()
                .map(|&name| PopularTag {
                    name,
                    disabled: tags.contains(name) || tags.is_full(),
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub title: String,
    pub toasts: Vec<ToastItem>,
    pub email: String,
}

impl LoginTemplate {
    pub fn new(view: &LoginView, toasts: Vec<ToastItem>) -> Self {
        Self {
            title: "Sign in - StackIt".into(),
            toasts,
            email: view.email().to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignUpTemplate {
    pub title: String,
    pub toasts: Vec<ToastItem>,
    pub username: String,
    pub email: String,
    pub accept_terms: bool,
    pub checks: Vec<PasswordCheck>,
    pub show_match: bool,
    pub passwords_match: bool,
}

impl SignUpTemplate {
    pub fn new(view: &SignUpView, toasts: Vec<ToastItem>) -> Self {
        Self {
            title: "Sign up - StackIt".into(),
            toasts,
            username: view.username().to_string(),
            email: view.email().to_string(),
            accept_terms: view.accept_terms(),
            checks: password_checks(view.password_report()),
            show_match: view.passwords_match().is_some(),
            passwords_match: view.passwords_match().unwrap_or(false),
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub title: String,
    pub toasts: Vec<ToastItem>,
    /// The path or resource that could not be found.
    pub missing: String,
}

impl NotFoundTemplate {
    pub fn new(missing: &str, toasts: Vec<ToastItem>) -> Self {
        Self {
            title: "Page not found - StackIt".into(),
            toasts,
            missing: missing.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_core::models::{Notification, NotificationKind, Question, User};
    use sk_core::session::Layout;
    use sk_core::views::NotificationCenter;

    fn header(unread: bool) -> Header {
        let layout = Layout {
            user: User {
                username: "devuser123".into(),
                email: "dev@example.com".into(),
                reputation: 1250,
                questions_asked: 12,
                answers_given: 34,
            },
            notifications: NotificationCenter::new(vec![Notification {
                id: "1".into(),
                kind: NotificationKind::Award,
                title: "Your answer was accepted".into(),
                content: "CSS Grid".into(),
                author: "csslearner".into(),
                timestamp: Utc::now(),
                is_read: !unread,
            }]),
        };
        Header::new(&layout, "/", Utc::now())
    }

    fn question(id: &str, votes: i64) -> Question {
        Question {
            id: id.into(),
            title: format!("Question <{id}>"),
            content: "body".into(),
            author: "someone".into(),
            tags: vec!["rust".into()],
            votes,
            answer_count: 0,
            view_count: 10,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn home_renders_trending_order_and_escapes() {
        let view = HomeView::new(vec![question("1", 1), question("2", 9)]);
        let html = HomeTemplate::new(&view, SortKey::Trending, header(true), vec![], Utc::now())
            .render()
            .unwrap();
        let first = html.find("/questions/2").unwrap();
        let second = html.find("/questions/1").unwrap();
        assert!(first < second);
        assert!(html.contains("Question &lt;2&gt;"));
        assert!(html.contains("2 questions"));
    }

    #[test]
    fn badge_hidden_without_unread() {
        let view = HomeView::new(vec![]);
        let with = HomeTemplate::new(&view, SortKey::Newest, header(true), vec![], Utc::now())
            .render()
            .unwrap();
        let without = HomeTemplate::new(&view, SortKey::Newest, header(false), vec![], Utc::now())
            .render()
            .unwrap();
        assert!(with.contains("notification-badge"));
        assert!(!without.contains("notification-badge"));
        assert!(!without.contains("Mark all read"));
    }

    #[test]
    fn empty_unanswered_shows_message() {
        let view = UnansweredView::new(vec![]);
        let html = UnansweredTemplate::new(&view, SortKey::Views, header(false), vec![], Utc::now())
            .render()
            .unwrap();
        assert!(html.contains("No unanswered questions!"));
        assert!(!html.contains("Ready to help?"));
    }

    #[test]
    fn sign_up_checklist_renders_every_requirement() {
        let html = SignUpTemplate::new(&SignUpView::new(), vec![]).render().unwrap();
        for label in [
            "At least 8 characters",
            "Contains uppercase letter",
            "Contains lowercase letter",
            "Contains number",
            "Contains special character",
        ] {
            assert!(html.contains(label), "missing {label}");
        }
        assert!(!html.contains("Passwords match"));
    }
}
