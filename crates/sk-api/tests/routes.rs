use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use async_trait::async_trait;
use sk_api::handlers::not_found;
use sk_api::state::{SessionLimits, SESSION_COOKIE};
use sk_api::{configure_routes, AppState};
use sk_clipboard_memory::MemoryClipboard;
use sk_core::models::{Notification, Question, QuestionThread, User};
use sk_core::traits::ForumSource;
use sk_fixtures::FixtureSource;
use uuid::Uuid;

/// The demo data seen by someone who did not write any of it.
struct Visitor(FixtureSource);

#[async_trait]
impl ForumSource for Visitor {
    async fn recent_questions(&self) -> anyhow::Result<Vec<Question>> {
        self.0.recent_questions().await
    }

    async fn unanswered_questions(&self) -> anyhow::Result<Vec<Question>> {
        self.0.unanswered_questions().await
    }

    async fn get_thread(&self, id: &str) -> anyhow::Result<Option<QuestionThread>> {
        self.0.get_thread(id).await
    }

    async fn notifications(&self) -> anyhow::Result<Vec<Notification>> {
        self.0.notifications().await
    }

    async fn current_user(&self) -> anyhow::Result<User> {
        Ok(User {
            username: "visitor".into(),
            email: "visitor@example.com".into(),
            reputation: 1,
            questions_asked: 0,
            answers_given: 0,
        })
    }
}

fn state(source: Box<dyn ForumSource>) -> web::Data<AppState> {
    web::Data::new(AppState::new(
        source,
        Arc::new(MemoryClipboard::new()),
        "http://stackit.test",
    ))
}

fn session() -> Cookie<'static> {
    Cookie::new(SESSION_COOKIE, Uuid::new_v4().to_string())
}

fn get(sid: &Cookie<'static>, uri: &str) -> test::TestRequest {
    test::TestRequest::get().uri(uri).cookie(sid.clone())
}

fn post(sid: &Cookie<'static>, uri: &str) -> test::TestRequest {
    test::TestRequest::post().uri(uri).cookie(sid.clone())
}

macro_rules! app {
    ($data:expr) => {
        test::init_service(
            App::new()
                .app_data($data)
                .configure(configure_routes)
                .default_service(web::to(not_found)),
        )
        .await
    };
}

macro_rules! page {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }};
}

macro_rules! submit {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        resp.headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }};
}

#[actix_web::test]
async fn main_pages_render() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let sid = session();

    for (uri, marker) in [
        ("/", "Welcome to StackIt"),
        ("/?sort=trending", "CSS Grid vs Flexbox"),
        ("/unanswered?sort=views", "Unanswered Questions"),
        ("/ask", "Ask a Question"),
        ("/questions/1", "2 Answers"),
        ("/login", "Welcome Back"),
        ("/signup", "Join StackIt"),
    ] {
        let (status, html) = page!(app, get(&sid, uri));
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(html.contains(marker), "{uri} is missing {marker}");
    }
}

#[actix_web::test]
async fn fresh_visitor_gets_a_session_cookie() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let cookie = resp.response().cookies().find(|c| c.name() == SESSION_COOKIE).unwrap();
    assert!(Uuid::parse_str(cookie.value()).is_ok());
}

#[actix_web::test]
async fn votes_last_until_the_viewer_leaves() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let sid = session();

    let (_, html) = page!(app, get(&sid, "/questions/1"));
    assert!(html.contains(r#"<span class="score">15</span>"#));

    let location = submit!(app, post(&sid, "/questions/1/vote/up"));
    assert_eq!(location, "/questions/1");
    let (_, html) = page!(app, get(&sid, "/questions/1"));
    assert!(html.contains(r#"<span class="score">16</span>"#));
    assert!(html.contains("Your upvote has been recorded."));

    // Toasts are shown once.
    let (_, html) = page!(app, get(&sid, "/questions/1"));
    assert!(!html.contains("Vote recorded"));

    page!(app, get(&sid, "/"));
    let (_, html) = page!(app, get(&sid, "/questions/1"));
    assert!(html.contains(r#"<span class="score">15</span>"#));
}

#[actix_web::test]
async fn two_upvotes_on_an_answer_add_two() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let sid = session();

    for _ in 0..2 {
        let location = submit!(app, post(&sid, "/questions/1/answers/2/vote/up"));
        assert_eq!(location, "/questions/1#answer-2");
    }
    let (_, html) = page!(app, get(&sid, "/questions/1"));
    assert!(html.contains(r#"<span class="score">5</span>"#));
}

#[actix_web::test]
async fn unknown_question_and_path_are_not_found() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let sid = session();

    let (status, html) = page!(app, get(&sid, "/questions/42"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Oops! Page not found"));

    let (status, html) = page!(app, get(&sid, "/no/such/page"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("/no/such/page"));

    let (status, _) = page!(app, post(&sid, "/questions/1/vote/sideways"));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = page!(app, post(&sid, "/questions/1/answers/9/pin"));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unknown_question_keeps_session_and_toasts() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let sid = session();

    submit!(app, post(&sid, "/signup/social/github"));
    let resp = test::call_service(&app, get(&sid, "/questions/42").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let cookie = resp.response().cookies().find(|c| c.name() == SESSION_COOKIE).unwrap();
    assert_eq!(cookie.value(), sid.value());
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("/questions/42"));
    assert!(html.contains("GitHub sign up"));

    // A fresh visitor is handed the cookie of the session that was started.
    let resp = test::call_service(&app, test::TestRequest::get().uri("/questions/42").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.response().cookies().any(|c| c.name() == SESSION_COOKIE));
}

#[actix_web::test]
async fn cookieless_requests_do_not_grow_sessions_past_the_cap() {
    let data = web::Data::new(
        AppState::new(
            Box::new(FixtureSource::new()),
            Arc::new(MemoryClipboard::new()),
            "http://stackit.test",
        )
        .with_session_limits(SessionLimits {
            max_sessions: 16,
            idle: Duration::from_secs(3600),
        }),
    );
    let app = app!(data.clone());

    for _ in 0..200 {
        let resp = test::call_service(&app, test::TestRequest::get().uri("/no-such-page").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
    assert_eq!(data.sessions.len(), 16);
}

#[actix_web::test]
async fn author_accepts_one_answer_at_a_time() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let sid = session();

    submit!(app, post(&sid, "/questions/1/answers/2/accept"));
    let (_, html) = page!(app, get(&sid, "/questions/1"));
    assert!(html.contains(r#"id="answer-2" class="card accepted""#));
    assert!(!html.contains(r#"id="answer-1" class="card accepted""#));

    submit!(app, post(&sid, "/questions/1/answers/2/pin"));
    let (_, html) = page!(app, get(&sid, "/questions/1"));
    let pinned = html.find(r#"id="answer-2""#).unwrap();
    let other = html.find(r#"id="answer-1""#).unwrap();
    assert!(pinned < other);
    assert!(html.contains("Pinned by question author"));
}

#[actix_web::test]
async fn visitors_cannot_accept_or_pin() {
    let app = app!(state(Box::new(Visitor(FixtureSource::new()))));
    let sid = session();

    let (_, html) = page!(app, get(&sid, "/questions/1"));
    assert!(!html.contains("Mark as accepted"));

    let (status, _) = page!(app, post(&sid, "/questions/1/answers/2/accept"));
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = page!(app, post(&sid, "/questions/1/answers/2/pin"));
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn answers_and_comments_are_added() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let sid = session();

    let location = submit!(
        app,
        post(&sid, "/questions/6/answers").set_form([("content", "Use a custom hook.")])
    );
    assert!(location.starts_with("/questions/6#answer-"));
    let (_, html) = page!(app, get(&sid, "/questions/6"));
    assert!(html.contains("1 Answer<"));
    assert!(html.contains("Use a custom hook."));
    assert!(html.contains("Answer posted!"));

    // Blank answers are ignored.
    submit!(app, post(&sid, "/questions/6/answers").set_form([("content", "  ")]));
    let (_, html) = page!(app, get(&sid, "/questions/6"));
    assert!(html.contains("1 Answer<"));

    submit!(
        app,
        post(&sid, "/questions/1/answers/1/comments").set_form([("content", "Thanks!")])
    );
    let (_, html) = page!(app, get(&sid, "/questions/1"));
    assert!(html.contains("Thanks!"));
    assert!(html.contains("1 comment"));

    submit!(app, post(&sid, "/questions/1/answers/1/comments/toggle"));
    let (_, html) = page!(app, get(&sid, "/questions/1"));
    assert!(!html.contains("Thanks!"));
}

#[actix_web::test]
async fn share_copies_the_answer_link() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let data = web::Data::new(AppState::new(
        Box::new(FixtureSource::new()),
        clipboard.clone(),
        "http://stackit.test",
    ));
    let app = app!(data);
    let sid = session();

    submit!(app, post(&sid, "/questions/1/answers/2/actions/share"));
    let (_, html) = page!(app, get(&sid, "/questions/1"));
    assert!(html.contains("Link copied"));

    // The copy runs detached from the request.
    for _ in 0..10 {
        if clipboard.last_copied().is_some() {
            break;
        }
        actix_web::rt::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(
        clipboard.last_copied().as_deref(),
        Some("http://stackit.test/questions/1#answer-2")
    );
}

#[actix_web::test]
async fn notifications_are_marked_read() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let sid = session();

    let (_, html) = page!(app, get(&sid, "/"));
    assert!(html.contains(r#"<span class="notification-badge">3</span>"#));

    let location = submit!(
        app,
        post(&sid, "/notifications/1/read").set_form([("next", "/unanswered")])
    );
    assert_eq!(location, "/unanswered");
    let (_, html) = page!(app, get(&sid, "/unanswered"));
    assert!(html.contains(r#"<span class="notification-badge">2</span>"#));

    let location = submit!(
        app,
        post(&sid, "/notifications/read-all").set_form([("next", "//elsewhere.test")])
    );
    assert_eq!(location, "/");
    let (_, html) = page!(app, get(&sid, "/"));
    assert!(!html.contains("notification-badge"));
}

#[actix_web::test]
async fn read_state_resets_after_leaving_the_layout() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let sid = session();

    page!(app, get(&sid, "/"));
    submit!(app, post(&sid, "/notifications/read-all").set_form([("next", "/")]));
    page!(app, get(&sid, "/login"));
    let (_, html) = page!(app, get(&sid, "/"));
    assert!(html.contains("notification-badge"));
}

#[actix_web::test]
async fn ask_flow_edits_tags_and_posts() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let sid = session();

    let location = submit!(
        app,
        post(&sid, "/ask").set_form([("title", ""), ("content", ""), ("action", "submit")])
    );
    assert_eq!(location, "/ask");
    let (_, html) = page!(app, get(&sid, "/ask"));
    assert!(html.contains("Please fill in both title and content"));

    submit!(
        app,
        post(&sid, "/ask").set_form([("title", "Lifetimes?"), ("content", "Why?"), ("tag_input", "rust")])
    );
    submit!(
        app,
        post(&sid, "/ask?action=add_popular_tag&tag=css").set_form([("title", "Lifetimes?"), ("content", "Why?")])
    );
    let (_, html) = page!(app, get(&sid, "/ask"));
    assert!(html.contains("(2/5)"));
    assert!(html.contains(r#"value="Lifetimes?""#));

    let location = submit!(
        app,
        post(&sid, "/ask").set_form([("title", "Lifetimes?"), ("content", "Why?"), ("action", "submit")])
    );
    assert_eq!(location, "/");
    let (_, html) = page!(app, get(&sid, "/"));
    assert!(html.contains("Your question has been posted successfully"));
}

#[actix_web::test]
async fn sign_up_reports_password_problems() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let sid = session();

    let location = submit!(
        app,
        post(&sid, "/signup").set_form([
            ("username", "newbie"),
            ("email", "newbie@example.com"),
            ("password", "weak"),
            ("confirm_password", "weaker"),
            ("accept_terms", "on"),
        ])
    );
    assert_eq!(location, "/signup");
    let (_, html) = page!(app, get(&sid, "/signup"));
    assert!(html.contains("Password requirements not met"));
    assert!(html.contains("Passwords do not match"));
    assert!(html.contains(r#"value="newbie""#));

    submit!(app, post(&sid, "/signup/social/github"));
    let (_, html) = page!(app, get(&sid, "/signup"));
    assert!(html.contains("GitHub sign up"));
}

#[actix_web::test]
async fn login_and_logout_raise_toasts() {
    let app = app!(state(Box::new(FixtureSource::new())));
    let sid = session();

    submit!(
        app,
        post(&sid, "/login").set_form([("email", "dev@example.com"), ("password", "secret")])
    );
    let (_, html) = page!(app, get(&sid, "/login"));
    assert!(html.contains("Login successful!"));

    page!(app, get(&sid, "/"));
    let location = submit!(app, post(&sid, "/logout").set_form([("next", "/")]));
    assert_eq!(location, "/");
    let (_, html) = page!(app, get(&sid, "/"));
    assert!(html.contains("Logged out successfully"));
}
