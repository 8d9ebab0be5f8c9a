//! # sk-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the viewer's
//! session. GET handlers enter a page and render it; POST handlers enter the
//! page they act on, apply the action and redirect back (post/redirect/get),
//! so toasts raised by the action show on the next render.

use actix_web::http::header::ContentType;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use askama::Template;
use chrono::Utc;
use serde::Deserialize;
use sk_core::error::AppError;
use sk_core::forms::{LoginForm, QuestionDraft, SignUpForm};
use sk_core::models::{AnswerAction, SocialProvider, VoteDirection, VoteTarget};
use sk_core::session::{Page, View};
use sk_core::sorting::SortKey;
use sk_core::toast::ToastQueue;
use sk_core::views::{AskCommand, AskQuestionView, LoginView, QuestionDetailView, SignUpView};
use sk_ui::cards::{toast_items, Header};
use sk_ui::{
    AskTemplate, HomeTemplate, LoginTemplate, NotFoundTemplate, QuestionTemplate, SignUpTemplate,
    UnansweredTemplate,
};

use crate::error::ApiError;
use crate::state::{AppState, SessionId};

type HandlerResult = Result<HttpResponse, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
}

impl ListQuery {
    /// Unknown or missing keys fall back to newest.
    fn sort(&self) -> SortKey {
        self.sort.as_deref().and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct ContentForm {
    #[serde(default)]
    pub content: String,
}

/// Fields of the ask form. `action` and `tag` come from the pressed button,
/// either as form fields or in the button's `formaction` query.
#[derive(Debug, Default, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tag_input: String,
    pub action: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AskButton {
    pub action: Option<String>,
    pub tag: Option<String>,
}

/// Where header actions return to.
#[derive(Debug, Default, Deserialize)]
pub struct NextForm {
    pub next: Option<String>,
}

impl NextForm {
    /// Only same-site paths are followed.
    fn location(&self) -> &str {
        match self.next.as_deref() {
            Some(next) if next.starts_with('/') && !next.starts_with("//") => next,
            _ => "/",
        }
    }
}

fn page_response(sid: SessionId, html: String) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(sid.cookie())
        .content_type(ContentType::html())
        .body(html)
}

fn redirect(sid: SessionId, location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .cookie(sid.cookie())
        .insert_header(("Location", location))
        .finish()
}

fn current_path(req: &HttpRequest) -> &str {
    req.uri().path_and_query().map_or("/", |pq| pq.as_str())
}

/// Renders whatever page the session is on, draining its pending toasts.
fn render(data: &AppState, sid: SessionId, path: &str, sort: SortKey) -> Result<String, ApiError> {
    let now = Utc::now();
    data.sessions.with(sid.0, |session| {
        let toasts = toast_items(session.take_toasts());
        let header = session.layout().map(|layout| Header::new(layout, path, now));

        let html = match (session.page(), header) {
            (Some(Page::Home(view)), Some(header)) => HomeTemplate::new(view, sort, header, toasts, now).render(),
            (Some(Page::Unanswered(view)), Some(header)) => {
                UnansweredTemplate::new(view, sort, header, toasts, now).render()
            }
            (Some(Page::QuestionDetail(view)), Some(header)) => {
                QuestionTemplate::new(view, header, toasts, now).render()
            }
            (Some(Page::Ask(view)), Some(header)) => AskTemplate::new(view, header, toasts).render(),
            (Some(Page::Login(view)), _) => LoginTemplate::new(view, toasts).render(),
            (Some(Page::SignUp(view)), _) => SignUpTemplate::new(view, toasts).render(),
            (Some(Page::NotFound), _) => NotFoundTemplate::new(path, toasts).render(),
            (page, _) => {
                return Err(ApiError::Internal(format!(
                    "cannot render {:?} without a layout",
                    page.map(Page::view)
                )))
            }
        };
        Ok(html?)
    })
}

/// Puts the session on the not-found page and renders it with a 404.
async fn missing_page(data: &AppState, sid: SessionId, path: &str) -> HandlerResult {
    data.sessions.enter(sid.0, &View::NotFound, data.source.as_ref()).await?;
    let html = render(data, sid, path, SortKey::default())?;
    Ok(HttpResponse::NotFound()
        .cookie(sid.cookie())
        .content_type(ContentType::html())
        .body(html))
}

/// A missing resource becomes the not-found page for `path`. Other failures
/// still carry the session cookie.
async fn settle(data: &AppState, sid: SessionId, path: &str, result: HandlerResult) -> HandlerResult {
    match result {
        Err(ApiError::NotFound(missing)) => {
            log::debug!("{missing} not found at {path}");
            missing_page(data, sid, path).await
        }
        Err(err) => {
            let mut resp = err.error_response();
            resp.add_cookie(&sid.cookie())
                .map_err(|e| ApiError::Internal(format!("session cookie rejected: {e}")))?;
            Ok(resp)
        }
        ok => ok,
    }
}

/// Enters `view` and renders it.
async fn show(data: &AppState, sid: SessionId, req: &HttpRequest, view: View, sort: SortKey) -> HandlerResult {
    let result = async {
        data.sessions.enter(sid.0, &view, data.source.as_ref()).await?;
        let html = render(data, sid, current_path(req), sort)?;
        Ok::<_, ApiError>(page_response(sid, html))
    }
    .await;
    settle(data, sid, req.path(), result).await
}

/// Enters the question page, runs `act` on it and builds the response from
/// its outcome.
async fn on_question<R>(
    data: &AppState,
    sid: SessionId,
    req: &HttpRequest,
    id: &str,
    act: impl FnOnce(&mut QuestionDetailView, &mut ToastQueue) -> sk_core::Result<R>,
    respond: impl FnOnce(R) -> HttpResponse,
) -> HandlerResult {
    let view = View::QuestionDetail(id.to_string());
    let result = async {
        data.sessions.enter(sid.0, &view, data.source.as_ref()).await?;
        let outcome = data.sessions.with_view(sid.0, act)??;
        Ok::<_, ApiError>(respond(outcome))
    }
    .await;
    settle(data, sid, req.path(), result).await
}

// --- Listings ---

pub async fn home(
    data: web::Data<AppState>,
    sid: SessionId,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> HandlerResult {
    show(&data, sid, &req, View::Home, query.sort()).await
}

pub async fn unanswered(
    data: web::Data<AppState>,
    sid: SessionId,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> HandlerResult {
    show(&data, sid, &req, View::Unanswered, query.sort()).await
}

// --- Question detail ---

pub async fn question(data: web::Data<AppState>, sid: SessionId, req: HttpRequest, path: web::Path<String>) -> HandlerResult {
    let view = View::QuestionDetail(path.into_inner());
    show(&data, sid, &req, view, SortKey::default()).await
}

pub async fn vote_question(
    data: web::Data<AppState>,
    sid: SessionId,
    req: HttpRequest,
    path: web::Path<(String, VoteDirection)>,
) -> HandlerResult {
    let (id, direction) = path.into_inner();
    let location = format!("/questions/{id}");
    on_question(
        &data,
        sid,
        &req,
        &id,
        |detail, toasts| detail.vote(&VoteTarget::Question, direction, toasts),
        |_| redirect(sid, &location),
    )
    .await
}

pub async fn post_answer(
    data: web::Data<AppState>,
    sid: SessionId,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<ContentForm>,
) -> HandlerResult {
    let id = path.into_inner();
    on_question(
        &data,
        sid,
        &req,
        &id,
        |detail, toasts| Ok(detail.submit_answer(&form.content, toasts).map(|answer| answer.id.clone()).ok()),
        |posted| match posted {
            Some(answer) => redirect(sid, &format!("/questions/{id}#answer-{answer}")),
            None => redirect(sid, &format!("/questions/{id}")),
        },
    )
    .await
}

pub async fn vote_answer(
    data: web::Data<AppState>,
    sid: SessionId,
    req: HttpRequest,
    path: web::Path<(String, String, VoteDirection)>,
) -> HandlerResult {
    let (id, answer, direction) = path.into_inner();
    let target = VoteTarget::Answer(answer.clone());
    let location = format!("/questions/{id}#answer-{answer}");
    on_question(
        &data,
        sid,
        &req,
        &id,
        |detail, toasts| detail.vote(&target, direction, toasts),
        |_| redirect(sid, &location),
    )
    .await
}

pub async fn accept_answer(
    data: web::Data<AppState>,
    sid: SessionId,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> HandlerResult {
    let (id, answer) = path.into_inner();
    let location = format!("/questions/{id}#answer-{answer}");
    on_question(&data, sid, &req, &id, |detail, _| detail.accept(&answer), |_| redirect(sid, &location)).await
}

pub async fn pin_answer(
    data: web::Data<AppState>,
    sid: SessionId,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> HandlerResult {
    let (id, answer) = path.into_inner();
    let location = format!("/questions/{id}#answer-{answer}");
    on_question(&data, sid, &req, &id, |detail, _| detail.pin(&answer), |_| redirect(sid, &location)).await
}

pub async fn toggle_comments(
    data: web::Data<AppState>,
    sid: SessionId,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> HandlerResult {
    let (id, answer) = path.into_inner();
    let location = format!("/questions/{id}#answer-{answer}");
    on_question(
        &data,
        sid,
        &req,
        &id,
        |detail, _| detail.toggle_comments(&answer),
        |_| redirect(sid, &location),
    )
    .await
}

pub async fn add_comment(
    data: web::Data<AppState>,
    sid: SessionId,
    req: HttpRequest,
    path: web::Path<(String, String)>,
    form: web::Form<ContentForm>,
) -> HandlerResult {
    let (id, answer) = path.into_inner();
    let location = format!("/questions/{id}#answer-{answer}");
    on_question(
        &data,
        sid,
        &req,
        &id,
        |detail, toasts| match detail.add_comment(&answer, &form.content, toasts) {
            // A blank comment is ignored.
            Err(AppError::Validation(_)) => Ok(()),
            other => other,
        },
        |_| redirect(sid, &location),
    )
    .await
}

pub async fn answer_action(
    data: web::Data<AppState>,
    sid: SessionId,
    req: HttpRequest,
    path: web::Path<(String, String, AnswerAction)>,
) -> HandlerResult {
    let (id, answer, action) = path.into_inner();
    let location = format!("/questions/{id}#answer-{answer}");
    let clipboard = data.clipboard.clone();
    on_question(
        &data,
        sid,
        &req,
        &id,
        |detail, toasts| detail.answer_action(&answer, action, &data.base_url, toasts),
        |link| {
            if let Some(link) = link {
                actix_web::rt::spawn(async move {
                    if let Err(err) = clipboard.write_text(&link).await {
                        log::warn!("could not copy {link}: {err:#}");
                    }
                });
            }
            redirect(sid, &location)
        },
    )
    .await
}

// --- Ask ---

pub async fn ask(data: web::Data<AppState>, sid: SessionId, req: HttpRequest) -> HandlerResult {
    show(&data, sid, &req, View::Ask, SortKey::default()).await
}

pub async fn ask_command(
    data: web::Data<AppState>,
    sid: SessionId,
    button: web::Query<AskButton>,
    form: web::Form<AskForm>,
) -> HandlerResult {
    let AskForm {
        title,
        content,
        tag_input,
        action,
        tag,
    } = form.into_inner();
    let button = button.into_inner();
    let command = AskCommand::from_button(
        action.or(button.action).as_deref(),
        tag.or(button.tag).as_deref(),
        &tag_input,
    );

    data.sessions.enter(sid.0, &View::Ask, data.source.as_ref()).await?;
    let author = data.source.current_user().await.map_err(AppError::from)?;
    let posted = data.sessions.with_view(sid.0, |view: &mut AskQuestionView, toasts| {
        view.update(QuestionDraft { title, content }, tag_input);
        view.apply(command, &author, toasts)
    })?;

    match posted {
        Some(question) => {
            log::debug!("question {} drafted by {}", question.id, question.author);
            Ok(redirect(sid, "/"))
        }
        None => Ok(redirect(sid, "/ask")),
    }
}

// --- Auth ---

pub async fn login(data: web::Data<AppState>, sid: SessionId, req: HttpRequest) -> HandlerResult {
    show(&data, sid, &req, View::Login, SortKey::default()).await
}

pub async fn login_submit(data: web::Data<AppState>, sid: SessionId, form: web::Form<LoginForm>) -> HandlerResult {
    data.sessions.enter(sid.0, &View::Login, data.source.as_ref()).await?;
    data.sessions.with_view(sid.0, |view: &mut LoginView, toasts| {
        // Rejections are shown as toasts.
        let _ = view.submit(form.into_inner(), toasts);
    })?;
    Ok(redirect(sid, "/login"))
}

pub async fn login_social(data: web::Data<AppState>, sid: SessionId, path: web::Path<SocialProvider>) -> HandlerResult {
    let provider = path.into_inner();
    data.sessions.enter(sid.0, &View::Login, data.source.as_ref()).await?;
    data.sessions
        .with_view(sid.0, |view: &mut LoginView, toasts| view.social(provider, toasts))?;
    Ok(redirect(sid, "/login"))
}

pub async fn signup(data: web::Data<AppState>, sid: SessionId, req: HttpRequest) -> HandlerResult {
    show(&data, sid, &req, View::SignUp, SortKey::default()).await
}

pub async fn signup_submit(data: web::Data<AppState>, sid: SessionId, form: web::Form<SignUpForm>) -> HandlerResult {
    data.sessions.enter(sid.0, &View::SignUp, data.source.as_ref()).await?;
    data.sessions.with_view(sid.0, |view: &mut SignUpView, toasts| {
        let _ = view.submit(form.into_inner(), toasts);
    })?;
    Ok(redirect(sid, "/signup"))
}

pub async fn signup_social(data: web::Data<AppState>, sid: SessionId, path: web::Path<SocialProvider>) -> HandlerResult {
    let provider = path.into_inner();
    data.sessions.enter(sid.0, &View::SignUp, data.source.as_ref()).await?;
    data.sessions
        .with_view(sid.0, |view: &mut SignUpView, toasts| view.social(provider, toasts))?;
    Ok(redirect(sid, "/signup"))
}

// --- Header ---

pub async fn mark_read(
    data: web::Data<AppState>,
    sid: SessionId,
    path: web::Path<String>,
    form: web::Form<NextForm>,
) -> HandlerResult {
    let id = path.into_inner();
    data.sessions.with(sid.0, |session| {
        session.with_layout(|layout, _| layout.notifications.mark_as_read(&id))
    });
    Ok(redirect(sid, form.location()))
}

pub async fn mark_all_read(data: web::Data<AppState>, sid: SessionId, form: web::Form<NextForm>) -> HandlerResult {
    data.sessions.with(sid.0, |session| {
        session.with_layout(|layout, _| layout.notifications.mark_all_as_read())
    });
    Ok(redirect(sid, form.location()))
}

pub async fn logout(data: web::Data<AppState>, sid: SessionId, form: web::Form<NextForm>) -> HandlerResult {
    data.sessions.with(sid.0, |session| session.with_layout(|layout, toasts| layout.logout(toasts)));
    Ok(redirect(sid, form.location()))
}

/// Fallback for unknown paths.
pub async fn not_found(data: web::Data<AppState>, sid: SessionId, req: HttpRequest) -> HandlerResult {
    missing_page(&data, sid, req.path()).await
}
