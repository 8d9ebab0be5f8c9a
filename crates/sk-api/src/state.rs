//! Shared application state and the per-viewer session store.

use std::future::{ready, Ready};
use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest};
use dashmap::DashMap;
use sk_core::error::{AppError, Result};
use sk_core::session::{load_layout, load_page, Page, Session, View};
use sk_core::toast::ToastQueue;
use sk_core::traits::{Clipboard, ForumSource};
use sk_core::views::{AskQuestionView, LoginView, QuestionDetailView, SignUpView};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sk_session";

/// State shared across all Actix-web workers.
pub struct AppState {
    pub source: Box<dyn ForumSource>,
    pub clipboard: Arc<dyn Clipboard>,
    pub sessions: SessionStore,
    /// Origin used to build share links.
    pub base_url: String,
}

impl AppState {
    pub fn new(source: Box<dyn ForumSource>, clipboard: Arc<dyn Clipboard>, base_url: impl Into<String>) -> Self {
        Self {
            source,
            clipboard,
            sessions: SessionStore::default(),
            base_url: base_url.into(),
        }
    }

    pub fn with_session_limits(mut self, limits: SessionLimits) -> Self {
        self.sessions = SessionStore::new(limits);
        self
    }
}

/// The viewer's session id, read from the session cookie. A request without a
/// valid cookie gets a fresh id, which the response then sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn cookie(self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, self.0.to_string())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish()
    }
}

impl FromRequest for SessionId {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
            .unwrap_or_else(Uuid::new_v4);
        ready(Ok(SessionId(id)))
    }
}

/// A page container that can be borrowed out of a [`Page`].
pub trait PageView: Sized {
    fn from_page(page: &mut Page) -> Option<&mut Self>;
}

impl PageView for QuestionDetailView {
    fn from_page(page: &mut Page) -> Option<&mut Self> {
        match page {
            Page::QuestionDetail(view) => Some(view),
            _ => None,
        }
    }
}

impl PageView for AskQuestionView {
    fn from_page(page: &mut Page) -> Option<&mut Self> {
        match page {
            Page::Ask(view) => Some(view),
            _ => None,
        }
    }
}

impl PageView for LoginView {
    fn from_page(page: &mut Page) -> Option<&mut Self> {
        match page {
            Page::Login(view) => Some(view),
            _ => None,
        }
    }
}

impl PageView for SignUpView {
    fn from_page(page: &mut Page) -> Option<&mut Self> {
        match page {
            Page::SignUp(view) => Some(view),
            _ => None,
        }
    }
}

/// Bounds on the session store.
#[derive(Debug, Clone, Copy)]
pub struct SessionLimits {
    pub max_sessions: usize,
    /// Sessions untouched for this long are dropped when a new one starts.
    pub idle: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_sessions: 10_000,
            idle: Duration::from_secs(30 * 60),
        }
    }
}

struct Slot {
    session: Session,
    last_seen: Instant,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            session: Session::new(),
            last_seen: Instant::now(),
        }
    }
}

/// Sessions by id. Entries are locked only inside the synchronous closures
/// passed to [`SessionStore::with`]; nothing holds an entry across an await.
///
/// Starting a session sweeps idle ones and, past `max_sessions`, evicts the
/// least recently seen.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, Slot>,
    limits: SessionLimits,
}

impl SessionStore {
    pub fn new(limits: SessionLimits) -> Self {
        Self {
            sessions: DashMap::new(),
            limits,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Runs `f` on the session, creating it if needed.
    pub fn with<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut created = false;
        let result = {
            let mut slot = self.sessions.entry(id).or_insert_with(|| {
                created = true;
                Slot::default()
            });
            slot.last_seen = Instant::now();
            f(&mut slot.session)
        };
        if created {
            self.evict(id);
        }
        result
    }

    /// Drops idle sessions, then the oldest ones while over the cap. `keep`
    /// is never evicted.
    fn evict(&self, keep: Uuid) {
        let idle = self.limits.idle;
        self.sessions
            .retain(|id, slot| *id == keep || slot.last_seen.elapsed() < idle);

        let excess = self.sessions.len().saturating_sub(self.limits.max_sessions);
        if excess == 0 {
            return;
        }
        let mut by_age: Vec<(Instant, Uuid)> = self
            .sessions
            .iter()
            .filter(|entry| *entry.key() != keep)
            .map(|entry| (entry.value().last_seen, *entry.key()))
            .collect();
        by_age.sort_unstable();
        for (_, id) in by_age.into_iter().take(excess) {
            self.sessions.remove(&id);
        }
        log::debug!("evicted {excess} sessions over the cap of {}", self.limits.max_sessions);
    }

    /// Runs `f` on the current page's container of type `V`.
    pub fn with_view<V: PageView, R>(&self, id: Uuid, f: impl FnOnce(&mut V, &mut ToastQueue) -> R) -> Result<R> {
        self.with(id, |session| {
            session
                .with_page(|page, toasts| {
                    let current = page.view();
                    V::from_page(page)
                        .map(|view| f(view, toasts))
                        .ok_or_else(|| AppError::Internal(format!("session is on {current:?}")))
                })
                .unwrap_or_else(|| Err(AppError::Internal("session has no page".into())))
        })
    }

    /// Puts the session on `view`. Staying on the same view keeps its state;
    /// entering another loads a fresh container (and the layout, if the new
    /// page needs one the session does not hold).
    ///
    /// No lock is held while loading, so other requests from the same viewer
    /// may move the session meanwhile. The load settles through
    /// [`Session::arrive`], which keeps a page reached in between and asks
    /// for the layout again if it was dropped.
    pub async fn enter(&self, id: Uuid, view: &View, source: &dyn ForumSource) -> Result<()> {
        let (ready, needs_layout) = self.with(id, |session| (session.is_ready(view), session.needs_layout(view)));
        if ready {
            return Ok(());
        }

        let page = match load_page(source, view).await {
            Ok(page) => page,
            Err(err @ AppError::NotFound(..)) => {
                self.with(id, |session| session.navigate(Page::NotFound, None));
                return Err(err);
            }
            Err(err) => return Err(err),
        };
        let layout = if needs_layout {
            Some(load_layout(source).await?)
        } else {
            None
        };

        let Some(page) = self.with(id, |session| session.arrive(page, layout)) else {
            return Ok(());
        };
        log::debug!("layout dropped while entering {view:?}; reloading it");
        let layout = load_layout(source).await?;
        match self.with(id, |session| session.arrive(page, Some(layout))) {
            None => Ok(()),
            Some(page) => Err(AppError::Internal(format!("could not settle on {:?}", page.view()))),
        }
    }
}
