//! # sk-fixtures
//!
//! In-memory implementation of `ForumSource` serving the StackIt demo data.
//! Timestamps are offsets from the moment the source was created, so the
//! "2 hours ago" labels age naturally while the server runs.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sk_core::models::{Answer, Notification, NotificationKind, Question, QuestionThread, User};
use sk_core::traits::ForumSource;

const CURRENT_USER: &str = "devuser123";

/// Reputation shown next to known authors; anyone else has the starting 1.
const REPUTATIONS: [(&str, u32); 3] = [("devuser123", 1250), ("reactpro", 3420), ("statemaster", 2100)];

const STATE_MANAGEMENT_BODY: &str = r#"I'm working on a large React application with TypeScript and struggling with state management. What are the best practices for managing complex state across multiple components?

I've tried using useState and useContext, but as the application grows, it becomes harder to manage. I'm considering Redux, but I'm not sure if it's overkill for my use case.

Here's a simplified version of what I'm trying to achieve:

```typescript
interface UserState {
  user: User | null;
  isLoading: boolean;
  error: string | null;
}

// How do I best manage this across multiple components?
```

Any recommendations for patterns or libraries that work well with TypeScript?"#;

const ZUSTAND_ANSWER: &str = r#"For TypeScript React applications, I recommend a combination approach depending on your app's complexity:

**For smaller to medium apps:**
- Use `useContext` with `useReducer` for global state
- Keep local state with `useState` for component-specific data

**For larger apps:**
- Consider Zustand - it's lightweight and TypeScript-friendly
- Redux Toolkit if you need time-travel debugging and complex state logic

Here's a simple example with Zustand:

```typescript
import { create } from 'zustand'

interface UserStore {
  user: User | null
  isLoading: boolean
  error: string | null
  setUser: (user: User) => void
  setLoading: (loading: boolean) => void
}

const useUserStore = create<UserStore>((set) => ({
  user: null,
  isLoading: false,
  error: null,
  setUser: (user) => set({ user }),
  setLoading: (isLoading) => set({ isLoading }),
}))
```

This gives you excellent TypeScript support and is much simpler than Redux for most use cases."#;

const VALTIO_ANSWER: &str = r#"I'd also recommend looking into **TanStack Query** (formerly React Query) for server state management. It pairs really well with any client state solution.

For client state, if you want something even simpler than Zustand, check out **Valtio**. It uses proxies to make state mutations feel more natural:

```typescript
import { proxy } from 'valtio'

const state = proxy<UserState>({
  user: null,
  isLoading: false,
  error: null
})

// Just mutate directly!
state.user = newUser
state.isLoading = false
```

The key is to separate server state (data from APIs) from client state (UI state, form data, etc.)."#;

pub struct FixtureSource {
    seeded_at: DateTime<Utc>,
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Seeds relative to a fixed instant (useful for tests).
    pub fn at(seeded_at: DateTime<Utc>) -> Self {
        Self { seeded_at }
    }

    fn ago(&self, offset: Duration) -> DateTime<Utc> {
        self.seeded_at - offset
    }

    #[allow(clippy::too_many_arguments)]
    fn question(
        &self,
        id: &str,
        title: &str,
        content: &str,
        author: &str,
        tags: [&str; 4],
        votes: i64,
        view_count: u32,
        age: Duration,
    ) -> Question {
        Question {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            author: author.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            votes,
            answer_count: self.answers_for(id).len() as u32,
            view_count,
            created_at: self.ago(age),
        }
    }

    fn recent(&self) -> Vec<Question> {
        vec![
            self.question(
                "1",
                "How to handle state management in React with TypeScript?",
                "I'm working on a large React application with TypeScript and struggling with state management. What are the best practices for managing complex state across multiple components?",
                "devuser123",
                ["react", "typescript", "state-management", "hooks"],
                15,
                247,
                Duration::hours(2),
            ),
            self.question(
                "2",
                "Best practices for API error handling in Node.js",
                "What's the recommended approach for handling different types of API errors in a Node.js Express application? Looking for patterns that scale well.",
                "backendpro",
                ["nodejs", "express", "error-handling", "api"],
                8,
                156,
                Duration::hours(4),
            ),
            self.question(
                "3",
                "CSS Grid vs Flexbox: When to use which?",
                "I'm confused about when to use CSS Grid and when to use Flexbox. Can someone explain the key differences and provide examples of when each is most appropriate?",
                "csslearner",
                ["css", "grid", "flexbox", "layout"],
                23,
                412,
                Duration::hours(6),
            ),
            self.question(
                "4",
                "Database indexing strategies for large datasets",
                "Working with a PostgreSQL database that has millions of records. What are effective indexing strategies to optimize query performance?",
                "dbadmin2024",
                ["postgresql", "database", "indexing", "performance"],
                12,
                298,
                Duration::hours(8),
            ),
        ]
    }

    fn unanswered(&self) -> Vec<Question> {
        vec![
            self.question(
                "5",
                "How to implement OAuth 2.0 with Refresh Tokens in React?",
                "I'm trying to implement secure authentication with OAuth 2.0 in my React application. I need help with handling refresh tokens securely and managing token expiration.",
                "securitydev",
                ["react", "oauth", "authentication", "security"],
                5,
                89,
                Duration::hours(1),
            ),
            self.question(
                "6",
                "Best practices for handling WebSocket connections in React",
                "What are the best practices for managing WebSocket connections in React? Should I use useEffect, custom hooks, or context providers?",
                "websocketdev",
                ["react", "websocket", "real-time", "hooks"],
                3,
                45,
                Duration::hours(3),
            ),
            self.question(
                "7",
                "How to optimize MongoDB queries for large collections?",
                "I have a MongoDB collection with over 10 million documents. What are the best indexing strategies and query optimization techniques?",
                "mongodev",
                ["mongodb", "performance", "database", "optimization"],
                8,
                167,
                Duration::hours(5),
            ),
        ]
    }

    fn answer(&self, id: &str, author: &str, content: &str, votes: i64, age: Duration) -> Answer {
        Answer {
            id: id.into(),
            content: content.into(),
            author: author.into(),
            author_reputation: reputation(author),
            votes,
            is_accepted: false,
            is_pinned: false,
            created_at: self.ago(age),
            comments: Vec::new(),
        }
    }

    /// Seeded answers; listings count these, so the unanswered questions
    /// have none.
    fn answers_for(&self, question_id: &str) -> Vec<Answer> {
        match question_id {
            "1" => vec![
                Answer {
                    is_accepted: true,
                    ..self.answer("1", "reactpro", ZUSTAND_ANSWER, 8, Duration::hours(1))
                },
                self.answer("2", "statemaster", VALTIO_ANSWER, 3, Duration::minutes(30)),
            ],
            "2" => vec![self.answer(
                "1",
                "expressguru",
                "Centralise it in one error-handling middleware registered after your routes. Throw typed errors (`NotFoundError`, `ValidationError`) from handlers and map each type to a status code in that one place.",
                6,
                Duration::hours(3),
            )],
            "3" => vec![
                Answer {
                    is_accepted: true,
                    ..self.answer(
                        "1",
                        "layoutnerd",
                        "Grid is two-dimensional: rows and columns at once. Flexbox is one-dimensional. Use Grid for the page skeleton and Flexbox for the items inside each region.",
                        14,
                        Duration::hours(5),
                    )
                },
                self.answer(
                    "2",
                    "pixelpusher",
                    "If the content should decide the size, reach for Flexbox. If the layout should decide it, reach for Grid.",
                    9,
                    Duration::hours(5),
                ),
                self.answer(
                    "3",
                    "frontendfan",
                    "A navbar is a classic Flexbox case: one row, items spaced with `justify-content: space-between`.",
                    4,
                    Duration::hours(4),
                ),
                self.answer(
                    "4",
                    "cssdev",
                    "Card galleries are where Grid shines: `grid-template-columns: repeat(auto-fill, minmax(240px, 1fr))` needs no media queries.",
                    3,
                    Duration::hours(3),
                ),
                self.answer(
                    "5",
                    "a11ymatters",
                    "Whichever you pick, keep the source order meaningful. Reordering visually with `order` or grid placement can confuse screen reader users.",
                    1,
                    Duration::hours(2),
                ),
            ],
            "4" => vec![
                self.answer(
                    "1",
                    "pgwhisperer",
                    "Start from `EXPLAIN ANALYZE` on your slowest queries. Add B-tree indexes on the columns in your WHERE and JOIN clauses, and composite indexes in the order the filters are applied.",
                    7,
                    Duration::hours(6),
                ),
                self.answer(
                    "2",
                    "dbadmin2024",
                    "For time-series style tables, a BRIN index on the timestamp column is tiny compared to a B-tree and works well when rows arrive in order.",
                    2,
                    Duration::hours(5),
                ),
            ],
            _ => Vec::new(),
        }
    }

    fn notification(
        &self,
        id: &str,
        kind: NotificationKind,
        title: &str,
        content: &str,
        author: &str,
        age: Duration,
        is_read: bool,
    ) -> Notification {
        Notification {
            id: id.into(),
            kind,
            title: title.into(),
            content: content.into(),
            author: author.into(),
            timestamp: self.ago(age),
            is_read,
        }
    }
}

fn reputation(username: &str) -> u32 {
    REPUTATIONS
        .iter()
        .find(|(name, _)| *name == username)
        .map_or(1, |(_, rep)| *rep)
}

#[async_trait]
impl ForumSource for FixtureSource {
    async fn recent_questions(&self) -> anyhow::Result<Vec<Question>> {
        Ok(self.recent())
    }

    async fn unanswered_questions(&self) -> anyhow::Result<Vec<Question>> {
        Ok(self.unanswered())
    }

    async fn get_thread(&self, id: &str) -> anyhow::Result<Option<QuestionThread>> {
        let Some(mut question) = self
            .recent()
            .into_iter()
            .chain(self.unanswered())
            .find(|q| q.id == id)
        else {
            return Ok(None);
        };

        if id == "1" {
            question.content = STATE_MANAGEMENT_BODY.to_string();
        }
        let answers = self.answers_for(id);

        Ok(Some(QuestionThread {
            author_reputation: reputation(&question.author),
            question,
            answers,
        }))
    }

    async fn notifications(&self) -> anyhow::Result<Vec<Notification>> {
        Ok(vec![
            self.notification(
                "1",
                NotificationKind::Answer,
                "New answer to your question",
                "Someone answered your question about React state management",
                "reactpro",
                Duration::minutes(2),
                false,
            ),
            self.notification(
                "2",
                NotificationKind::Mention,
                "You were mentioned",
                "@devuser123 mentioned you in a discussion about TypeScript",
                "tsexpert",
                Duration::hours(1),
                false,
            ),
            self.notification(
                "3",
                NotificationKind::Award,
                "Your answer was accepted",
                "Your answer about CSS Grid was marked as the best solution",
                "csslearner",
                Duration::hours(3),
                false,
            ),
            self.notification(
                "4",
                NotificationKind::Comment,
                "New comment on your answer",
                "Someone commented on your Redux Toolkit answer",
                "statemaster",
                Duration::hours(5),
                true,
            ),
        ])
    }

    async fn current_user(&self) -> anyhow::Result<User> {
        Ok(User {
            username: CURRENT_USER.into(),
            email: "dev@example.com".into(),
            reputation: reputation(CURRENT_USER),
            questions_asked: 12,
            answers_given: 34,
        })
    }
}
