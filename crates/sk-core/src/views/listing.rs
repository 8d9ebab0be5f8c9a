//! Home and unanswered listings.

use crate::models::Question;
use crate::sorting::{sort_questions, SortKey};

/// Home page: every recent question, as newest or trending.
#[derive(Debug, Clone)]
pub struct HomeView {
    questions: Vec<Question>,
}

impl HomeView {
    pub const SORTS: [SortKey; 2] = [SortKey::Newest, SortKey::Trending];

    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn count(&self) -> usize {
        self.questions.len()
    }

    pub fn sorted(&self, key: SortKey) -> Vec<&Question> {
        sort_questions(&self.questions, key.within(&Self::SORTS))
    }
}

#[derive(Debug, Clone)]
pub struct UnansweredView {
    questions: Vec<Question>,
}

impl UnansweredView {
    pub const SORTS: [SortKey; 3] = [SortKey::Newest, SortKey::Votes, SortKey::Views];

    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn count(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn total_votes(&self) -> i64 {
        self.questions.iter().map(|q| q.votes).sum()
    }

    pub fn total_views(&self) -> u64 {
        self.questions.iter().map(|q| u64::from(q.view_count)).sum()
    }

    pub fn sorted(&self, key: SortKey) -> Vec<&Question> {
        sort_questions(&self.questions, key.within(&Self::SORTS))
    }
}
