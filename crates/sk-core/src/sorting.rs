//! Ordering of question listings.

use std::cmp::Reverse;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Question;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Input order, which the data source already gives newest first.
    #[default]
    Newest,
    /// Descending votes.
    Trending,
    Votes,
    Views,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Trending => "trending",
            Self::Votes => "votes",
            Self::Views => "views",
        }
    }

    /// Returns `self` if the page offers it, otherwise [`SortKey::Newest`].
    pub fn within(self, offered: &[SortKey]) -> SortKey {
        if offered.contains(&self) {
            self
        } else {
            SortKey::Newest
        }
    }
}

impl FromStr for SortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "trending" => Ok(Self::Trending),
            "votes" => Ok(Self::Votes),
            "views" => Ok(Self::Views),
            _ => Err(()),
        }
    }
}

/// Returns the questions in display order for `key`. Stable: ties keep their
/// input order.
pub fn sort_questions(questions: &[Question], key: SortKey) -> Vec<&Question> {
    let mut sorted: Vec<&Question> = questions.iter().collect();
    match key {
        SortKey::Newest => {}
        SortKey::Trending | SortKey::Votes => sorted.sort_by_key(|q| Reverse(q.votes)),
        SortKey::Views => sorted.sort_by_key(|q| Reverse(q.view_count)),
    }
    sorted
}
