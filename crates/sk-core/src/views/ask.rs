//! Ask-question page: a draft with tag editing and a submit that validates
//! but stores nothing.

use chrono::Utc;

use crate::error::ValidationError;
use crate::forms::QuestionDraft;
use crate::models::{new_id, Question, User};
use crate::tags::TagSet;
use crate::traits::Toaster;

/// What a POST to the ask page asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskCommand {
    AddTag,
    AddPopularTag(String),
    RemoveTag(String),
    Submit,
}

impl AskCommand {
    /// Maps the pressed button to a command. A submit with no button name but
    /// a pending tag is an Enter press in the tag field.
    pub fn from_button(action: Option<&str>, tag: Option<&str>, tag_input: &str) -> Self {
        let tag = tag.unwrap_or_default().to_string();
        match action {
            Some("add_tag") => Self::AddTag,
            Some("add_popular_tag") => Self::AddPopularTag(tag),
            Some("remove_tag") => Self::RemoveTag(tag),
            Some(_) => Self::Submit,
            None if !tag_input.trim().is_empty() => Self::AddTag,
            None => Self::Submit,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AskQuestionView {
    draft: QuestionDraft,
    tags: TagSet,
    tag_input: String,
}

impl AskQuestionView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &QuestionDraft {
        &self.draft
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn tag_input(&self) -> &str {
        &self.tag_input
    }

    /// Stores what the viewer typed so far.
    pub fn update(&mut self, draft: QuestionDraft, tag_input: String) {
        self.draft = draft;
        self.tag_input = tag_input;
    }

    /// Adds the pending tag input. On success the input is cleared; on
    /// rejection it is kept so the viewer can correct it.
    pub fn add_tag(&mut self) -> Result<(), ValidationError> {
        self.tags.add(&self.tag_input)?;
        self.tag_input.clear();
        Ok(())
    }

    pub fn add_popular_tag(&mut self, tag: &str) -> Result<(), ValidationError> {
        self.tags.add(tag)
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Validates the draft. On success returns the question that would have
    /// been posted and resets the page.
    pub fn submit(&mut self, author: &User, toasts: &mut impl Toaster) -> Result<Question, ValidationError> {
        if let Err(err) = self.draft.validate() {
            let (title, description) = err.toast();
            toasts.destructive(title, &description);
            return Err(err);
        }

        let draft = std::mem::take(&mut self.draft);
        let tags = std::mem::take(&mut self.tags);
        self.tag_input.clear();

        toasts.success("Success!", "Your question has been posted successfully");
        Ok(Question {
            id: new_id(),
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            author: author.username.clone(),
            tags: tags.into_vec(),
            votes: 0,
            answer_count: 0,
            view_count: 0,
            created_at: Utc::now(),
        })
    }

    /// Applies a command, swallowing tag rejections the way the tag field
    /// does. Returns the posted question when the command was a valid submit.
    pub fn apply(&mut self, command: AskCommand, author: &User, toasts: &mut impl Toaster) -> Option<Question> {
        match command {
            AskCommand::AddTag => {
                let _ = self.add_tag();
                None
            }
            AskCommand::AddPopularTag(tag) => {
                let _ = self.add_popular_tag(&tag);
                None
            }
            AskCommand::RemoveTag(tag) => {
                self.remove_tag(&tag);
                None
            }
            AskCommand::Submit => self.submit(author, toasts).ok(),
        }
    }
}
