//! Question detail page: voting, answering, commenting and the author-only
//! accept/pin toggles.

use std::collections::HashSet;

use chrono::Utc;

use crate::error::{AppError, Field, Result, ValidationError};
use crate::models::{new_id, Answer, AnswerAction, Comment, Question, QuestionThread, User, VoteDirection, VoteTarget};
use crate::traits::Toaster;

#[derive(Debug, Clone)]
pub struct QuestionDetailView {
    thread: QuestionThread,
    viewer: User,
    /// Answers whose comment section is expanded.
    expanded_comments: HashSet<String>,
}

impl QuestionDetailView {
    pub fn new(thread: QuestionThread, viewer: User) -> Self {
        Self {
            thread,
            viewer,
            expanded_comments: HashSet::new(),
        }
    }

    pub fn thread(&self) -> &QuestionThread {
        &self.thread
    }

    pub fn question(&self) -> &Question {
        &self.thread.question
    }

    pub fn viewer(&self) -> &User {
        &self.viewer
    }

    /// Accept and pin are only offered to the question's author.
    pub fn is_question_author(&self) -> bool {
        self.viewer.username == self.thread.question.author
    }

    /// Pinned answers first, everything else in posting order.
    pub fn answers_for_display(&self) -> Vec<&Answer> {
        let mut answers: Vec<&Answer> = self.thread.answers.iter().collect();
        answers.sort_by_key(|a| !a.is_pinned);
        answers
    }

    pub fn answer(&self, answer_id: &str) -> Option<&Answer> {
        self.thread.answers.iter().find(|a| a.id == answer_id)
    }

    pub fn comments_open(&self, answer_id: &str) -> bool {
        self.expanded_comments.contains(answer_id)
    }

    /// Adds ±1 to the target and returns its new score. Repeated votes by the
    /// same viewer all count.
    pub fn vote(&mut self, target: &VoteTarget, direction: VoteDirection, toasts: &mut impl Toaster) -> Result<i64> {
        let votes = match target {
            VoteTarget::Question => &mut self.thread.question.votes,
            VoteTarget::Answer(id) => &mut self.answer_mut(id)?.votes,
        };
        *votes += direction.delta();
        let score = *votes;

        toasts.success(
            "Vote recorded",
            &format!("Your {}vote has been recorded.", direction.as_str()),
        );
        log::debug!("{target:?} on question {} now at {score}", self.thread.question.id);
        Ok(score)
    }

    /// Appends an answer by the viewer. Blank content is rejected.
    pub fn submit_answer(&mut self, content: &str, toasts: &mut impl Toaster) -> std::result::Result<&Answer, ValidationError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::MissingField(Field::Answer));
        }

        self.thread.answers.push(Answer::new(content.to_string(), &self.viewer));
        self.thread.question.answer_count += 1;
        toasts.success("Answer posted!", "Your answer has been added to the question.");

        let answer = &self.thread.answers[self.thread.answers.len() - 1];
        Ok(answer)
    }

    /// Toggles acceptance. Accepting an answer withdraws acceptance from every
    /// other answer, so at most one is accepted. Returns the new state.
    pub fn accept(&mut self, answer_id: &str) -> Result<bool> {
        self.require_author("accept an answer")?;
        let accepted = !self.answer_mut(answer_id)?.is_accepted;

        for answer in &mut self.thread.answers {
            answer.is_accepted = accepted && answer.id == answer_id;
        }
        Ok(accepted)
    }

    /// Toggles the pin on one answer, independently of the others.
    pub fn pin(&mut self, answer_id: &str) -> Result<bool> {
        self.require_author("pin an answer")?;
        let answer = self.answer_mut(answer_id)?;
        answer.is_pinned = !answer.is_pinned;
        Ok(answer.is_pinned)
    }

    /// Expands or collapses an answer's comments. Returns whether it is open.
    pub fn toggle_comments(&mut self, answer_id: &str) -> Result<bool> {
        self.answer_mut(answer_id)?;
        if self.expanded_comments.remove(answer_id) {
            Ok(false)
        } else {
            self.expanded_comments.insert(answer_id.to_string());
            Ok(true)
        }
    }

    pub fn add_comment(&mut self, answer_id: &str, content: &str, toasts: &mut impl Toaster) -> Result<()> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::MissingField(Field::Comment).into());
        }

        let author = self.viewer.username.clone();
        self.answer_mut(answer_id)?.comments.push(Comment {
            id: new_id(),
            content: content.to_string(),
            author,
            created_at: Utc::now(),
        });
        self.expanded_comments.insert(answer_id.to_string());
        toasts.success("Comment added", "Your comment has been posted.");
        Ok(())
    }

    /// Runs an overflow-menu action. For [`AnswerAction::Share`] the link to
    /// copy is returned; the caller hands it to the clipboard.
    pub fn answer_action(
        &mut self,
        answer_id: &str,
        action: AnswerAction,
        base_url: &str,
        toasts: &mut impl Toaster,
    ) -> Result<Option<String>> {
        self.answer_mut(answer_id)?;
        match action {
            AnswerAction::Share => {
                toasts.success("Link copied", "Answer link copied to clipboard.");
                Ok(Some(self.share_link(base_url, answer_id)))
            }
            AnswerAction::Bookmark => {
                toasts.success("Answer bookmarked", "Answer saved to your bookmarks.");
                Ok(None)
            }
            AnswerAction::Report => {
                toasts.success("Answer reported", "Thank you for helping maintain the community.");
                Ok(None)
            }
        }
    }

    pub fn share_link(&self, base_url: &str, answer_id: &str) -> String {
        format!(
            "{}/questions/{}#answer-{}",
            base_url.trim_end_matches('/'),
            self.thread.question.id,
            answer_id
        )
    }

    fn answer_mut(&mut self, answer_id: &str) -> Result<&mut Answer> {
        self.thread
            .answers
            .iter_mut()
            .find(|a| a.id == answer_id)
            .ok_or_else(|| AppError::NotFound("Answer".into(), answer_id.into()))
    }

    fn require_author(&self, action: &str) -> Result<()> {
        if self.is_question_author() {
            Ok(())
        } else {
            Err(AppError::Unauthorized(format!(
                "only the question's author can {action}"
            )))
        }
    }
}
