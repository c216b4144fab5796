//! Interview session state machine
//!
//! The thread "step" protocol is modeled as an explicit finite-state
//! machine rather than relying on incidental ordering in the rendering
//! loop. The server drives the turn-taking: the client asks for a step,
//! gets back either a question or a terminal signal, and submits exactly
//! one validated answer per presented question.
//!
//! Everything here is pure state and validation; network I/O lives in the
//! thread command handler.

use crate::api::types::{Answer, Question, QuestionType, StepResponse, OTHER_CHOICE_ID};
use crate::error::{HarnessError, Result};

/// Client-side state of one interview session
///
/// Transitions:
/// `AwaitingQuestion → QuestionPresented → (Submitting → AwaitingQuestion) | Done`
#[derive(Debug, Clone, PartialEq)]
pub enum InterviewState {
    /// A step request is outstanding (or about to be issued)
    AwaitingQuestion,
    /// The server issued a question; an answer draft is being composed
    QuestionPresented(Question),
    /// A validated answer is in flight
    Submitting,
    /// The server signalled completion; no further interaction is offered
    Done,
}

impl InterviewState {
    /// Fold a step response into the next state
    ///
    /// A `done` response is terminal from any state. A non-done response
    /// must carry a question; a response with neither is a protocol
    /// violation.
    pub fn from_step(response: StepResponse) -> Result<Self> {
        if response.done {
            return Ok(Self::Done);
        }
        match response.question {
            Some(question) => Ok(Self::QuestionPresented(question)),
            None => anyhow::bail!("step response carried neither done nor a question"),
        }
    }

    /// The currently presented question, if any
    pub fn question(&self) -> Option<&Question> {
        match self {
            Self::QuestionPresented(question) => Some(question),
            _ => None,
        }
    }

    /// Whether the session reached its terminal state
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// In-progress answer, keyed to the question it replies to
///
/// A fresh draft is created whenever a new question is presented, so
/// leftover input from the previous turn can never leak into the next
/// submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerDraft {
    question_id: String,
    choice_id: Option<String>,
    free_text: Option<String>,
}

impl AnswerDraft {
    /// Empty draft for a newly presented question
    pub fn for_question(question: &Question) -> Self {
        Self {
            question_id: question.id.clone(),
            choice_id: None,
            free_text: None,
        }
    }

    /// Record the selected choice id
    pub fn select_choice(&mut self, choice_id: impl Into<String>) {
        self.choice_id = Some(choice_id.into());
    }

    /// Record free text; blank input leaves the field unset
    pub fn set_free_text(&mut self, text: &str) {
        let trimmed = text.trim();
        self.free_text = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// The selected choice id, if any
    pub fn choice_id(&self) -> Option<&str> {
        self.choice_id.as_deref()
    }

    /// Whether the sentinel `OTHER` choice is selected
    ///
    /// When true, the free-text prompt is framed as a required explanation
    /// rather than an optional elaboration. The distinction is purely
    /// presentational; validation treats both the same way.
    pub fn requires_explanation(&self) -> bool {
        self.choice_id.as_deref() == Some(OTHER_CHOICE_ID)
    }

    /// Convert the draft into the wire answer
    pub fn into_answer(self) -> Answer {
        Answer {
            question_id: self.question_id,
            choice_id: self.choice_id,
            free_text: self.free_text,
        }
    }
}

/// Validate a draft against its question before any request is sent
///
/// A `multiple_choice` question requires either a selected choice or free
/// text; a `short_answer` question requires free text. A violation blocks
/// submission client-side.
pub fn validate_answer(question: &Question, draft: &AnswerDraft) -> Result<()> {
    match question.question_type {
        QuestionType::MultipleChoice => {
            if draft.choice_id.is_none() && draft.free_text.is_none() {
                return Err(HarnessError::Validation(
                    "select an option or provide text".to_string(),
                )
                .into());
            }
        }
        QuestionType::ShortAnswer => {
            if draft.free_text.is_none() {
                return Err(HarnessError::Validation("an answer is required".to_string()).into());
            }
        }
    }
    Ok(())
}
