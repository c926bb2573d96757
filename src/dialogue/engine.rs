//! `DialogueEngine` — walks the fixed question script, applying answers to
//! the answer store and resolving acknowledgements.
//!
//! The engine owns the transitions and the store writes; the pacing (typed
//! reveal, settle delay, inter-question pause) belongs to whatever drives
//! it, so dropping the driver future cancels all pending timers without
//! leaving the engine in an inconsistent state.

use crate::content;
use crate::profile::{Answer, Gender};
use crate::script::{QuestionDef, script};
use crate::store::AnswerStore;
use crate::tracking::Analytics;

use super::state::DialogueState;

/// Outcome of an accepted answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedAnswer {
    /// The acknowledgement text to type out.
    pub acknowledgement: &'static str,
    /// Progress fraction in `[0, 1]` after this answer.
    pub progress: f32,
}

/// Walks the scripted dialogue, one question at a time.
pub struct DialogueEngine {
    script: &'static [QuestionDef],
    store: AnswerStore,
    analytics: Analytics,
    state: DialogueState,
}

impl DialogueEngine {
    pub fn new(store: AnswerStore, analytics: Analytics) -> Self {
        Self {
            script: script(),
            store,
            analytics,
            state: DialogueState::Idle,
        }
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    /// Progress fraction exposed to the hosting view, clamped to `[0, 1]`.
    /// Reaching `1.0` is the signal to render the completion call-to-action.
    pub fn progress(&self) -> f32 {
        if self.script.is_empty() {
            return 1.0;
        }
        (self.state.answered(self.script.len()) as f32 / self.script.len() as f32).clamp(0.0, 1.0)
    }

    /// The question the dialogue is currently on, if any.
    pub fn current_question(&self) -> Option<&'static QuestionDef> {
        self.state.question_index().map(|n| &self.script[n])
    }

    /// Option set for the current question, resolved against the collected
    /// gender at render time. Empty while no question is awaiting an answer.
    pub async fn options(&self) -> Vec<(Answer, &'static str)> {
        if !self.state.accepts_answers() {
            return Vec::new();
        }
        let Some(question) = self.current_question() else {
            return Vec::new();
        };
        let gender = self.store.profile().await.gender;
        question
            .options()
            .into_iter()
            .map(|answer| (answer, answer.label(gender)))
            .collect()
    }

    /// Explicit start action: `Idle` → `Asking(0)`.
    pub fn begin(&mut self) -> bool {
        if !self.transition(DialogueState::Asking(0)) {
            return false;
        }
        self.analytics.chat_started();
        true
    }

    /// The driver signals that the current prompt finished typing (and the
    /// settle delay elapsed): `Asking(n)` → `AwaitingAnswer(n)`. Options
    /// become selectable only now.
    pub fn prompt_typed(&mut self) -> bool {
        match self.state {
            DialogueState::Asking(n) => self.transition(DialogueState::AwaitingAnswer(n)),
            _ => {
                tracing::debug!(state = %self.state, "prompt_typed outside Asking, ignoring");
                false
            }
        }
    }

    /// Accept one selected option.
    ///
    /// Rejected (state unchanged, `None`) while no question is awaiting an
    /// answer or when the answer targets a different question's field —
    /// invalid submissions are prevented, not surfaced as errors.
    pub async fn select(&mut self, answer: Answer) -> Option<AcceptedAnswer> {
        let DialogueState::AwaitingAnswer(n) = self.state else {
            tracing::debug!(state = %self.state, "Answer submitted while locked, ignoring");
            return None;
        };
        let question = &self.script[n];
        if answer.key() != question.key {
            tracing::warn!(
                expected = %question.key,
                got = %answer.key(),
                "Answer targets the wrong question, ignoring"
            );
            return None;
        }
        if !self.store.record(question, answer).await {
            return None;
        }

        let gender = self.store.profile().await.gender;
        self.analytics
            .question_answered(question.id, question.prompt, answer.label(gender));

        if !self.transition(DialogueState::Acknowledging(n)) {
            return None;
        }
        Some(AcceptedAnswer {
            acknowledgement: content::acknowledgement(question, gender),
            progress: self.progress(),
        })
    }

    /// The driver signals that the acknowledgement finished typing (and the
    /// inter-question pause elapsed): advance to the next question, or to
    /// `Complete` after the last one.
    pub async fn acknowledged(&mut self) -> bool {
        let DialogueState::Acknowledging(n) = self.state else {
            tracing::debug!(state = %self.state, "acknowledged outside Acknowledging, ignoring");
            return false;
        };
        if n + 1 == self.script.len() {
            if !self.transition(DialogueState::Complete) {
                return false;
            }
            self.store.mark_complete().await;
            self.analytics.chat_completed();
            true
        } else {
            self.transition(DialogueState::Asking(n + 1))
        }
    }

    /// Completion badge for the hosting view, resolved once progress is 1.0.
    pub async fn completion_badge(&self) -> content::offer::CompletionBadge {
        let gender = self.store.profile().await.gender.unwrap_or(Gender::Male);
        content::offer::completion_badge(gender)
    }

    /// The completion call-to-action was clicked.
    pub fn record_cta_click(&self) {
        self.analytics.chat_cta_click();
    }

    fn transition(&mut self, to: DialogueState) -> bool {
        if !self.state.can_transition_to(to, self.script.len()) {
            tracing::warn!(from = %self.state, to = %to, "Invalid dialogue transition, ignoring");
            return false;
        }
        tracing::debug!(from = %self.state, to = %to, "Dialogue transition");
        self.state = to;
        true
    }
}
