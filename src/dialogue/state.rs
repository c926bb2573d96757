//! Dialogue state machine — tracks which question the session is on and
//! whether it is typing, waiting for an answer, or acknowledging.

use serde::{Deserialize, Serialize};

/// The states of the scripted dialogue.
///
/// Progresses linearly per question: `Asking(n)` (prompt typing out) →
/// `AwaitingAnswer(n)` (options selectable) → `Acknowledging(n)` (reply
/// typing out) → `Asking(n + 1)`, ending in `Complete` after the last
/// acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "question", rename_all = "snake_case")]
pub enum DialogueState {
    /// Greeting shown, waiting for the explicit start action.
    Idle,
    Asking(usize),
    AwaitingAnswer(usize),
    Acknowledging(usize),
    Complete,
}

impl DialogueState {
    /// Check if a transition from `self` to `target` is valid for a script
    /// of `len` questions.
    pub fn can_transition_to(&self, target: DialogueState, len: usize) -> bool {
        use DialogueState::*;
        match (*self, target) {
            (Idle, Asking(0)) => len > 0,
            (Asking(a), AwaitingAnswer(b)) => a == b && b < len,
            (AwaitingAnswer(a), Acknowledging(b)) => a == b,
            (Acknowledging(a), Asking(b)) => b == a + 1 && b < len,
            (Acknowledging(a), Complete) => a + 1 == len,
            _ => false,
        }
    }

    /// Whether the dialogue is finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// The question index this state concerns, if any.
    pub fn question_index(&self) -> Option<usize> {
        match self {
            Self::Asking(n) | Self::AwaitingAnswer(n) | Self::Acknowledging(n) => Some(*n),
            Self::Idle | Self::Complete => None,
        }
    }

    /// Whether options may be selected in this state. Selection is locked
    /// while text is typing or an acknowledgement is pending.
    pub fn accepts_answers(&self) -> bool {
        matches!(self, Self::AwaitingAnswer(_))
    }

    /// Number of accepted answers implied by this state, for the progress
    /// fraction.
    pub fn answered(&self, len: usize) -> usize {
        match self {
            Self::Idle => 0,
            Self::Asking(n) | Self::AwaitingAnswer(n) => *n,
            Self::Acknowledging(n) => n + 1,
            Self::Complete => len,
        }
    }
}

impl Default for DialogueState {
    fn default() -> Self {
        Self::Idle
    }
}

impl std::fmt::Display for DialogueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Asking(n) => write!(f, "asking({n})"),
            Self::AwaitingAnswer(n) => write!(f, "awaiting_answer({n})"),
            Self::Acknowledging(n) => write!(f, "acknowledging({n})"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEN: usize = 7;

    #[test]
    fn walks_one_question() {
        use DialogueState::*;
        assert!(Idle.can_transition_to(Asking(0), LEN));
        assert!(Asking(0).can_transition_to(AwaitingAnswer(0), LEN));
        assert!(AwaitingAnswer(0).can_transition_to(Acknowledging(0), LEN));
        assert!(Acknowledging(0).can_transition_to(Asking(1), LEN));
    }

    #[test]
    fn completes_after_last_acknowledgement() {
        use DialogueState::*;
        assert!(Acknowledging(LEN - 1).can_transition_to(Complete, LEN));
        assert!(!Acknowledging(LEN - 1).can_transition_to(Asking(LEN), LEN));
        assert!(!Acknowledging(2).can_transition_to(Complete, LEN));
    }

    #[test]
    fn rejects_skips_and_backward_moves() {
        use DialogueState::*;
        assert!(!Idle.can_transition_to(Asking(1), LEN));
        assert!(!Idle.can_transition_to(AwaitingAnswer(0), LEN));
        assert!(!Asking(0).can_transition_to(AwaitingAnswer(1), LEN));
        assert!(!AwaitingAnswer(3).can_transition_to(Acknowledging(2), LEN));
        assert!(!Acknowledging(1).can_transition_to(Asking(1), LEN));
        assert!(!Acknowledging(1).can_transition_to(Asking(3), LEN));
        assert!(!Complete.can_transition_to(Asking(0), LEN));
        assert!(!AwaitingAnswer(0).can_transition_to(AwaitingAnswer(0), LEN));
    }

    #[test]
    fn rejects_out_of_range_indices() {
        use DialogueState::*;
        assert!(!Asking(LEN).can_transition_to(AwaitingAnswer(LEN), LEN));
        assert!(!Acknowledging(LEN - 1).can_transition_to(Asking(LEN), LEN));
        assert!(!Idle.can_transition_to(Asking(0), 0));
    }

    #[test]
    fn answers_only_accepted_while_awaiting() {
        use DialogueState::*;
        assert!(AwaitingAnswer(2).accepts_answers());
        assert!(!Idle.accepts_answers());
        assert!(!Asking(2).accepts_answers());
        assert!(!Acknowledging(2).accepts_answers());
        assert!(!Complete.accepts_answers());
    }

    #[test]
    fn answered_counts_toward_progress() {
        use DialogueState::*;
        assert_eq!(Idle.answered(LEN), 0);
        assert_eq!(Asking(3).answered(LEN), 3);
        assert_eq!(AwaitingAnswer(3).answered(LEN), 3);
        assert_eq!(Acknowledging(3).answered(LEN), 4);
        assert_eq!(Complete.answered(LEN), LEN);
    }

    #[test]
    fn serde_roundtrip() {
        let state = DialogueState::Acknowledging(4);
        let json = serde_json::to_string(&state).unwrap();
        let parsed: DialogueState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
