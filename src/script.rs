//! The fixed question script.
//!
//! Seven questions, defined once, immutable at runtime. Option sets are
//! derived from the closed answer enums in [`crate::profile`]; the
//! acknowledgement copy carries a branch per gender.

use crate::profile::{
    Answer, CommitmentLevel, ContactStatus, ExStatus, Gender, ProfileKey, RelationshipLength,
    TimeApart, WhoEnded,
};

/// The analyst's opening message, typed out before the start action.
pub const GREETING: &str = "Hi. I'm Dr. Sarah Mitchell, specialist in relationship recovery \
through behavioral psychology. My system detected your search for answers. I'm here to \
analyze your case.";

/// Label of the explicit start action.
pub const START_ACTION: &str = "START ANALYSIS";

/// The closing message typed after the final acknowledgement.
pub const CLOSING: &str = "Analysis complete. Your personalized plan is ready to be \
revealed. Click below to access it.";

/// Label of the completion call-to-action.
pub const COMPLETION_ACTION: &str = "SEE MY PERSONALIZED PLAN";

/// One scripted question.
pub struct QuestionDef {
    /// Ordinal id, 1-based, stable across the script.
    pub id: u8,
    /// Prompt text, typed out by the reveal primitive.
    pub prompt: &'static str,
    /// Profile field this question writes.
    pub key: ProfileKey,
    pub(crate) ack_male: &'static str,
    pub(crate) ack_female: &'static str,
}

impl QuestionDef {
    /// Resolve the option set at ask time. Labels that vary by gender use
    /// the profile's collected gender (see [`Answer::label`]).
    pub fn options(&self) -> Vec<Answer> {
        match self.key {
            ProfileKey::Gender => Gender::ALL.iter().copied().map(Answer::Gender).collect(),
            ProfileKey::TimeApart => {
                TimeApart::ALL.iter().copied().map(Answer::TimeApart).collect()
            }
            ProfileKey::WhoEnded => WhoEnded::ALL.iter().copied().map(Answer::WhoEnded).collect(),
            ProfileKey::RelationshipLength => RelationshipLength::ALL
                .iter()
                .copied()
                .map(Answer::RelationshipLength)
                .collect(),
            ProfileKey::ContactStatus => ContactStatus::ALL
                .iter()
                .copied()
                .map(Answer::ContactStatus)
                .collect(),
            ProfileKey::ExStatus => ExStatus::ALL.iter().copied().map(Answer::ExStatus).collect(),
            ProfileKey::Commitment => CommitmentLevel::ALL
                .iter()
                .copied()
                .map(Answer::Commitment)
                .collect(),
        }
    }
}

/// The script, in ask order.
pub fn script() -> &'static [QuestionDef] {
    &SCRIPT
}

static SCRIPT: [QuestionDef; 7] = [
    QuestionDef {
        id: 1,
        prompt: "To calibrate the analysis, I need to know: what is your gender?",
        key: ProfileKey::Gender,
        ack_male: "Perfect. I'm going to calibrate the analysis based on the specific \
patterns of female behavior after a breakup. Every answer you give will help me understand \
exactly what's happening with her.",
        ack_female: "Perfect. I'm going to calibrate the analysis based on the specific \
patterns of male behavior after a breakup. Every answer you give will help me understand \
exactly what's happening with him.",
    },
    QuestionDef {
        id: 2,
        prompt: "Understood. Now, how long has it been since you separated?",
        key: ProfileKey::TimeApart,
        ack_male: "Recorded. Time is crucial. During this period, her brain goes through \
specific chemical phases. The more recent the separation, the more active her emotional \
memory. We're going to use that strategically.",
        ack_female: "Recorded. Time is crucial. During this period, his brain goes through \
specific chemical phases. The more recent the separation, the more active his emotional \
memory. We're going to use that strategically.",
    },
    QuestionDef {
        id: 3,
        prompt: "Good. And how was the separation? Who took the initiative?",
        key: ProfileKey::WhoEnded,
        ack_male: "I understand. When she makes the decision to end things, it means \
something activated an emotional \"switch\" in her brain. The good news: that switch can \
be reversed if you know exactly which buttons to press. And that's what we're going to \
discover.",
        ack_female: "I understand. When he makes the decision to end things, it means \
something activated an emotional \"switch\" in his brain. The good news: that switch can \
be reversed if you know exactly which buttons to press. And that's what we're going to \
discover.",
    },
    QuestionDef {
        id: 4,
        prompt: "Recorded. How long were you together?",
        key: ProfileKey::RelationshipLength,
        ack_male: "Perfect. The relationship time defines how many \"emotional anchors\" \
you created in her memory. The longer together, the deeper the neural connections. That \
works in your favor if you use the right protocol.",
        ack_female: "Perfect. The relationship time defines how many \"emotional anchors\" \
you created in his memory. The longer together, the deeper the neural connections. That \
works in your favor if you use the right protocol.",
    },
    QuestionDef {
        id: 5,
        prompt: "What is your current situation with your ex?",
        key: ProfileKey::ContactStatus,
        ack_male: "Key information. The current level of contact reveals exactly what \
emotional phase she's in. Each scenario requires a different protocol. If there's no \
contact, we use one strategy. If there's communication, we use a completely different one.",
        ack_female: "Key information. The current level of contact reveals exactly what \
emotional phase he's in. Each scenario requires a different protocol. If there's no \
contact, we use one strategy. If there's communication, we use a completely different one.",
    },
    QuestionDef {
        id: 6,
        prompt: "Analyzing... Now, crucial information: is your ex already with someone else?",
        key: ProfileKey::ExStatus,
        ack_male: "Understood. This changes the map, but not the destination. Even if \
she's with someone, there are specific psychological protocols that work. In fact, in \
some cases, this can be used strategically in your favor.",
        ack_female: "Understood. This changes the map, but not the destination. Even if \
he's with someone, there are specific psychological protocols that work. In fact, in some \
cases, this can be used strategically in your favor.",
    },
    QuestionDef {
        id: 7,
        prompt: "Last question to complete the analysis: on a scale of 1 to 4, how much \
do you want to get this relationship back?",
        key: ProfileKey::Commitment,
        ack_male: "Analysis complete! Your commitment level defines the intensity of the \
protocol. The more committed you are, the more powerful the techniques I'll reveal to \
you. Now I have everything I need to show you the exact path to win her back.",
        ack_female: "Analysis complete! Your commitment level defines the intensity of \
the protocol. The more committed you are, the more powerful the techniques I'll reveal \
to you. Now I have everything I need to show you the exact path to win him back.",
    },
];
