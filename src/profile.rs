//! Profile data model — collected answers plus derived personalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The respondent's gender. Exactly two values; controls every downstream
/// content branch (the ex-partner's pronouns are the opposite branch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Subject pronoun for the ex-partner ("she" / "he").
    pub fn ex_subject(&self) -> &'static str {
        match self {
            Self::Male => "she",
            Self::Female => "he",
        }
    }

    /// Capitalized subject pronoun for the ex-partner ("She" / "He").
    pub fn ex_subject_upper(&self) -> &'static str {
        match self {
            Self::Male => "She",
            Self::Female => "He",
        }
    }

    /// Object pronoun for the ex-partner ("her" / "him").
    pub fn ex_object(&self) -> &'static str {
        match self {
            Self::Male => "her",
            Self::Female => "him",
        }
    }

    /// Possessive for the ex-partner ("her" / "his").
    pub fn ex_possessive(&self) -> &'static str {
        match self {
            Self::Male => "her",
            Self::Female => "his",
        }
    }

    /// Object pronoun for the respondent as the ex would use it
    /// ("him" / "her").
    pub fn self_object(&self) -> &'static str {
        match self {
            Self::Male => "him",
            Self::Female => "her",
        }
    }

    /// Title-case object pronoun for the ex-partner ("Her" / "Him").
    pub fn ex_object_title(&self) -> &'static str {
        match self {
            Self::Male => "Her",
            Self::Female => "Him",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Time since the separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeApart {
    UnderOneWeek,
    OneToFourWeeks,
    OneToSixMonths,
    OverSixMonths,
}

impl TimeApart {
    pub const ALL: [TimeApart; 4] = [
        TimeApart::UnderOneWeek,
        TimeApart::OneToFourWeeks,
        TimeApart::OneToSixMonths,
        TimeApart::OverSixMonths,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::UnderOneWeek => "LESS THAN 1 WEEK",
            Self::OneToFourWeeks => "1-4 WEEKS",
            Self::OneToSixMonths => "1-6 MONTHS",
            Self::OverSixMonths => "MORE THAN 6 MONTHS",
        }
    }

    /// Whether the breakup is inside the short "ideal window".
    pub fn is_recent(&self) -> bool {
        matches!(self, Self::UnderOneWeek | Self::OneToFourWeeks)
    }
}

/// Who took the initiative to end the relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhoEnded {
    /// The ex-partner ended it ("SHE ENDED IT" / "HE ENDED IT").
    Ex,
    Me,
    Mutual,
}

impl WhoEnded {
    pub const ALL: [WhoEnded; 3] = [WhoEnded::Ex, WhoEnded::Me, WhoEnded::Mutual];

    pub fn label(&self, gender: Gender) -> &'static str {
        match self {
            Self::Ex => match gender {
                Gender::Male => "SHE ENDED IT",
                Gender::Female => "HE ENDED IT",
            },
            Self::Me => "I ENDED IT",
            Self::Mutual => "MUTUAL DECISION",
        }
    }
}

/// How long the relationship lasted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipLength {
    UnderSixMonths,
    SixMonthsToYear,
    OneToThreeYears,
    OverThreeYears,
}

impl RelationshipLength {
    pub const ALL: [RelationshipLength; 4] = [
        RelationshipLength::UnderSixMonths,
        RelationshipLength::SixMonthsToYear,
        RelationshipLength::OneToThreeYears,
        RelationshipLength::OverThreeYears,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::UnderSixMonths => "LESS THAN 6 MONTHS",
            Self::SixMonthsToYear => "6 MONTHS-1 YEAR",
            Self::OneToThreeYears => "1-3 YEARS",
            Self::OverThreeYears => "MORE THAN 3 YEARS",
        }
    }
}

/// Current level of contact with the ex-partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    NoContact,
    IgnoringMe,
    Blocked,
    NecessaryOnly,
    TalkSometimes,
    Friends,
    IntimateEncounters,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 7] = [
        ContactStatus::NoContact,
        ContactStatus::IgnoringMe,
        ContactStatus::Blocked,
        ContactStatus::NecessaryOnly,
        ContactStatus::TalkSometimes,
        ContactStatus::Friends,
        ContactStatus::IntimateEncounters,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoContact => "NO CONTACT",
            Self::IgnoringMe => "IGNORING ME",
            Self::Blocked => "BLOCKED",
            Self::NecessaryOnly => "ONLY NECESSARY TOPICS",
            Self::TalkSometimes => "WE TALK SOMETIMES",
            Self::Friends => "WE ARE FRIENDS",
            Self::IntimateEncounters => "INTIMATE ENCOUNTERS",
        }
    }

    /// Whether the channel to the ex is effectively closed.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::NoContact | Self::IgnoringMe | Self::Blocked)
    }
}

/// Whether the ex-partner is seeing someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExStatus {
    Single,
    Unsure,
    CasualDating,
    SeriousRelationship,
    MultiplePeople,
}

impl ExStatus {
    pub const ALL: [ExStatus; 5] = [
        ExStatus::Single,
        ExStatus::Unsure,
        ExStatus::CasualDating,
        ExStatus::SeriousRelationship,
        ExStatus::MultiplePeople,
    ];

    pub fn label(&self, gender: Gender) -> &'static str {
        match self {
            Self::Single => match gender {
                Gender::Male => "SHE'S SINGLE",
                Gender::Female => "HE'S SINGLE",
            },
            Self::Unsure => "I'M NOT SURE",
            Self::CasualDating => "CASUAL DATING",
            Self::SeriousRelationship => "SERIOUS RELATIONSHIP",
            Self::MultiplePeople => "MULTIPLE PEOPLE",
        }
    }
}

/// Self-reported commitment to getting the relationship back, on a 1-4 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentLevel {
    Unsure,
    Considering,
    Strong,
    AllIn,
}

impl CommitmentLevel {
    pub const ALL: [CommitmentLevel; 4] = [
        CommitmentLevel::Unsure,
        CommitmentLevel::Considering,
        CommitmentLevel::Strong,
        CommitmentLevel::AllIn,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unsure => "1 - NOT SURE",
            Self::Considering => "2 - CONSIDERING IT",
            Self::Strong => "3 - I WANT IT A LOT",
            Self::AllIn => "4 - I WANT IT WITH ALL MY HEART",
        }
    }
}

/// The profile field a question writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKey {
    Gender,
    TimeApart,
    WhoEnded,
    RelationshipLength,
    ContactStatus,
    ExStatus,
    Commitment,
}

impl std::fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Gender => "gender",
            Self::TimeApart => "time_apart",
            Self::WhoEnded => "who_ended",
            Self::RelationshipLength => "relationship_length",
            Self::ContactStatus => "contact_status",
            Self::ExStatus => "ex_status",
            Self::Commitment => "commitment",
        };
        f.write_str(s)
    }
}

/// One typed answer, tagged with the profile field it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum Answer {
    Gender(Gender),
    TimeApart(TimeApart),
    WhoEnded(WhoEnded),
    RelationshipLength(RelationshipLength),
    ContactStatus(ContactStatus),
    ExStatus(ExStatus),
    Commitment(CommitmentLevel),
}

impl Answer {
    pub fn key(&self) -> ProfileKey {
        match self {
            Self::Gender(_) => ProfileKey::Gender,
            Self::TimeApart(_) => ProfileKey::TimeApart,
            Self::WhoEnded(_) => ProfileKey::WhoEnded,
            Self::RelationshipLength(_) => ProfileKey::RelationshipLength,
            Self::ContactStatus(_) => ProfileKey::ContactStatus,
            Self::ExStatus(_) => ProfileKey::ExStatus,
            Self::Commitment(_) => ProfileKey::Commitment,
        }
    }

    /// Display label for the option button. Gender-variant labels fall back
    /// to the male branch when gender has not been collected yet, which can
    /// only happen for the gender question itself (its labels are flat).
    pub fn label(&self, gender: Option<Gender>) -> &'static str {
        let gender = gender.unwrap_or(Gender::Male);
        match self {
            Self::Gender(g) => g.label(),
            Self::TimeApart(t) => t.label(),
            Self::WhoEnded(w) => w.label(gender),
            Self::RelationshipLength(r) => r.label(),
            Self::ContactStatus(c) => c.label(),
            Self::ExStatus(e) => e.label(gender),
            Self::Commitment(c) => c.label(),
        }
    }
}

/// One accepted answer in question order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: u8,
    pub question: String,
    pub answer: String,
}

/// The collected profile for one session.
///
/// Persisted as JSON under `keys::PROFILE`. Fields are set at most once
/// (re-applying a key is a logged no-op) and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_apart: Option<TimeApart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who_ended: Option<WhoEnded>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_length: Option<RelationshipLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_status: Option<ContactStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ex_status: Option<ExStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commitment: Option<CommitmentLevel>,
    /// Accepted answers in question order.
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Whether a field has been collected.
    pub fn is_set(&self, key: ProfileKey) -> bool {
        match key {
            ProfileKey::Gender => self.gender.is_some(),
            ProfileKey::TimeApart => self.time_apart.is_some(),
            ProfileKey::WhoEnded => self.who_ended.is_some(),
            ProfileKey::RelationshipLength => self.relationship_length.is_some(),
            ProfileKey::ContactStatus => self.contact_status.is_some(),
            ProfileKey::ExStatus => self.ex_status.is_some(),
            ProfileKey::Commitment => self.commitment.is_some(),
        }
    }

    /// Apply one typed answer, appending its answer record.
    ///
    /// Returns `false` without mutating anything if the field was already
    /// set — a field is written exactly once per session.
    pub fn apply(&mut self, answer: Answer, question_id: u8, question: &str) -> bool {
        if self.is_set(answer.key()) {
            tracing::warn!(key = %answer.key(), "Ignoring repeat answer for already-set field");
            return false;
        }
        let label = answer.label(self.gender).to_string();
        match answer {
            Answer::Gender(v) => self.gender = Some(v),
            Answer::TimeApart(v) => self.time_apart = Some(v),
            Answer::WhoEnded(v) => self.who_ended = Some(v),
            Answer::RelationshipLength(v) => self.relationship_length = Some(v),
            Answer::ContactStatus(v) => self.contact_status = Some(v),
            Answer::ExStatus(v) => self.ex_status = Some(v),
            Answer::Commitment(v) => self.commitment = Some(v),
        }
        self.answers.push(AnswerRecord {
            question_id,
            question: question.to_string(),
            answer: label,
        });
        true
    }

    /// Number of accepted answers.
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// Mark the dialogue finished.
    pub fn mark_complete(&mut self) {
        if self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
    }
}
