//! Content resolution — pure functions mapping the profile to personalized
//! copy.
//!
//! Every function here is total over both gender branches: for any profile,
//! the returned copy is non-empty and fully substituted. Missing answers
//! degrade to [`NOT_SPECIFIED`] in display rows, never to an error.

pub mod diagnosis;
pub mod offer;
pub mod window;

use crate::profile::{Gender, Profile};
use crate::script::QuestionDef;

/// Fallback literal for profile fields that were never collected.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Resolve a question's acknowledgement for the collected gender.
///
/// Before gender is known (only possible for the gender question itself,
/// where both branches describe the just-given answer) the male branch is
/// used, matching the option-label fallback.
pub fn acknowledgement(question: &QuestionDef, gender: Option<Gender>) -> &'static str {
    match gender.unwrap_or(Gender::Male) {
        Gender::Male => question.ack_male,
        Gender::Female => question.ack_female,
    }
}

/// The four-row situation summary shown in the diagnosis and offer sections.
pub fn summary_rows(profile: &Profile) -> [(&'static str, String); 4] {
    let gender = profile.gender.unwrap_or(Gender::Male);
    [
        (
            "Time",
            profile
                .time_apart
                .map(|t| t.label().to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        ),
        (
            "Who ended it",
            profile
                .who_ended
                .map(|w| w.label(gender).to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        ),
        (
            "Contact",
            profile
                .contact_status
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        ),
        (
            "Commitment",
            profile
                .commitment
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Answer, TimeApart};
    use crate::script::script;

    #[test]
    fn acknowledgement_branches_by_gender() {
        let q = &script()[1];
        let male = acknowledgement(q, Some(Gender::Male));
        let female = acknowledgement(q, Some(Gender::Female));
        assert!(male.contains("her"));
        assert!(female.contains("his"));
        assert_ne!(male, female);
    }

    #[test]
    fn summary_rows_fall_back_to_not_specified() {
        let rows = summary_rows(&Profile::default());
        for (_, value) in &rows {
            assert_eq!(value, NOT_SPECIFIED);
        }
    }

    #[test]
    fn summary_rows_show_collected_labels() {
        let mut profile = Profile::default();
        profile.apply(Answer::TimeApart(TimeApart::OneToFourWeeks), 2, "q2");
        let rows = summary_rows(&profile);
        assert_eq!(rows[0].1, "1-4 WEEKS");
        assert_eq!(rows[1].1, NOT_SPECIFIED);
    }
}
