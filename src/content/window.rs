//! The 72-hour-window revelation copy.

use crate::profile::Gender;

/// The three sub-phases of the 72-hour cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    Hours0To24,
    Hours24To48,
    Hours48To72,
}

impl WindowPhase {
    pub const ALL: [WindowPhase; 3] = [
        WindowPhase::Hours0To24,
        WindowPhase::Hours24To48,
        WindowPhase::Hours48To72,
    ];

    pub fn heading(&self) -> &'static str {
        match self {
            Self::Hours0To24 => "PHASE 1 (0-24h)",
            Self::Hours24To48 => "PHASE 2 (24-48h)",
            Self::Hours48To72 => "PHASE 3 (48-72h)",
        }
    }
}

/// Section title over the window revelation.
pub const TITLE: &str = "THE 72-HOUR WINDOW";

/// The framing narrative for the 72-hour window.
pub fn narrative(gender: Gender) -> String {
    let ex_object = gender.ex_object();
    let ex_possessive = gender.ex_possessive();

    format!(
        "It doesn't matter if you separated 3 days ago or 3 months ago.\n\n\
Here's the truth that behavioral psychologists discovered:\n\n\
The human brain operates in 72-hour cycles.\n\n\
Every time you take a STRATEGIC ACTION, {ex_possessive} brain enters a new 72-hour cycle \
where everything can change.\n\n\
Here's what's crucial:\n\n\
In each of these 3 phases, there are CORRECT and INCORRECT actions.\n\n\
If you act correctly in each phase, {ex_object} seeks you out.\n\n\
If you act incorrectly, {ex_possessive} brain erases the attraction.\n\n\
Your personalized plan reveals EXACTLY what to do in each phase."
    )
}

/// Copy for one sub-phase of the cycle.
pub fn phase_text(gender: Gender, phase: WindowPhase) -> String {
    let ex_subject = gender.ex_subject();
    let ex_subject_upper = gender.ex_subject_upper();
    let ex_possessive = gender.ex_possessive();
    let self_object = gender.self_object();

    match phase {
        WindowPhase::Hours0To24 => format!(
            "{ex_subject_upper} receives the first signal that something has changed in \
you.\n\n\
{ex_subject_upper}'s brain abandons \"relief mode\" and activates \"curiosity mode\".\n\n\
{ex_subject_upper} starts to wonder: \"What's happening with {self_object}?\"\n\n\
DANGER: If you act incorrectly here, you confirm that {ex_subject} made the right \
decision."
        ),
        WindowPhase::Hours24To48 => format!(
            "{ex_subject_upper} starts to re-evaluate the memories {ex_subject} had \
\"archived\".\n\n\
Oxytocin (the attachment hormone) is reactivated.\n\n\
The good moments that {ex_subject} had \"forgotten\" come back to {ex_possessive} \
mind.\n\n\
DANGER: If you push too hard, {ex_subject} closes the cycle and blocks you permanently."
        ),
        WindowPhase::Hours48To72 => format!(
            "{ex_subject_upper} feels the need to \"close the cycle\" definitively.\n\n\
{ex_subject_upper}'s brain seeks emotional resolution.\n\n\
This is where you reappear strategically with the Reconnection Protocol.\n\n\
DANGER: 87% of people lose their ex in this phase for not knowing what to do."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrative_nonempty_both_branches() {
        for gender in Gender::ALL {
            let text = narrative(gender);
            assert!(!text.is_empty());
            assert!(!text.contains('{'));
        }
    }

    #[test]
    fn narrative_pronouns_branch() {
        assert!(narrative(Gender::Male).contains("her brain"));
        assert!(narrative(Gender::Female).contains("his brain"));
    }

    #[test]
    fn every_phase_has_copy_for_both_branches() {
        for gender in Gender::ALL {
            for phase in WindowPhase::ALL {
                let text = phase_text(gender, phase);
                assert!(!text.is_empty(), "{phase:?} must resolve for {gender}");
                assert!(!text.contains('{'));
                assert!(text.contains("DANGER"));
            }
        }
    }

    #[test]
    fn headings_cover_72_hours() {
        assert_eq!(WindowPhase::Hours0To24.heading(), "PHASE 1 (0-24h)");
        assert_eq!(WindowPhase::Hours48To72.heading(), "PHASE 3 (48-72h)");
    }
}
