//! Diagnosis-phase copy: the personalized breakdown of why the relationship
//! ended and what the profile says about the road back.

use crate::profile::{ContactStatus, Gender, Profile, TimeApart, WhoEnded};

/// Section title over the diagnosis.
pub fn title(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Why She Left",
        Gender::Female => "Why He Left",
    }
}

/// Message shown while the Loading phase runs.
pub fn loading_message(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Generating your specific protocol to win her back...",
        Gender::Female => "Generating your specific protocol to win him back...",
    }
}

/// The composed diagnosis narrative.
///
/// Built from exhaustive matches over the collected answers; segments whose
/// answer is missing are simply omitted. The opening and closing lines are
/// always present, so the narrative is never empty.
pub fn narrative(profile: &Profile) -> String {
    let gender = profile.gender.unwrap_or(Gender::Male);
    let ex_subject = gender.ex_subject_upper();
    let ex_object = gender.ex_object();
    let ex_possessive = gender.ex_possessive();

    let mut segments: Vec<String> = vec!["It wasn't because of lack of love.".to_string()];

    let intro = match profile.who_ended {
        Some(WhoEnded::Ex) => format!(
            "Based on the fact that {ex_subject} decided to end the relationship, we \
understand there was a deterioration in the \"value switches\" that {ex_object} perceived \
in you."
        ),
        Some(WhoEnded::Me) => format!(
            "Considering that you were the one who ended it, the challenge now is to \
reverse the feeling of rejection that {ex_object} processed, transforming it into a new \
opportunity."
        ),
        Some(WhoEnded::Mutual) => "Considering that the decision was mutual, the challenge \
now is to identify if there's still genuine interest from both sides and rebuild the \
attraction from scratch."
            .to_string(),
        None => "Considering the context of the breakup, the challenge now is to \
understand the emotional dynamics that led to this point and reverse them strategically."
            .to_string(),
    };
    segments.push(intro);

    if let Some(time_apart) = profile.time_apart {
        let urgency = match time_apart {
            TimeApart::UnderOneWeek | TimeApart::OneToFourWeeks => format!(
                "You're in the IDEAL time window. {ex_subject}'s brain still has chemical \
traces of your presence, which makes reconnection easier if you act now."
            ),
            TimeApart::OneToSixMonths | TimeApart::OverSixMonths => format!(
                "Although time has passed ({}), neuroscience explains that emotional \
memories can be reactivated through the right stimuli.",
                time_apart.label()
            ),
        };
        segments.push(urgency);
    }

    if let Some(contact) = profile.contact_status {
        let insight = if contact.is_silent() {
            "The fact that there's no contact is, ironically, your biggest advantage. \
We're in the \"cortisol spike cleanup\" phase, preparing the ground for an impactful \
return."
                .to_string()
        } else {
            format!(
                "The current contact indicates that the emotional thread hasn't been cut, \
but we need to be careful not to saturate {ex_possessive} dopamine system with \
desperation."
            )
        };
        segments.push(insight);
    }

    segments.push(format!(
        "The key is not to beg, but to understand {ex_possessive} psychology and act \
strategically. In the next step, I'm going to reveal EXACTLY the scientific step-by-step \
so that {ex_object} feels that you ARE the right person."
    ));

    segments.join("\n\n")
}

/// Empathy line tailored to the separation timing and initiative.
pub fn emotional_validation(profile: &Profile) -> String {
    let gender = profile.gender.unwrap_or(Gender::Male);
    let ex_subject = gender.ex_subject();

    let mut validation = match profile.time_apart {
        Some(TimeApart::UnderOneWeek) => format!(
            "Your separation is recent. That means there's still a window of opportunity \
where {ex_subject} thinks about you constantly. "
        ),
        Some(TimeApart::OverSixMonths) => "Time has passed, but that doesn't mean it's \
impossible. There are psychological patterns that work even after months. "
            .to_string(),
        _ => format!(
            "The time that has passed is crucial. You're in a phase where {ex_subject} \
still has fresh memories, but the patterns are changing. "
        ),
    };

    match profile.who_ended {
        Some(WhoEnded::Ex) => {
            validation.push_str(&format!(
                "And the fact that {ex_subject} ended it is actually an advantage, because \
it means {ex_subject} had to make a difficult decision and that leaves an emotional \
imprint."
            ));
        }
        Some(WhoEnded::Me) => {
            let ex_subject_upper = gender.ex_subject_upper();
            validation.push_str(&format!(
                "And the fact that you ended it completely changes the dynamic. \
{ex_subject_upper} might be waiting for you to make the first move."
            ));
        }
        Some(WhoEnded::Mutual) | None => {}
    }

    validation
}

/// One-line read on the current contact situation.
pub fn situation_insight(contact: ContactStatus, gender: Gender) -> String {
    let ex_subject = gender.ex_subject();
    match contact {
        ContactStatus::NoContact => "No contact can be strategic, but it can also be \
creating distance. You need to know WHEN to break it."
            .to_string(),
        ContactStatus::IgnoringMe => format!(
            "If {ex_subject} ignores you, there's a specific psychological reason. It's \
not personal, it's a defense mechanism we can reverse."
        ),
        ContactStatus::Blocked => "Being blocked seems definitive, but it's an extreme \
emotional reaction that indicates there are still strong feelings."
            .to_string(),
        ContactStatus::NecessaryOnly => format!(
            "Minimal communication is a sign that {ex_subject} is building emotional \
barriers, but still keeps a channel open."
        ),
        ContactStatus::TalkSometimes => "Occasional communication is a golden \
opportunity. You're in the perfect phase to apply the protocol."
            .to_string(),
        ContactStatus::Friends => "\"Friendship\" after a breakup is an emotional \
minefield. It can be your biggest advantage or your worst enemy."
            .to_string(),
        ContactStatus::IntimateEncounters => "Intimate encounters indicate that physical \
attraction is still alive, but the deep emotional connection is missing."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Answer;

    fn full_profile(gender: Gender) -> Profile {
        let mut p = Profile::default();
        p.apply(Answer::Gender(gender), 1, "q1");
        p.apply(Answer::TimeApart(TimeApart::OneToFourWeeks), 2, "q2");
        p.apply(Answer::WhoEnded(WhoEnded::Ex), 3, "q3");
        p.apply(
            Answer::ContactStatus(ContactStatus::NoContact),
            5,
            "q5",
        );
        p
    }

    #[test]
    fn titles_branch_by_gender() {
        assert_eq!(title(Gender::Male), "Why She Left");
        assert_eq!(title(Gender::Female), "Why He Left");
    }

    #[test]
    fn narrative_nonempty_for_all_branches() {
        for gender in Gender::ALL {
            let text = narrative(&full_profile(gender));
            assert!(!text.is_empty());
            assert!(!text.contains('{'), "no unresolved placeholders: {text}");
            assert!(!text.contains('}'));
        }
    }

    #[test]
    fn narrative_survives_empty_profile() {
        let text = narrative(&Profile::default());
        assert!(text.starts_with("It wasn't because of lack of love."));
        assert!(text.contains("context of the breakup"));
    }

    #[test]
    fn male_branch_uses_her_pronouns() {
        let text = narrative(&full_profile(Gender::Male));
        assert!(text.contains("She decided") || text.contains("She's"));
        assert!(text.contains("her "));
        assert!(!text.contains(" his "));
    }

    #[test]
    fn female_branch_uses_his_pronouns() {
        let text = narrative(&full_profile(Gender::Female));
        assert!(text.contains("He decided") || text.contains("He's"));
        assert!(text.contains("his "));
    }

    #[test]
    fn urgency_interpolates_label_when_older() {
        let mut p = full_profile(Gender::Male);
        p.time_apart = Some(TimeApart::OverSixMonths);
        let text = narrative(&p);
        assert!(text.contains("MORE THAN 6 MONTHS"));
    }

    #[test]
    fn validation_nonempty_for_every_combination() {
        for gender in Gender::ALL {
            for time_apart in TimeApart::ALL {
                for who in WhoEnded::ALL {
                    let mut p = Profile::default();
                    p.apply(Answer::Gender(gender), 1, "q1");
                    p.apply(Answer::TimeApart(time_apart), 2, "q2");
                    p.apply(Answer::WhoEnded(who), 3, "q3");
                    let text = emotional_validation(&p);
                    assert!(!text.is_empty());
                    assert!(!text.contains('{'));
                }
            }
        }
    }

    #[test]
    fn situation_insight_total_over_contact_enum() {
        for gender in Gender::ALL {
            for contact in ContactStatus::ALL {
                let text = situation_insight(contact, gender);
                assert!(!text.is_empty(), "{contact:?} must have an insight");
            }
        }
    }
}
