//! Offer-phase copy: completion badge, value stack, features, and the
//! purchase call-to-action.

use crate::profile::Gender;

/// Price strings shown in the offer. Display copy, not money math.
pub const TOTAL_VALUE: &str = "$165";
pub const LIST_PRICE: &str = "$123";
pub const TODAY_PRICE: &str = "$17.00";
pub const DISCOUNT_LABEL: &str = "86% OFF - TODAY ONLY";

/// Offer section title.
pub fn title(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Your Plan to Win Her Back",
        Gender::Female => "Your Plan to Win Him Back",
    }
}

/// The purchase call-to-action label.
pub fn cta(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "YES, I WANT MY PLAN TO WIN HER BACK",
        Gender::Female => "YES, I WANT MY PLAN TO WIN HIM BACK",
    }
}

/// Badge shown when the dialogue reaches 100% progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionBadge {
    pub title: &'static str,
    pub subtitle: String,
}

pub fn completion_badge(gender: Gender) -> CompletionBadge {
    let ex_subject = gender.ex_subject();
    CompletionBadge {
        title: "YOUR ANALYSIS IS READY!",
        subtitle: format!(
            "Discover exactly why {ex_subject} left and the scientific step-by-step so \
that {ex_subject} WANTS to come back"
        ),
    }
}

/// The feature list under the offer.
pub fn features(gender: Gender) -> Vec<String> {
    let ex_object_title = gender.ex_object_title();
    let ex_object = gender.ex_object();
    vec![
        format!("MODULE 1: How to Talk to {ex_object_title} (Days 1-7)"),
        format!("MODULE 2: How to Meet {ex_object_title} (Days 8-14)"),
        format!("MODULE 3: How to Win {ex_object} Back (Days 15-21)"),
        format!("MODULE 4: Emergency Protocol (If {ex_object} is with someone else)"),
        "Special Guide: The 3 Phases of 72 Hours".to_string(),
        "Bonuses: Conversation Scripts + Action Plans".to_string(),
        "Guarantee: 30 days or your money back".to_string(),
    ]
}

/// One line of the what-you-get value breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueItem {
    pub label: String,
    pub price: &'static str,
}

/// The itemized value stack shown above the price.
pub fn value_stack(gender: Gender) -> Vec<ValueItem> {
    let ex_object_title = gender.ex_object_title();
    vec![
        ValueItem {
            label: format!("Module 1: How To Talk To {ex_object_title}"),
            price: "$27",
        },
        ValueItem {
            label: "Module 2: How To Meet Up".to_string(),
            price: "$27",
        },
        ValueItem {
            label: format!("Module 3: How To Win {ex_object_title} Back"),
            price: "$47",
        },
        ValueItem {
            label: "Module 4: Emergency Protocol".to_string(),
            price: "$37",
        },
        ValueItem {
            label: "72-Hour Special Guide".to_string(),
            price: "$27",
        },
        ValueItem {
            label: "Bonus: Scripts + Action Plans".to_string(),
            price: "FREE",
        },
    ]
}
