//! Classification of a voice command into user feedback

use serde::Serialize;

use super::resolver::{Interpretation, MatchedItem};
use super::speech::SpeechError;

/// Phrase suggested when a command could not be parsed at all.
pub const EXAMPLE_COMMAND: &str = "Add 2 breads and 1 cake";

/// Mutually exclusive results of one voice command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VoiceOutcome {
    /// Every intent resolved
    Added { items: Vec<MatchedItem> },
    /// Some intents resolved, the rest are listed in `missing`
    PartiallyAdded { items: Vec<MatchedItem>, missing: Vec<String> },
    /// Intents were parsed but none resolved
    NoMatch { missing: Vec<String> },
    /// The transcript produced no intents
    NotUnderstood,
    /// Speech input failed before any parsing happened
    Unavailable { error: SpeechError },
}

impl From<Interpretation> for VoiceOutcome {
    fn from(interpretation: Interpretation) -> Self {
        let Interpretation { matched, unmatched } = interpretation;
        match (matched.is_empty(), unmatched.is_empty()) {
            (true, true) => Self::NotUnderstood,
            (false, true) => Self::Added { items: matched },
            (false, false) => Self::PartiallyAdded { items: matched, missing: unmatched },
            (true, false) => Self::NoMatch { missing: unmatched },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoiceNotification {
    pub level: NotificationLevel,
    pub message: String,
}

impl VoiceNotification {
    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }
}

impl VoiceOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::PartiallyAdded { .. } => "partially_added",
            Self::NoMatch { .. } => "no_match",
            Self::NotUnderstood => "not_understood",
            Self::Unavailable { .. } => "unavailable",
        }
    }

    /// True when at least one item reached the cart.
    pub fn added_anything(&self) -> bool {
        matches!(self, Self::Added { .. } | Self::PartiallyAdded { .. })
    }

    pub fn added_items(&self) -> &[MatchedItem] {
        match self {
            Self::Added { items } | Self::PartiallyAdded { items, .. } => items,
            _ => &[],
        }
    }

    /// Feedback in display order. A partial result carries a success and a warning.
    pub fn notifications(&self) -> Vec<VoiceNotification> {
        match self {
            Self::Added { items } => vec![added_notification(items)],
            Self::PartiallyAdded { items, missing } => vec![
                added_notification(items),
                VoiceNotification::new(
                    NotificationLevel::Warning,
                    format!("⚠️ Could not find: {}", missing.join(", ")),
                ),
            ],
            Self::NoMatch { missing } => vec![VoiceNotification::new(
                NotificationLevel::Error,
                format!("✗ No matching products found for: {}", missing.join(", ")),
            )],
            Self::NotUnderstood => vec![VoiceNotification::new(
                NotificationLevel::Error,
                format!("✗ Could not understand the command. Try saying \"{EXAMPLE_COMMAND}\""),
            )],
            Self::Unavailable { error } => {
                vec![VoiceNotification::new(NotificationLevel::Error, error.user_message())]
            }
        }
    }
}

fn added_notification(items: &[MatchedItem]) -> VoiceNotification {
    let total: u64 = items.iter().map(|item| u64::from(item.quantity)).sum();
    let listing = items
        .iter()
        .map(|item| format!("{}x {}", item.quantity, item.product.name))
        .collect::<Vec<_>>()
        .join(", ");
    let plural = if total > 1 { "s" } else { "" };

    VoiceNotification::new(
        NotificationLevel::Success,
        format!("✓ {total} item{plural} added to cart! ({listing})"),
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{NotificationLevel, VoiceOutcome};
    use crate::domain::product::Product;
    use crate::voice::resolver::{interpret, Interpretation};
    use crate::voice::speech::SpeechError;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("bread", "Bread", Decimal::new(40, 0)).expect("bread"),
            Product::new("cake", "Cake", Decimal::new(300, 0)).expect("cake"),
        ]
    }

    #[test]
    fn every_outcome_is_reachable() {
        let catalog = catalog();

        let added = VoiceOutcome::from(interpret("add 2 breads and a cake", &catalog));
        let partial = VoiceOutcome::from(interpret("add bread and jam", &catalog));
        let none = VoiceOutcome::from(interpret("add jam", &catalog));
        let not_understood = VoiceOutcome::from(interpret("please add to my cart", &catalog));

        assert_eq!(added.label(), "added");
        assert_eq!(partial.label(), "partially_added");
        assert_eq!(none.label(), "no_match");
        assert_eq!(not_understood, VoiceOutcome::NotUnderstood);
        assert!(added.added_anything() && partial.added_anything());
        assert!(!none.added_anything() && !not_understood.added_anything());
    }

    #[test]
    fn success_message_lists_items_and_total_quantity() {
        let outcome = VoiceOutcome::from(interpret("add 2 breads and 1 cake", &catalog()));

        let notifications = outcome.notifications();

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Success);
        assert_eq!(notifications[0].message, "✓ 3 items added to cart! (2x Bread, 1x Cake)");
    }

    #[test]
    fn single_item_message_is_singular() {
        let outcome = VoiceOutcome::from(interpret("add bread", &catalog()));

        assert_eq!(outcome.notifications()[0].message, "✓ 1 item added to cart! (1x Bread)");
    }

    #[test]
    fn partial_success_warns_about_missing_items() {
        let outcome = VoiceOutcome::from(interpret("add bread, jam and honey", &catalog()));

        let notifications = outcome.notifications();

        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].level, NotificationLevel::Success);
        assert_eq!(notifications[1].level, NotificationLevel::Warning);
        assert_eq!(notifications[1].message, "⚠️ Could not find: jam, honey");
    }

    #[test]
    fn total_mismatch_lists_every_search_term() {
        let outcome = VoiceOutcome::from(interpret("add jam and honey", &catalog()));

        let notifications = outcome.notifications();

        assert_eq!(notifications[0].level, NotificationLevel::Error);
        assert_eq!(notifications[0].message, "✗ No matching products found for: jam, honey");
    }

    #[test]
    fn empty_interpretation_suggests_an_example() {
        let outcome = VoiceOutcome::from(Interpretation::default());

        assert_eq!(
            outcome.notifications()[0].message,
            "✗ Could not understand the command. Try saying \"Add 2 breads and 1 cake\""
        );
    }

    #[test]
    fn unavailable_speech_uses_the_error_message() {
        let outcome = VoiceOutcome::Unavailable { error: SpeechError::PermissionDenied };

        assert_eq!(
            outcome.notifications()[0].message,
            "Microphone access is required to use voice search."
        );
        assert!(outcome.added_items().is_empty());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = VoiceOutcome::from(interpret("add jam", &catalog()));

        let value = serde_json::to_value(&outcome).expect("serialize outcome");

        assert_eq!(value["status"], "no_match");
        assert_eq!(value["missing"][0], "jam");
    }
}
