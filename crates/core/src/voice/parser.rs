//! Transcript parsing into quantity/product intents

use serde::Serialize;

/// Stripped wherever they occur, including inside longer words.
const FILLER_WORDS: [&str; 6] = ["add", "to", "cart", "please", "the", "my"];

const QUANTITY_WORDS: [(&str, u32); 12] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("a", 1),
    ("an", 1),
];

/// One parsed `(quantity, product reference)` pair, before catalog resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoiceIntent {
    pub quantity: u32,
    pub search_text: String,
}

impl VoiceIntent {
    pub fn new(quantity: u32, search_text: impl Into<String>) -> Self {
        Self { quantity, search_text: search_text.into() }
    }
}

/// Parses a free-text command such as "add 2 breads and a cake". Never fails: text without any
/// recognizable structure yields an empty list.
pub fn parse_command(transcript: &str) -> Vec<VoiceIntent> {
    let lowered = transcript.trim().to_lowercase();
    let cleaned = collapse_whitespace(&strip_fillers(&lowered));

    split_segments(&cleaned).into_iter().map(parse_segment).collect()
}

fn strip_fillers(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        match FILLER_WORDS.iter().find(|filler| rest.starts_with(**filler)) {
            Some(filler) => {
                output.push(' ');
                rest = &rest[filler.len()..];
            }
            None => {
                output.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    output
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Segments are separated by `", "` or `" and "`; blank segments are dropped.
fn split_segments(text: &str) -> Vec<&str> {
    text.split(',')
        .flat_map(|piece| piece.trim_start().split(" and "))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn parse_segment(segment: &str) -> VoiceIntent {
    let (quantity, reference) = split_quantity(segment);
    VoiceIntent { quantity, search_text: singularize(reference) }
}

/// A leading quantity is only taken when some product text follows it.
fn split_quantity(segment: &str) -> (u32, &str) {
    let digits_end = segment.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(segment.len());
    if digits_end > 0 {
        let rest = segment[digits_end..].trim_start();
        if rest.is_empty() {
            return (1, segment);
        }
        let quantity = segment[..digits_end]
            .parse::<u32>()
            .ok()
            .filter(|quantity| *quantity > 0)
            .unwrap_or(1);
        return (quantity, rest);
    }

    if let Some((word, rest)) = segment.split_once(' ') {
        let rest = rest.trim_start();
        if let Some(quantity) = quantity_word(word).filter(|_| !rest.is_empty()) {
            return (quantity, rest);
        }
    }

    (1, segment)
}

fn quantity_word(word: &str) -> Option<u32> {
    QUANTITY_WORDS.iter().find(|(candidate, _)| *candidate == word).map(|(_, quantity)| *quantity)
}

/// Naive plural stripping: one trailing `s`, unless that would leave nothing.
fn singularize(reference: &str) -> String {
    let trimmed = reference.trim();
    match trimmed.strip_suffix('s').map(str::trim_end) {
        Some(stem) if !stem.is_empty() => stem.to_owned(),
        _ => trimmed.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, VoiceIntent};

    #[test]
    fn parses_quantities_and_singularizes() {
        assert_eq!(
            parse_command("add 2 breads and 1 cake"),
            vec![VoiceIntent::new(2, "bread"), VoiceIntent::new(1, "cake")]
        );
    }

    #[test]
    fn quantity_words_and_articles_are_understood() {
        assert_eq!(
            parse_command("Please add three muffins, an apple and a jam to my cart"),
            vec![
                VoiceIntent::new(3, "muffin"),
                VoiceIntent::new(1, "apple"),
                VoiceIntent::new(1, "jam"),
            ]
        );
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        assert_eq!(parse_command("add butter"), vec![VoiceIntent::new(1, "butter")]);
    }

    #[test]
    fn zero_quantity_is_raised_to_one() {
        assert_eq!(parse_command("add 0 cakes"), vec![VoiceIntent::new(1, "cake")]);
    }

    #[test]
    fn digits_may_touch_the_product_name() {
        assert_eq!(parse_command("12cupcakes"), vec![VoiceIntent::new(12, "cupcake")]);
    }

    #[test]
    fn bare_quantity_is_treated_as_product_text() {
        assert_eq!(parse_command("add two"), vec![VoiceIntent::new(1, "two")]);
        assert_eq!(parse_command("add 5"), vec![VoiceIntent::new(1, "5")]);
    }

    #[test]
    fn filler_words_are_removed_inside_words_too() {
        // Substring removal: "tomatoes" loses its "to" sequences.
        assert_eq!(parse_command("add tomatoes"), vec![VoiceIntent::new(1, "ma e")]);
    }

    #[test]
    fn unrecognizable_text_is_one_intent() {
        assert_eq!(parse_command("xyz qwerty"), vec![VoiceIntent::new(1, "xyz qwerty")]);
    }

    #[test]
    fn empty_and_filler_only_transcripts_yield_nothing() {
        assert!(parse_command("").is_empty());
        assert!(parse_command("   ").is_empty());
        assert!(parse_command("please add to my cart").is_empty());
        assert!(parse_command(" , ,").is_empty());
    }

    #[test]
    fn comma_followed_by_and_keeps_the_conjunction() {
        assert_eq!(
            parse_command("bread, and cake"),
            vec![VoiceIntent::new(1, "bread"), VoiceIntent::new(1, "and cake")]
        );
    }

    #[test]
    fn lone_s_is_not_stripped_to_nothing() {
        assert_eq!(parse_command("s"), vec![VoiceIntent::new(1, "s")]);
    }
}
