//! Catalog resolution of parsed intents

use serde::Serialize;

use super::parser::{parse_command, VoiceIntent};
use crate::domain::product::Product;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchedItem {
    pub product: Product,
    pub quantity: u32,
    /// Reference as parsed from the transcript
    pub search_text: String,
}

/// Per-intent result of a voice command. `matched` and `unmatched` together hold one entry per
/// parsed intent, so both being empty means nothing was understood.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub matched: Vec<MatchedItem>,
    pub unmatched: Vec<String>,
}

impl Interpretation {
    pub fn intent_count(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intent_count() == 0
    }
}

/// Parses `transcript` and resolves each intent against `catalog`.
pub fn interpret(transcript: &str, catalog: &[Product]) -> Interpretation {
    resolve(parse_command(transcript), catalog)
}

pub fn resolve(intents: Vec<VoiceIntent>, catalog: &[Product]) -> Interpretation {
    let mut interpretation = Interpretation::default();

    for intent in intents {
        match find_product(catalog, &intent.search_text) {
            Some(product) => interpretation.matched.push(MatchedItem {
                product: product.clone(),
                quantity: intent.quantity,
                search_text: intent.search_text,
            }),
            None => interpretation.unmatched.push(intent.search_text),
        }
    }

    interpretation
}

/// First product in catalog order whose name equals, contains, is contained in, or equals
/// ignoring whitespace the search text. Case-insensitive; products with blank names never match.
pub fn find_product<'a>(catalog: &'a [Product], search_text: &str) -> Option<&'a Product> {
    let search = search_text.trim().to_lowercase();
    if search.is_empty() {
        return None;
    }
    let compact_search = strip_whitespace(&search);

    catalog.iter().find(|product| {
        let name = product.normalized_name();
        if name.trim().is_empty() {
            return false;
        }

        name == search
            || name.contains(&search)
            || search.contains(&name)
            || strip_whitespace(&name) == compact_search
    })
}

fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|ch| !ch.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{find_product, interpret};
    use crate::domain::product::Product;

    fn product(id: &str, name: &str) -> Product {
        Product::new(id, name, Decimal::new(60, 0)).expect("valid product")
    }

    #[test]
    fn resolves_every_item_of_a_compound_command() {
        let catalog =
            vec![product("bread", "Bread"), product("cake", "Cake"), product("butter", "Butter")];

        let result = interpret("add 2 breads and 1 cake", &catalog);

        let matched: Vec<_> =
            result.matched.iter().map(|item| (item.product.name.as_str(), item.quantity)).collect();
        assert_eq!(matched, [("Bread", 2), ("Cake", 1)]);
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn unresolved_items_are_reported_by_search_text() {
        let catalog = vec![product("bread", "Bread")];

        let result = interpret("please add a jam", &catalog);

        assert!(result.matched.is_empty());
        assert_eq!(result.unmatched, ["jam"]);
    }

    #[test]
    fn gibberish_is_one_unmatched_intent() {
        let catalog = vec![product("bread", "Bread")];

        let result = interpret("xyz qwerty", &catalog);

        assert_eq!(result.unmatched, ["xyz qwerty"]);
        assert_eq!(result.intent_count(), 1);
    }

    #[test]
    fn empty_transcript_has_no_intents() {
        let catalog = vec![product("bread", "Bread")];

        assert!(interpret("", &catalog).is_empty());
    }

    #[test]
    fn matching_ignores_case_and_whitespace() {
        let catalog = vec![product("bread", "Bread"), product("tea", "Green Tea")];

        let result = interpret("ADD GREENTEA", &catalog);

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].product.name, "Green Tea");
    }

    #[test]
    fn partial_names_match_in_both_directions() {
        let catalog = vec![product("cake", "Chocolate Cake"), product("jam", "Jam")];

        let cake = find_product(&catalog, "cake").map(|product| product.name.as_str());
        let jam = find_product(&catalog, "strawberry jam").map(|product| product.name.as_str());

        assert_eq!(cake, Some("Chocolate Cake"));
        assert_eq!(jam, Some("Jam"));
        assert!(find_product(&catalog, "butter").is_none());
    }

    #[test]
    fn first_catalog_hit_wins() {
        let catalog = vec![product("cupcake", "Vanilla Cupcake"), product("cake", "Cake")];

        let hit = find_product(&catalog, "cake").expect("match");

        // No ranking: the substring hit earlier in the catalog beats the exact name.
        assert_eq!(hit.name, "Vanilla Cupcake");
    }

    #[test]
    fn blank_names_and_blank_searches_never_match() {
        let catalog = vec![product("blank", "  "), product("bread", "Bread")];

        assert_eq!(
            find_product(&catalog, "bread").map(|product| product.id.as_str()),
            Some("bread")
        );
        assert!(find_product(&catalog, "   ").is_none());
    }
}
