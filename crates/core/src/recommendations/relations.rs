//! Keyword relation table

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::ConfigError;

/// Products whose name contains `keyword` pull in products whose name contains any of `related`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordRelation {
    pub keyword: String,
    pub related: Vec<String>,
}

impl KeywordRelation {
    fn new(keyword: &str, related: &[&str]) -> Self {
        Self {
            keyword: keyword.to_owned(),
            related: related.iter().map(|value| (*value).to_owned()).collect(),
        }
    }
}

/// Ordered keyword table. Entry order and related-keyword order both decide ranking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationTable {
    relations: Vec<KeywordRelation>,
}

impl Default for RelationTable {
    fn default() -> Self {
        Self {
            relations: vec![
                KeywordRelation::new("bread", &["butter", "jam", "cream", "cake"]),
                KeywordRelation::new("cake", &["candle", "cupcake", "fruit"]),
                KeywordRelation::new("cream", &["bread", "cake", "fruit"]),
                KeywordRelation::new("fruit", &["cake", "cream"]),
            ],
        }
    }
}

impl RelationTable {
    /// Lower-cases every keyword and rejects entries that would match every product name.
    pub fn new(relations: Vec<KeywordRelation>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(relations.len());

        for relation in relations {
            let keyword = relation.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(ConfigError::InvalidRelationTable(
                    "relation keyword must not be empty".to_string(),
                ));
            }
            if !seen.insert(keyword.clone()) {
                return Err(ConfigError::InvalidRelationTable(format!(
                    "relation keyword `{keyword}` is declared more than once"
                )));
            }

            let mut related = Vec::with_capacity(relation.related.len());
            for value in relation.related {
                let value = value.trim().to_lowercase();
                if value.is_empty() {
                    return Err(ConfigError::InvalidRelationTable(format!(
                        "relation `{keyword}` contains an empty related keyword"
                    )));
                }
                related.push(value);
            }

            normalized.push(KeywordRelation { keyword, related });
        }

        Ok(Self { relations: normalized })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file = toml::from_str::<RelationTableFile>(raw)
            .map_err(|error| ConfigError::InvalidRelationTable(error.to_string()))?;
        Self::new(file.into_relations())
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
        let file = toml::from_str::<RelationTableFile>(&raw)
            .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })?;
        Self::new(file.into_relations())
    }

    pub fn relations(&self) -> &[KeywordRelation] {
        &self.relations
    }

    /// Related keywords for every table keyword found inside `normalized_name`, in table order.
    pub fn related_keywords<'a>(
        &'a self,
        normalized_name: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.relations
            .iter()
            .filter(move |relation| normalized_name.contains(relation.keyword.as_str()))
            .flat_map(|relation| relation.related.iter().map(String::as_str))
    }
}

#[derive(Debug, Default, Deserialize)]
struct RelationTableFile {
    #[serde(default)]
    relation: Vec<RelationEntry>,
}

#[derive(Debug, Deserialize)]
struct RelationEntry {
    keyword: String,
    #[serde(default)]
    related: Vec<String>,
}

impl RelationTableFile {
    fn into_relations(self) -> Vec<KeywordRelation> {
        self.relation
            .into_iter()
            .map(|entry| KeywordRelation { keyword: entry.keyword, related: entry.related })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::RelationTable;
    use crate::config::ConfigError;

    #[test]
    fn default_table_matches_bakery_taxonomy() {
        let table = RelationTable::default();
        let keywords: Vec<_> =
            table.relations().iter().map(|relation| relation.keyword.as_str()).collect();

        assert_eq!(keywords, ["bread", "cake", "cream", "fruit"]);
        assert_eq!(table.relations()[0].related, ["butter", "jam", "cream", "cake"]);
        assert_eq!(table.relations()[1].related, ["candle", "cupcake", "fruit"]);
        assert_eq!(table.relations()[2].related, ["bread", "cake", "fruit"]);
        assert_eq!(table.relations()[3].related, ["cake", "cream"]);
    }

    #[test]
    fn related_keywords_follow_table_order() {
        let table = RelationTable::default();

        let related: Vec<_> = table.related_keywords("fruit cream cake").collect();

        assert_eq!(
            related,
            ["candle", "cupcake", "fruit", "bread", "cake", "fruit", "cake", "cream"]
        );
    }

    #[test]
    fn related_keywords_are_empty_for_unrelated_names() {
        let table = RelationTable::default();

        assert_eq!(table.related_keywords("green tea").count(), 0);
    }

    #[test]
    fn toml_table_is_normalized_and_ordered() {
        let table = RelationTable::from_toml_str(
            r#"
[[relation]]
keyword = "Tea"
related = ["Biscuit", "honey"]

[[relation]]
keyword = "coffee"
related = ["milk"]
"#,
        )
        .expect("parse relation table");

        assert_eq!(table.relations()[0].keyword, "tea");
        assert_eq!(table.relations()[0].related, ["biscuit", "honey"]);
        assert_eq!(table.relations()[1].keyword, "coffee");
    }

    #[test]
    fn empty_keywords_are_rejected() {
        let error = RelationTable::from_toml_str(
            r#"
[[relation]]
keyword = "  "
related = ["milk"]
"#,
        )
        .expect_err("empty keyword");

        assert!(matches!(error, ConfigError::InvalidRelationTable(_)));
    }

    #[test]
    fn duplicate_keywords_are_rejected() {
        let error = RelationTable::from_toml_str(
            r#"
[[relation]]
keyword = "cake"
related = ["candle"]

[[relation]]
keyword = "CAKE"
related = ["fruit"]
"#,
        )
        .expect_err("duplicate keyword");

        assert!(matches!(
            error,
            ConfigError::InvalidRelationTable(ref message) if message.contains("cake")
        ));
    }

    #[test]
    fn table_loads_from_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("relations.toml");
        fs::write(&path, "[[relation]]\nkeyword = \"pasta\"\nrelated = [\"sauce\"]\n")
            .expect("write relation table");

        let table = RelationTable::from_path(&path).expect("load relation table");

        assert_eq!(table.related_keywords("fresh pasta").collect::<Vec<_>>(), ["sauce"]);
    }

    #[test]
    fn missing_file_reports_read_error() {
        let dir = TempDir::new().expect("temp dir");

        let error = RelationTable::from_path(&dir.path().join("absent.toml"))
            .expect_err("missing relation table");

        assert!(matches!(error, ConfigError::ReadFile { .. }));
    }
}
