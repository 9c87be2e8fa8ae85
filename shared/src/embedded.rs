use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to read JSON embedded in a page attribute
#[derive(Debug, Error)]
pub enum EmbeddedDataError {
    #[error("failed to parse {what}: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Category as embedded in the transaction form's `data-categories`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOption {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Ids arrive as numbers from some templates and as strings from others
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Parse a JSON list. An absent or blank attribute is an empty list.
pub fn parse_list<T: DeserializeOwned>(raw: Option<&str>, what: &'static str) -> Result<Vec<T>, EmbeddedDataError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json).map_err(|source| EmbeddedDataError::Malformed { what, source }),
    }
}

pub fn parse_categories(raw: Option<&str>) -> Result<Vec<CategoryOption>, EmbeddedDataError> {
    parse_list(raw, "categories data")
}

pub fn parse_suggested_colors(raw: Option<&str>) -> Result<Vec<String>, EmbeddedDataError> {
    parse_list(raw, "suggested colors")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_categories_with_mixed_ids() {
        let raw = r##"[
            {"id": 1, "name": "Salário", "type": "income", "color": "#10B981"},
            {"id": "2", "name": "Mercado", "type": "expense"}
        ]"##;
        let categories = parse_categories(Some(raw)).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].id, "1");
        assert_eq!(categories[0].kind, "income");
        assert_eq!(categories[1].id, "2");
        assert_eq!(categories[1].color, None);
    }

    #[test]
    fn test_missing_attribute_is_empty() {
        assert!(parse_suggested_colors(None).unwrap().is_empty());
        assert!(parse_suggested_colors(Some("  ")).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_reports_what_failed() {
        let err = parse_suggested_colors(Some("['#fff'")).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse suggested colors"));
        assert!(parse_categories(Some(r#"[{"id": 1}]"#)).is_err());
    }
}
