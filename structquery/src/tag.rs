//! Tag grammar: `<operator>[;<key>[:<value>]]*`
//!
//! The first `;`-separated segment is the operator token, every following
//! non-empty segment is an option. Options split on the first `:`; a missing
//! value is the empty string. There is no escaping for `;` or `:` inside a
//! value.

use indexmap::IndexMap;

/// Option key overriding the storage column.
pub const COLUMN: &str = "column";
/// Option key passed to the naming policy as table qualifier.
pub const TABLE: &str = "table";
/// Option key holding a JSON path for the JSON operators.
pub const PATH: &str = "path";
/// Option key holding a literal SQL fragment for the raw operator.
pub const SQL: &str = "sql";

/// Parsed options of a tag, in first-insertion order. Later duplicates
/// overwrite the value but keep the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions(IndexMap<String, String>);

impl TagOptions {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key` when present and non-empty.
    #[must_use]
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

/// Split a tag into its operator token and options.
///
/// The operator is trimmed. Parsing never fails: malformed segments degrade
/// to key/empty-value pairs.
#[must_use]
pub fn parse_tag(tag: &str) -> (String, TagOptions) {
    let mut segments = tag.split(';');
    let operator = segments.next().unwrap_or_default().trim().to_string();

    let mut options = TagOptions::default();
    for segment in segments {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match segment.split_once(':') {
            Some((key, value)) => options.insert(key, value),
            None => options.insert(segment, ""),
        }
    }
    (operator, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tag() {
        let (operator, options) = parse_tag("");
        assert_eq!(operator, "");
        assert!(options.is_empty());
    }

    #[test]
    fn operator_and_options() {
        let (operator, options) = parse_tag("eq;a:b;type:varchar(100);uniq;");
        assert_eq!(operator, "eq");
        assert_eq!(options.len(), 3);
        assert_eq!(options.get("a"), Some("b"));
        assert_eq!(options.get("type"), Some("varchar(100)"));
        assert_eq!(options.get("uniq"), Some(""));
        assert_eq!(options.non_empty("uniq"), None);
    }

    #[test]
    fn value_splits_on_first_colon_only() {
        let (_, options) = parse_tag("json_extract_eq;path:$.a:b");
        assert_eq!(options.get(PATH), Some("$.a:b"));
    }

    #[test]
    fn duplicate_keys_last_wins_in_first_position() {
        let (_, options) = parse_tag("like;column:a;path:$.x;column:b");
        assert_eq!(options.get(COLUMN), Some("b"));
        let keys: Vec<_> = options.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["column", "path"]);
    }

    #[test]
    fn operator_and_segments_are_trimmed() {
        let (operator, options) = parse_tag(" gte ;  column:created_at ; ;");
        assert_eq!(operator, "gte");
        assert_eq!(options.get(COLUMN), Some("created_at"));
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn options_without_operator() {
        let (operator, options) = parse_tag(";column:id");
        assert_eq!(operator, "");
        assert_eq!(options.get(COLUMN), Some("id"));
    }
}
