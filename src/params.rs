use crate::errors::{Error, Result};
use crate::query::QueryValue;
use indexmap::IndexMap;

/// A column title.
///
/// Plain text is HTML-escaped at render time; `Html` passes through
/// untouched and is never run through the title formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Title {
    Text(String),
    Html(String),
}

/// Everything one sortable header link needs from its caller.
///
/// A spec needs only a sort key; every other field is optional and set
/// through the `with_*` builders.
///
/// ```
/// use sortlink::LinkSpec;
///
/// let spec = LinkSpec::new("user.name")
///     .with_title("Name")
///     .with_query_prefix("users-")
///     .with_attribute("rel", "nofollow");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSpec {
    /// Raw sort identifier, possibly `relation.column`.
    pub sort_key: String,

    /// Absent means "use the resolved column name".
    pub title: Option<Title>,

    /// Prefix for the `sort`/`direction` parameter names, so several tables
    /// can sort independently on one page.
    pub query_prefix: String,

    /// Extra parameters merged into the link's query string.
    pub extra_query_params: IndexMap<String, QueryValue>,

    /// Attributes for the anchor element. `href` and `class` are special:
    /// `href` replaces the request path as the link base and `class` tokens
    /// are appended to the computed class list.
    pub anchor_attributes: IndexMap<String, String>,
}

impl LinkSpec {
    pub fn new(sort_key: impl Into<String>) -> Self {
        Self {
            sort_key: sort_key.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Title::Text(title.into()));
        self
    }

    /// Use pre-rendered markup as the title. It is neither escaped nor
    /// formatted.
    pub fn with_title_html(mut self, markup: impl Into<String>) -> Self {
        self.title = Some(Title::Html(markup.into()));
        self
    }

    pub fn with_query_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.query_prefix = prefix.into();
        self
    }

    pub fn with_query_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Self {
        self.extra_query_params.insert(key.into(), value.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.anchor_attributes.insert(key.into(), value.into());
        self
    }

    /// Column half of the sort key, with any relation prefix stripped.
    pub fn resolved_column(&self, separator: &str) -> Result<String> {
        Ok(match explode_sort_parameter(&self.sort_key, separator)? {
            Some((_, column)) => column,
            None => self.sort_key.clone(),
        })
    }
}

/// Split a `relation.column` sort key on `separator`.
///
/// `None` when the separator is empty or absent from the key. Splitting
/// must yield exactly two non-empty segments; anything else is a
/// configuration error.
pub fn explode_sort_parameter(raw: &str, separator: &str) -> Result<Option<(String, String)>> {
    if separator.is_empty() || !raw.contains(separator) {
        return Ok(None);
    }

    let segments: Vec<&str> = raw.split(separator).collect();
    match segments.as_slice() {
        [relation, column] if !relation.is_empty() && !column.is_empty() => {
            Ok(Some(((*relation).to_string(), (*column).to_string())))
        }
        _ => Err(Error::Configuration(format!(
            "sort key {raw:?} must split into exactly one relation and one column on {separator:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_key_does_not_split() {
        assert_eq!(explode_sort_parameter("name", ".").unwrap(), None);
    }

    #[test]
    fn test_relation_key_splits_into_two() {
        let split = explode_sort_parameter("user.name", ".").unwrap();
        assert_eq!(split, Some(("user".to_string(), "name".to_string())));
    }

    #[test]
    fn test_three_segments_error() {
        assert!(explode_sort_parameter("a.b.c", ".").is_err());
    }

    #[test]
    fn test_empty_segments_error() {
        assert!(explode_sort_parameter("user.", ".").is_err());
        assert!(explode_sort_parameter(".name", ".").is_err());
    }

    #[test]
    fn test_empty_separator_never_splits() {
        assert_eq!(explode_sort_parameter("user.name", "").unwrap(), None);
    }

    #[test]
    fn test_custom_separator() {
        let split = explode_sort_parameter("user|name", "|").unwrap();
        assert_eq!(split, Some(("user".to_string(), "name".to_string())));
    }

    #[test]
    fn test_resolved_column_strips_relation() {
        assert_eq!(
            LinkSpec::new("user.name").resolved_column(".").unwrap(),
            "name"
        );
        assert_eq!(LinkSpec::new("name").resolved_column(".").unwrap(), "name");
    }

    #[test]
    fn test_builders_accumulate() {
        let spec = LinkSpec::new("name")
            .with_title("Name")
            .with_query_prefix("users-")
            .with_query_param("limit", "10")
            .with_attribute("rel", "nofollow")
            .with_attribute("class", "header");

        assert_eq!(spec.title, Some(Title::Text("Name".to_string())));
        assert_eq!(spec.query_prefix, "users-");
        assert_eq!(
            spec.extra_query_params.get("limit"),
            Some(&QueryValue::Scalar("10".to_string()))
        );
        assert_eq!(
            spec.anchor_attributes.get("class").map(String::as_str),
            Some("header")
        );
    }
}
